use chrono::{Local, TimeZone};

use trawl_fs::{FileKind, ModeBits};
use uzers::{get_group_by_gid, get_user_by_name, get_user_by_uid};

/// Single-slot memo: the most recent key together with its rendered value.
struct Slot<K, V>(Option<(K, V)>);

impl<K: PartialEq, V> Slot<K, V> {
    const fn new() -> Self {
        Slot(None)
    }

    /// Rendered value for `key`, refilling the slot only when the key
    /// changed since the previous query.
    fn render(&mut self, key: K, fill: impl FnOnce(&K) -> V) -> &V {
        let stale = !matches!(&self.0, Some((k, _)) if *k == key);
        if stale {
            let value = fill(&key);
            self.0 = Some((key, value));
        }
        match &self.0 {
            Some((_, value)) => value,
            None => unreachable!(),
        }
    }
}

/// Memoizes the lookups that repeat for entry after entry: account names,
/// permission strings, timestamps, and the `-user` value's resolution.
///
/// One slot per category is enough in practice because adjacent entries
/// overwhelmingly share the same owner, mode, and expression chain. The
/// slots live for the whole run; repeated identical keys are guaranteed to
/// produce byte-identical renderings.
pub struct LookupCache {
    users: Slot<u32, Option<String>>,
    groups: Slot<u32, Option<String>>,
    uids: Slot<String, Option<u32>>,
    modes: Slot<u32, String>,
    mtimes: Slot<i64, String>,
}

impl LookupCache {
    pub fn new() -> Self {
        Self {
            users: Slot::new(),
            groups: Slot::new(),
            uids: Slot::new(),
            modes: Slot::new(),
            mtimes: Slot::new(),
        }
    }

    /// Account name owning `uid`, or `None` when no such account exists.
    /// The `None` is cached too; it is what the `-nouser` filter tests.
    pub fn user_name(&mut self, uid: u32) -> Option<&str> {
        self.users
            .render(uid, |&uid| {
                get_user_by_uid(uid).map(|u| u.name().to_string_lossy().into_owned())
            })
            .as_deref()
    }

    /// Group name for `gid`, or `None` when no such group exists.
    pub fn group_name(&mut self, gid: u32) -> Option<&str> {
        self.groups
            .render(gid, |&gid| {
                get_group_by_gid(gid).map(|g| g.name().to_string_lossy().into_owned())
            })
            .as_deref()
    }

    /// Uid owning the account called `name`, or `None` when the name does
    /// not resolve.
    pub fn uid_for_name(&mut self, name: &str) -> Option<u32> {
        if !matches!(&self.uids.0, Some((k, _)) if k == name) {
            let resolved = get_user_by_name(name).map(|u| u.uid());
            self.uids.0 = Some((name.to_owned(), resolved));
        }
        match &self.uids.0 {
            Some((_, resolved)) => *resolved,
            None => unreachable!(),
        }
    }

    /// Classic 10-character `ls -l` permission column for `mode`.
    pub fn permission_string(&mut self, mode: u32) -> &str {
        self.modes.render(mode, |&mode| render_permissions(mode))
    }

    /// Local-time "Mon D HH:MM" rendering of a modification timestamp.
    pub fn mtime_string(&mut self, mtime: i64) -> &str {
        self.mtimes.render(mtime, |&secs| render_mtime(secs))
    }
}

impl Default for LookupCache {
    fn default() -> Self {
        Self::new()
    }
}

fn render_permissions(mode: u32) -> String {
    let glyph = match FileKind::from_mode(mode) {
        FileKind::BlockDevice => 'b',
        FileKind::CharDevice => 'c',
        FileKind::Directory => 'd',
        FileKind::Fifo => 'p',
        FileKind::Symlink => 'l',
        FileKind::Socket => 's',
        FileKind::Regular | FileKind::Unknown => '-',
    };
    let bits = ModeBits::from_bits_truncate(mode);

    let mut out = String::with_capacity(10);
    out.push(glyph);
    out.push(if bits.contains(ModeBits::USER_READ) { 'r' } else { '-' });
    out.push(if bits.contains(ModeBits::USER_WRITE) { 'w' } else { '-' });
    out.push(exec_glyph(
        bits.contains(ModeBits::USER_EXEC),
        bits.contains(ModeBits::SET_UID),
        's',
    ));
    out.push(if bits.contains(ModeBits::GROUP_READ) { 'r' } else { '-' });
    out.push(if bits.contains(ModeBits::GROUP_WRITE) { 'w' } else { '-' });
    out.push(exec_glyph(
        bits.contains(ModeBits::GROUP_EXEC),
        bits.contains(ModeBits::SET_GID),
        's',
    ));
    out.push(if bits.contains(ModeBits::OTHER_READ) { 'r' } else { '-' });
    out.push(if bits.contains(ModeBits::OTHER_WRITE) { 'w' } else { '-' });
    out.push(exec_glyph(
        bits.contains(ModeBits::OTHER_EXEC),
        bits.contains(ModeBits::STICKY),
        't',
    ));
    out
}

/// Execute slot with the setuid/setgid/sticky overlay; uppercase marks the
/// special bit set without the execute bit.
fn exec_glyph(exec: bool, special: bool, special_char: char) -> char {
    match (special, exec) {
        (true, true) => special_char,
        (true, false) => special_char.to_ascii_uppercase(),
        (false, true) => 'x',
        (false, false) => '-',
    }
}

fn render_mtime(secs: i64) -> String {
    // %e pads the day of month with a space, matching ls.
    match Local.timestamp_opt(secs, 0).single() {
        Some(t) => t.format("%b %e %H:%M").to_string(),
        None => secs.to_string(),
    }
}

#[cfg(test)]
#[path = "lookup_tests.rs"]
mod tests;
