use std::io::{self, Write};
use std::path::Path;

use globset::GlobMatcher;

use trawl_fs::FileStatus;

use crate::error::ChainError;
use crate::lookup::LookupCache;

const TYPE_LETTERS: &[char] = &['b', 'c', 'd', 'p', 'f', 'l', 's'];

/// `-user NAME|UID`: does the given user own the entry?
///
/// The value resolves as an account name first, then as a numeric id; a
/// value that is neither is a usage error, not a property of the entry.
pub(crate) fn owner_matches(
    cache: &mut LookupCache,
    value: &str,
    status: &FileStatus,
) -> Result<bool, ChainError> {
    let uid = match cache.uid_for_name(value) {
        Some(uid) => uid,
        // parse() rejects trailing garbage, so "12a" fails here.
        None => value
            .parse::<u32>()
            .map_err(|_| ChainError::NoSuchUser(value.to_owned()))?,
    };
    Ok(uid == status.uid)
}

/// `-nouser`: is the owning uid without an account?
pub(crate) fn owner_unresolvable(cache: &mut LookupCache, status: &FileStatus) -> bool {
    cache.user_name(status.uid).is_none()
}

/// `-type LETTER`: is the entry of the given kind?
pub(crate) fn type_matches(value: &str, status: &FileStatus) -> Result<bool, ChainError> {
    let mut chars = value.chars();
    let letter = match (chars.next(), chars.next()) {
        (Some(c), None) if TYPE_LETTERS.contains(&c) => c,
        _ => return Err(ChainError::InvalidTypeLetter(value.to_owned())),
    };
    Ok(status.kind().type_char() == letter)
}

/// `-name PATTERN`: does the entry's base name match? Applies uniformly to
/// files and directories.
pub(crate) fn name_matches(matcher: &GlobMatcher, path: &Path) -> bool {
    // A root like `.` or `/` has no final component and is matched as given.
    let name = path.file_name().unwrap_or(path.as_os_str());
    matcher.is_match(Path::new(name))
}

/// `-path PATTERN`: does the full traversal path match?
pub(crate) fn path_matches(matcher: &GlobMatcher, path: &Path) -> bool {
    matcher.is_match(path)
}

/// `-print`: emit the entry's path.
pub(crate) fn write_path<W: Write>(out: &mut W, path: &Path) -> io::Result<()> {
    writeln!(out, "{}", path.display())
}

/// `-ls`: emit one detailed listing line.
///
/// Field order and widths are a compatibility contract: inode, blocks (the
/// raw 512-byte count shown in 1024-byte units), permission column, link
/// count, owner and group left-justified in 8 columns (numeric id when the
/// lookup fails), size right-justified in 8, "Mon D HH:MM", path.
pub(crate) fn write_listing<W: Write>(
    out: &mut W,
    cache: &mut LookupCache,
    path: &Path,
    status: &FileStatus,
) -> io::Result<()> {
    let owner = match cache.user_name(status.uid) {
        Some(name) => name.to_owned(),
        None => status.uid.to_string(),
    };
    let group = match cache.group_name(status.gid) {
        Some(name) => name.to_owned(),
        None => status.gid.to_string(),
    };
    let permissions = cache.permission_string(status.mode).to_owned();
    let mtime = cache.mtime_string(status.mtime).to_owned();

    writeln!(
        out,
        "{} {} {} {} {:<8} {:<8} {:>8} {} {}",
        status.inode,
        status.blocks / 2,
        permissions,
        status.links,
        owner,
        group,
        status.size,
        mtime,
        path.display()
    )
}

#[cfg(test)]
#[path = "predicates_tests.rs"]
mod tests;
