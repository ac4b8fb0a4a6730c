use super::*;

use globset::Glob;
use trawl_fs::FileStatus;
use uzers::{get_current_uid, get_current_username};

const NO_SUCH_UID: u32 = 0xFFFF_FFFD;

fn status_with(mode: u32, uid: u32) -> FileStatus {
    FileStatus {
        inode: 7,
        size: 42,
        blocks: 8,
        links: 1,
        uid,
        gid: 0,
        mtime: 86_400 * 40,
        mode,
    }
}

fn matcher(pattern: &str) -> GlobMatcher {
    Glob::new(pattern).expect("valid glob").compile_matcher()
}

#[test]
fn type_matches_every_letter() {
    let cases: &[(char, u32)] = &[
        ('f', 0o100644),
        ('d', 0o040755),
        ('l', 0o120777),
        ('b', 0o060660),
        ('c', 0o020666),
        ('p', 0o010600),
        ('s', 0o140700),
    ];

    for (letter, mode) in cases {
        let status = status_with(*mode, 0);
        assert!(
            type_matches(&letter.to_string(), &status).expect("valid letter"),
            "letter {letter} should match mode {mode:o}"
        );
        // Same letter against some other kind fails the filter.
        let other = if *letter == 'd' { 0o100644 } else { 0o040755 };
        assert!(
            !type_matches(&letter.to_string(), &status_with(other, 0)).expect("valid letter")
        );
    }
}

#[test]
fn type_rejects_anything_outside_the_letter_set() {
    let status = status_with(0o100644, 0);
    for bad in ["x", "", "df", "D", "ff", "?"] {
        let err = type_matches(bad, &status).expect_err("must be rejected");
        assert!(
            matches!(err, ChainError::InvalidTypeLetter(ref v) if v == bad),
            "{bad:?} gave {err:?}"
        );
    }
}

#[test]
fn owner_matches_by_numeric_id() {
    let mut cache = LookupCache::new();
    let status = status_with(0o100644, 12345);

    assert!(owner_matches(&mut cache, "12345", &status).expect("numeric id"));
    assert!(!owner_matches(&mut cache, "12346", &status).expect("numeric id"));
}

#[test]
fn owner_matches_by_account_name() {
    let mut cache = LookupCache::new();
    let name = get_current_username().expect("current user has a name");
    let name = name.to_string_lossy().into_owned();
    let status = status_with(0o100644, get_current_uid());

    assert!(owner_matches(&mut cache, &name, &status).expect("account name"));
}

#[test]
fn owner_value_that_resolves_to_nothing_is_an_error() {
    let mut cache = LookupCache::new();
    let status = status_with(0o100644, 0);

    for bad in ["no-such-account-12345", "12a", "-3", ""] {
        let err = owner_matches(&mut cache, bad, &status).expect_err("usage error");
        assert!(matches!(err, ChainError::NoSuchUser(ref v) if v == bad));
    }
}

#[test]
fn owner_unresolvable_tracks_the_account_database() {
    let mut cache = LookupCache::new();

    assert!(owner_unresolvable(&mut cache, &status_with(0o100644, NO_SUCH_UID)));
    assert!(!owner_unresolvable(&mut cache, &status_with(0o100644, get_current_uid())));
}

#[test]
fn name_matches_the_base_name_only() {
    let m = matcher("*.txt");
    assert!(name_matches(&m, Path::new("/tmp/dir/a.txt")));
    assert!(!name_matches(&m, Path::new("/tmp/a.txt/binary")));

    // A pattern aimed at the directory part never matches via -name.
    let m = matcher("dir*");
    assert!(!name_matches(&m, Path::new("/tmp/dir/a.txt")));
    assert!(name_matches(&m, Path::new("/tmp/dir")));
}

#[test]
fn path_matches_the_full_traversal_path() {
    let m = matcher("*dir*");
    assert!(path_matches(&m, Path::new("/tmp/dir/a.txt")));
    assert!(!path_matches(&m, Path::new("/tmp/other/a.txt")));

    // The star crosses separators, as fnmatch without FNM_PATHNAME does.
    let m = matcher("/tmp/*.txt");
    assert!(path_matches(&m, Path::new("/tmp/dir/a.txt")));
}

#[test]
fn write_path_emits_one_line() {
    let mut out = Vec::new();
    write_path(&mut out, Path::new("/tmp/a.txt")).expect("write");
    assert_eq!(String::from_utf8(out).expect("utf8"), "/tmp/a.txt\n");
}

#[test]
fn write_listing_emits_the_contracted_fields() {
    let mut out = Vec::new();
    let mut cache = LookupCache::new();
    let status = status_with(0o100644, get_current_uid());

    write_listing(&mut out, &mut cache, Path::new("/tmp/a.txt"), &status).expect("write");

    let line = String::from_utf8(out).expect("utf8");
    assert!(line.ends_with("/tmp/a.txt\n"));
    // inode, halved block count, permission column, link count lead the line.
    assert!(
        line.starts_with("7 4 -rw-r--r-- 1 "),
        "unexpected prefix: {line:?}"
    );

    let fields: Vec<&str> = line.split_whitespace().collect();
    // inode blocks perms links owner group size Mon D HH:MM path
    assert_eq!(fields.len(), 11, "fields: {fields:?}");
    assert_eq!(fields[6], "42", "size column");
}

#[test]
fn write_listing_falls_back_to_numeric_ids() {
    let mut out = Vec::new();
    let mut cache = LookupCache::new();
    let status = FileStatus {
        uid: NO_SUCH_UID,
        gid: NO_SUCH_UID,
        ..status_with(0o100644, 0)
    };

    write_listing(&mut out, &mut cache, Path::new("/tmp/a.txt"), &status).expect("write");

    let line = String::from_utf8(out).expect("utf8");
    let fields: Vec<&str> = line.split_whitespace().collect();
    assert_eq!(fields[4], NO_SUCH_UID.to_string());
    assert_eq!(fields[5], NO_SUCH_UID.to_string());
}
