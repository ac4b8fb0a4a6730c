use super::*;

#[test]
fn expression_tokens_keep_their_leading_dashes() {
    let cli = Cli::parse_from(["trawl", "/tmp", "-name", "*.txt", "-print"]);

    assert_eq!(cli.root, Some(PathBuf::from("/tmp")));
    assert_eq!(cli.expressions, vec!["-name", "*.txt", "-print"]);
}

#[test]
fn bare_invocation_has_no_root() {
    let cli = Cli::parse_from(["trawl"]);
    assert_eq!(cli.root, None);
    assert!(cli.expressions.is_empty());
}

#[test]
fn root_without_expressions_parses() {
    let cli = Cli::parse_from(["trawl", "."]);
    assert_eq!(cli.root, Some(PathBuf::from(".")));
    assert!(cli.expressions.is_empty());
}

#[test]
fn trailing_separators_are_stripped() {
    let cases: &[(&str, &str)] = &[
        ("/tmp/", "/tmp"),
        ("/tmp///", "/tmp"),
        ("/tmp", "/tmp"),
        ("/", "/"),
        (".", "."),
        ("sub/", "sub"),
    ];

    for (given, expected) in cases {
        assert_eq!(
            strip_trailing_separators(PathBuf::from(given)),
            PathBuf::from(expected),
            "{given:?}"
        );
    }
}

#[test]
fn exit_codes_are_distinct() {
    let codes = [exit::OK, exit::USAGE, exit::EXPRESSION, exit::OUTPUT];
    for (i, a) in codes.iter().enumerate() {
        for b in &codes[i + 1..] {
            assert_ne!(a, b);
        }
    }
}
