/// Tag prefixed to every user-facing diagnostic line on stderr.
pub const PROGRAM_NAME: &str = "trawl";

/// Environment variable controlling the stderr log level.
pub const PROGRAM_LOG_LEVEL: &str = "TRAWL_LOG_LEVEL";
