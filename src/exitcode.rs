//! Standard exit codes (BSD sysexits.h compatible)

/// Query answered negatively (course not found, unresolved prerequisites)
pub const FAILURE: i32 = 1;

/// Data format error
pub const DATAERR: i32 = 65;

/// Cannot open input
pub const NOINPUT: i32 = 66;

/// Internal software error
pub const SOFTWARE: i32 = 70;

/// Input/output error
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;
