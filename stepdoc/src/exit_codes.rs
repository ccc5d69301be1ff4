//! Stable exit codes for stepdoc CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Command failed: unreadable input, invalid config or dependencies, or a
/// document that fails validation.
pub const INVALID: i32 = 1;
/// Command-line usage error (reported by clap).
pub const USAGE: i32 = 2;
