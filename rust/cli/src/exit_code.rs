//! Exit codes returned by [`crate::run`].

pub const SUCCESS: i32 = 0;

/// Any failure: bad arguments, bad config, engine rejection, I/O.
pub const ERROR: i32 = 2;

/// A run stopped early, like Ctrl+C.
pub const INTERRUPTED: i32 = 130;
