//! Process exit codes

/// Any handled failure: missing credential, bad input, transport or HTTP error
pub const FAILURE: i32 = 1;
