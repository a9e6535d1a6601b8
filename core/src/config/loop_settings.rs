//! Author: [Seclususs](https://github.com/seclususs)

pub const REFRESH_INTERVAL_MS: u64 = 2000;
pub const COMMAND_TIMEOUT_SEC: u64 = 10;
pub const CHILD_POLL_INTERVAL_MS: u64 = 50;
pub const VISIBLE_APP_ADJ: i32 = 100;
pub const MAX_CMDLINE_BYTES: usize = 256;
