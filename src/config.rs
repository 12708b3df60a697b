// config.rs - Compile-time configuration constants.
//
// Runtime configuration lives in `io::prefs::Prefs`, which the CLI builds
// from these defaults, the FEDNET_HISTORY environment variable and the
// command-line switches, then hands to the resolver and the pump.

// Base 2 logarithm of the history size used by the Fednet games, in bytes.
// Can be overridden by the FEDNET_HISTORY environment variable at runtime,
// or by the -history command-line switch.
pub const HISTORY_LOG_2_DEFAULT: u32 = 9;

// Largest history window accepted by the codec engine (2 GiB).
pub const HISTORY_LOG_2_MAX: u32 = 31;

// Capacity of each of the two staging buffers owned by one transfer session.
pub const BUFFER_SIZE_DEFAULT: usize = 256;

// Number of input bytes between two verbose progress reports.
pub const PROGRESS_FREQ: u64 = 64;

// Chunk size used when copying a temporary file back to its destination.
pub const COPY_BUFFER_SIZE: usize = 256;
