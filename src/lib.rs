// fednet - Fednet container compression tools

pub mod config;
pub mod timefn;
pub mod error;
pub mod codec;
pub mod pump;
pub mod io;
pub mod cli;

// ── Version constants ────────────────────────────────────────────────────────
pub const FEDNET_VERSION_MAJOR: u32 = 1;
pub const FEDNET_VERSION_MINOR: u32 = 0;
pub const FEDNET_VERSION_RELEASE: u32 = 0;
pub const FEDNET_VERSION_NUMBER: u32 =
    FEDNET_VERSION_MAJOR * 100 * 100 + FEDNET_VERSION_MINOR * 100 + FEDNET_VERSION_RELEASE;
pub const FEDNET_VERSION_STRING: &str = "1.0.0";

/// Returns the runtime version number.
pub fn version_number() -> u32 {
    FEDNET_VERSION_NUMBER
}

/// Returns the runtime version string.
pub fn version_string() -> &'static str {
    FEDNET_VERSION_STRING
}

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use error::FednetError;
pub use io::Prefs;
pub use pump::{compress_stream, decompress_stream, Direction, TransferStats};
