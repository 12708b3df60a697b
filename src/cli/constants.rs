// cli/constants.rs - Program identity strings and exit codes.

use crate::pump::Direction;

// ── Program identity ─────────────────────────────────────────────────────────
pub const FCOMP_NAME: &str = "fcomp";
pub const FDECOMP_NAME: &str = "fdecomp";

/// Environment variable overriding the default history size.
pub const ENV_HISTORY: &str = "FEDNET_HISTORY";

// ── Exit codes ───────────────────────────────────────────────────────────────
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

/// Name a tool is known by when `argv[0]` is unavailable.
pub fn default_exe_name(direction: Direction) -> &'static str {
    match direction {
        Direction::Compress => FCOMP_NAME,
        Direction::Decompress => FDECOMP_NAME,
    }
}

/// Banner printed by `-verbose`.
pub fn description(direction: Direction) -> String {
    let what = match direction {
        Direction::Compress => "Compresses data into the Fednet container format",
        Direction::Decompress => "Decompresses data from the Fednet container format",
    };
    format!(
        "{} {}\n{}",
        default_exe_name(direction),
        crate::FEDNET_VERSION_STRING,
        what
    )
}
