// prefs.rs - Run preferences and the display-level macros.
//
// `Prefs` is a plain value type built once by the CLI and passed by
// reference to the resolver and the pump. Nothing in the library reads
// process-wide toggles; the display level travels with the preferences.

use crate::config::{BUFFER_SIZE_DEFAULT, HISTORY_LOG_2_DEFAULT, HISTORY_LOG_2_MAX};
use crate::error::FednetError;

// ---------------------------------------------------------------------------
// Display levels
// ---------------------------------------------------------------------------

/// No output at all.
pub const DISPLAY_SILENT: u32 = 0;
/// Error diagnostics only.
pub const DISPLAY_ERRORS: u32 = 1;
/// Errors plus notices such as `Reading from stdin...`. The CLI default.
pub const DISPLAY_NORMAL: u32 = 2;
/// Step-by-step narration, progress and ratio reports.
pub const DISPLAY_VERBOSE: u32 = 3;

/// Conditionally print to stderr when `prefs.display_level >= level`.
#[macro_export]
macro_rules! displaylevel {
    ($prefs:expr, $level:expr, $($arg:tt)*) => {
        if $prefs.display_level >= $level {
            eprint!($($arg)*);
        }
    };
}

/// Conditionally print narration to stdout when `prefs.display_level >= level`.
#[macro_export]
macro_rules! displayout {
    ($prefs:expr, $level:expr, $($arg:tt)*) => {
        if $prefs.display_level >= $level {
            print!($($arg)*);
        }
    };
}

// ---------------------------------------------------------------------------
// Preferences struct
// ---------------------------------------------------------------------------

/// Tunable parameters for one compression or decompression run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prefs {
    /// Base 2 logarithm of the codec history window. Default: 9.
    pub history_log_2: u32,
    /// 0 = silent, 1 = errors, 2 = normal, 3 = verbose. Default: 2.
    pub display_level: u32,
    /// Print the processor time taken by each transfer. Default: false.
    pub time: bool,
    /// Capacity of each staging buffer in bytes. Default: 256.
    pub buffer_size: usize,
}

impl Default for Prefs {
    fn default() -> Self {
        Prefs {
            history_log_2: HISTORY_LOG_2_DEFAULT,
            display_level: DISPLAY_NORMAL,
            time: false,
            buffer_size: BUFFER_SIZE_DEFAULT,
        }
    }
}

impl Prefs {
    /// Returns default preferences.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the history window, rejecting values above [`HISTORY_LOG_2_MAX`].
    pub fn set_history_log_2(&mut self, log_2: u32) -> Result<u32, FednetError> {
        check_history_log_2(log_2)?;
        self.history_log_2 = log_2;
        Ok(log_2)
    }

    /// Sets the staging buffer capacity; zero is bumped to one byte.
    pub fn set_buffer_size(&mut self, size: usize) -> usize {
        self.buffer_size = size.max(1);
        self.buffer_size
    }

    pub fn set_display_level(&mut self, level: u32) -> u32 {
        self.display_level = level;
        level
    }

    /// Verbose (debug) mode: narration, progress, and failed outputs are
    /// left on disk for inspection.
    pub fn verbose(&self) -> bool {
        self.display_level >= DISPLAY_VERBOSE
    }
}

/// Validates a history window size.
pub fn check_history_log_2(log_2: u32) -> Result<(), FednetError> {
    if log_2 > HISTORY_LOG_2_MAX {
        return Err(FednetError::Configuration(format!(
            "History size 2^{} is out of range (0..{})",
            log_2, HISTORY_LOG_2_MAX
        )));
    }
    Ok(())
}
