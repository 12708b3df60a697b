//! Startup defaults for the CLI.
//!
//! - [`init_history_log_2`] reads the default history size from the
//!   `FEDNET_HISTORY` environment variable.
//! - [`init_prefs`] builds the preferences every run starts from.

use crate::cli::arg_utils::read_bounded_u32;
use crate::cli::constants::ENV_HISTORY;
use crate::config::{HISTORY_LOG_2_DEFAULT, HISTORY_LOG_2_MAX};
use crate::io::prefs::Prefs;

/// Read the default history size from the `FEDNET_HISTORY` environment variable.
pub fn init_history_log_2() -> u32 {
    init_history_log_2_from(std::env::var(ENV_HISTORY).ok().as_deref())
}

/// Testable core of [`init_history_log_2`]: parse an optional
/// `FEDNET_HISTORY` value. `None` simulates the variable being unset.
pub fn init_history_log_2_from(env_val: Option<&str>) -> u32 {
    if let Some(env) = env_val {
        if let Some(val) = read_bounded_u32(env, 0, HISTORY_LOG_2_MAX) {
            return val;
        }
        eprintln!(
            "Ignore environment variable setting {}={}: not a value in 0..{} ",
            ENV_HISTORY, env, HISTORY_LOG_2_MAX
        );
    }
    HISTORY_LOG_2_DEFAULT
}

/// Default preferences, with the history taken from the environment.
pub fn init_prefs() -> Prefs {
    Prefs { history_log_2: init_history_log_2(), ..Prefs::default() }
}
