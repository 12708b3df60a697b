//! Command-line interface shared by `fcomp` and `fdecomp`.
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`constants`] | Program identity strings, banner and exit codes. |
//! | [`help`]      | Usage text printers. |
//! | [`arg_utils`] | Path basename, switch abbreviation matching, bounded integer parsing. |
//! | [`op_mode`]   | Environment-based defaults (`FEDNET_HISTORY`). |
//! | [`args`]      | `parse_args_from` - the switch-parsing loop producing a [`args::Command`]. |
//! | [`dispatch`]  | `main_common` - parse, run, and map the outcome to an exit code. |

pub mod constants;
pub mod help;
pub mod arg_utils;
pub mod op_mode;
pub mod args;
pub mod dispatch;
