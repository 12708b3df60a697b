//! Shared entry point of the `fcomp` and `fdecomp` binaries.
//!
//! # Control flow
//!
//! 1. [`init_prefs`] builds the default preferences (history from the
//!    environment).
//! 2. [`parse_args_from`] processes the switches into a [`Command`].
//! 3. [`run`] hands the files to the resolver and folds the outcome into
//!    the process exit code.

use crate::cli::arg_utils::last_name_from_path;
use crate::cli::args::{parse_args_from, Command, ParsedArgs};
use crate::cli::constants::{default_exe_name, description, EXIT_FAILURE, EXIT_SUCCESS};
use crate::cli::help::{print_bad_usage, print_usage};
use crate::cli::op_mode::init_prefs;
use crate::displayout;
use crate::io::{process_batch, process_file, NativeTagger};
use crate::pump::Direction;

/// Parses the process arguments and runs the tool; returns the exit code.
pub fn main_common(direction: Direction) -> i32 {
    let argv: Vec<String> = std::env::args().collect();
    let exe_name = argv
        .first()
        .map(|p| last_name_from_path(p))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| default_exe_name(direction))
        .to_string();
    let args: &[String] = argv.get(1..).unwrap_or_default();

    match parse_args_from(init_prefs(), args) {
        Ok(Command::Help) => {
            print_usage(&exe_name);
            EXIT_SUCCESS
        }
        Ok(Command::Run(parsed)) => run(parsed, direction),
        Err(e) => {
            print_bad_usage(&exe_name, &e.to_string());
            EXIT_FAILURE
        }
    }
}

/// Executes parsed arguments.
pub fn run(args: ParsedArgs, direction: Direction) -> i32 {
    let prefs = &args.prefs;
    displayout!(prefs, 3, "{}\n", description(direction));

    let ok = if args.batch {
        let report = process_batch(&args.files, &direction, prefs, &NativeTagger);
        report.succeeded()
    } else {
        process_file(
            args.input.as_deref(),
            args.output.as_deref(),
            &direction,
            prefs,
            &NativeTagger,
        )
        .is_ok()
    };

    if ok {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURE
    }
}
