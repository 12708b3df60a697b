//! Command-line parsing for `fcomp` and `fdecomp`.
//!
//! Both tools share one grammar:
//!
//! ```text
//! tool [switches] [inputfile [outputfile]]
//! tool -batch [switches] file1 [file2 .. fileN]
//! ```
//!
//! Switches start with `-`, may be abbreviated to any prefix of at least one
//! character, and end at the first argument that does not start with `-`.

use std::path::PathBuf;

use anyhow::anyhow;

use crate::cli::arg_utils::{is_switch, read_bounded_u32};
use crate::config::HISTORY_LOG_2_MAX;
use crate::io::prefs::{Prefs, DISPLAY_VERBOSE};

/// Runtime options gathered from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedArgs {
    pub prefs: Prefs,
    /// `-batch`: every file is rewritten in place.
    pub batch: bool,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    /// Files of a batch run.
    pub files: Vec<PathBuf>,
}

/// What the tool should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `-help`: print usage to stdout and succeed.
    Help,
    Run(ParsedArgs),
}

/// Parses `args` (without the program name), starting from `prefs`.
///
/// Usage errors are returned as `anyhow` errors whose message is the single
/// diagnostic line to print before the usage text.
pub fn parse_args_from(mut prefs: Prefs, args: &[String]) -> anyhow::Result<Command> {
    let mut batch = false;
    let mut output: Option<PathBuf> = None;
    let mut n = 0;

    while n < args.len() && args[n].starts_with('-') {
        let opt = &args[n][1..];

        if is_switch(opt, "help", 1) {
            return Ok(Command::Help);
        } else if is_switch(opt, "batch", 1) {
            batch = true;
        } else if is_switch(opt, "outfile", 1) {
            n += 1;
            match args.get(n) {
                Some(name) if !name.starts_with('-') => output = Some(PathBuf::from(name)),
                _ => return Err(anyhow!("Missing output file name")),
            }
        } else if is_switch(opt, "history", 1) {
            n += 1;
            let value = args
                .get(n)
                .ok_or_else(|| anyhow!("Missing argument for switch -history"))?;
            let log_2 = read_bounded_u32(value, 0, HISTORY_LOG_2_MAX).ok_or_else(|| {
                anyhow!(
                    "Bad value '{}' for switch -history (must be 0..{})",
                    value,
                    HISTORY_LOG_2_MAX
                )
            })?;
            prefs.set_history_log_2(log_2)?;
        } else if is_switch(opt, "time", 1) {
            prefs.time = true;
        } else if is_switch(opt, "verbose", 1) || is_switch(opt, "debug", 1) {
            prefs.set_display_level(DISPLAY_VERBOSE);
        } else {
            return Err(anyhow!("Unrecognised switch '{}'", opt));
        }
        n += 1;
    }

    let rest = &args[n..];

    if batch {
        if output.is_some() {
            return Err(anyhow!("Cannot specify an output file in batch processing mode"));
        }
        if rest.is_empty() {
            return Err(anyhow!("Must specify file(s) in batch processing mode"));
        }
        return Ok(Command::Run(ParsedArgs {
            prefs,
            batch,
            input: None,
            output: None,
            files: rest.iter().map(PathBuf::from).collect(),
        }));
    }

    let mut rest = rest.iter();
    let input = rest.next().map(PathBuf::from);
    if let Some(name) = rest.next() {
        if output.is_some() {
            return Err(anyhow!("Cannot specify more than one output file"));
        }
        output = Some(PathBuf::from(name));
    }
    if output.is_none() && (prefs.time || prefs.verbose()) {
        return Err(anyhow!("Must specify an output file in verbose/timer mode"));
    }
    if rest.next().is_some() {
        return Err(anyhow!("Too many arguments (did you intend -batch?)"));
    }

    Ok(Command::Run(ParsedArgs { prefs, batch, input, output, files: Vec::new() }))
}
