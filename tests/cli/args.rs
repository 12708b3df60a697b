// Integration tests for cli/args.rs: the shared switch grammar of fcomp and
// fdecomp, driven through the public parser.

use std::path::PathBuf;

use fednet::cli::args::{parse_args_from, Command, ParsedArgs};
use fednet::cli::op_mode::init_history_log_2_from;
use fednet::io::prefs::{DISPLAY_NORMAL, DISPLAY_VERBOSE};
use fednet::Prefs;

fn argv(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

fn run_args(prefs: Prefs, args: &[&str]) -> ParsedArgs {
    match parse_args_from(prefs, &argv(args)) {
        Ok(Command::Run(parsed)) => parsed,
        other => panic!("expected a run, got {other:?}"),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Defaults
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn environment_history_is_the_starting_point() {
    let prefs = Prefs { history_log_2: init_history_log_2_from(Some("14")), ..Prefs::default() };
    assert_eq!(run_args(prefs.clone(), &["in"]).prefs.history_log_2, 14);
    assert_eq!(run_args(prefs, &["-history", "3", "in"]).prefs.history_log_2, 3);
}

#[test]
fn default_run_is_quiet_and_untimed() {
    let parsed = run_args(Prefs::default(), &["in", "out"]);
    assert_eq!(parsed.prefs.display_level, DISPLAY_NORMAL);
    assert!(!parsed.prefs.time);
    assert_eq!(parsed.prefs.history_log_2, 9);
}

// ─────────────────────────────────────────────────────────────────────────────
// Switches
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn switches_are_case_insensitive_prefixes() {
    let parsed = run_args(Prefs::default(), &["-VERB", "-Ti", "-O", "out.fed", "in.txt"]);
    assert_eq!(parsed.prefs.display_level, DISPLAY_VERBOSE);
    assert!(parsed.prefs.time);
    assert_eq!(parsed.output, Some(PathBuf::from("out.fed")));
    assert_eq!(parsed.input, Some(PathBuf::from("in.txt")));
}

#[test]
fn help_stops_parsing() {
    let cmd = parse_args_from(Prefs::default(), &argv(&["-help", "-nonsense"])).unwrap();
    assert_eq!(cmd, Command::Help);
}

#[test]
fn history_bounds() {
    assert_eq!(run_args(Prefs::default(), &["-hi", "31", "f"]).prefs.history_log_2, 31);
    let err = parse_args_from(Prefs::default(), &argv(&["-hi", "x", "f"])).unwrap_err();
    assert_eq!(err.to_string(), "Bad value 'x' for switch -history (must be 0..31)");
}

#[test]
fn outfile_switch_with_single_operand() {
    let parsed = run_args(Prefs::default(), &["-outfile", "o", "i"]);
    assert_eq!(parsed.input, Some(PathBuf::from("i")));
    assert_eq!(parsed.output, Some(PathBuf::from("o")));
}

#[test]
fn outfile_switch_without_input_reads_stdin() {
    let parsed = run_args(Prefs::default(), &["-o", "o"]);
    assert_eq!(parsed.input, None);
    assert_eq!(parsed.output, Some(PathBuf::from("o")));
}

// ─────────────────────────────────────────────────────────────────────────────
// Batch
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn batch_keeps_file_order() {
    let parsed = run_args(Prefs::default(), &["-batch", "-time", "c", "a", "b"]);
    assert!(parsed.batch);
    assert!(parsed.prefs.time);
    assert_eq!(
        parsed.files,
        vec![PathBuf::from("c"), PathBuf::from("a"), PathBuf::from("b")]
    );
    assert_eq!(parsed.input, None);
    assert_eq!(parsed.output, None);
}

#[test]
fn batch_does_not_require_output_in_verbose_mode() {
    let parsed = run_args(Prefs::default(), &["-b", "-v", "a"]);
    assert!(parsed.prefs.verbose());
}
