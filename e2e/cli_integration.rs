// e2e/cli_integration.rs - black-box tests of the fcomp and fdecomp binaries
//
// Runs the built tools through std::process::Command and checks exit codes,
// diagnostics, standard stream handling, and batch mode.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Locates a binary produced by Cargo, falling back to the target directory
/// next to the test executable.
fn bin(name: &str, from_cargo: Option<&str>) -> PathBuf {
    if let Some(p) = from_cargo {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop();
    if p.ends_with("deps") {
        p.pop();
    }
    p.push(format!("{name}{}", std::env::consts::EXE_SUFFIX));
    p
}

fn fcomp() -> Command {
    Command::new(bin("fcomp", option_env!("CARGO_BIN_EXE_fcomp")))
}

fn fdecomp() -> Command {
    Command::new(bin("fdecomp", option_env!("CARGO_BIN_EXE_fdecomp")))
}

fn path_str(p: &Path) -> &str {
    p.to_str().unwrap()
}

fn make_input(dir: &TempDir, name: &str) -> (PathBuf, Vec<u8>) {
    let path = dir.path().join(name);
    let content = "Fednet packs this line again and again.\n".repeat(100).into_bytes();
    fs::write(&path, &content).unwrap();
    (path, content)
}

/// Runs `cmd` with `input` piped to stdin and stdout captured.
fn run_piped(mut cmd: Command, input: &[u8]) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn");
    if let Some(mut stdin) = child.stdin.take() {
        // The tool may exit before reading; a broken pipe is expected then.
        let _ = stdin.write_all(input);
    }
    child.wait_with_output().expect("failed to wait")
}

fn stderr_of(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

// ── 1. Usage ─────────────────────────────────────────────────────────────────

#[test]
fn help_prints_usage_and_succeeds() {
    let out = fcomp().arg("-help").output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("usage: fcomp [switches] inputfile [outputfile]"), "{stdout}");
}

#[test]
fn unknown_switch_fails_with_usage() {
    let out = fdecomp().arg("-frobnicate").output().unwrap();
    assert_eq!(out.status.code(), Some(1));
    let stderr = stderr_of(&out);
    assert!(stderr.starts_with("Unrecognised switch 'frobnicate'\n"), "{stderr}");
    assert!(stderr.contains("usage: fdecomp"), "{stderr}");
}

#[test]
fn verbose_without_output_is_a_usage_error() {
    let out = fcomp().args(["-verbose", "somefile"]).output().unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr_of(&out).contains("Must specify an output file in verbose/timer mode"));
}

// ── 2. Files ─────────────────────────────────────────────────────────────────

#[test]
fn file_round_trip() {
    let dir = TempDir::new().unwrap();
    let (input, original) = make_input(&dir, "input.txt");
    let packed = dir.path().join("input.fed");
    let back = dir.path().join("back.txt");

    let status = fcomp().args([path_str(&input), path_str(&packed)]).status().unwrap();
    assert!(status.success());
    let container = fs::read(&packed).unwrap();
    assert_eq!(&container[..4], &(original.len() as i32).to_le_bytes());
    assert!(container.len() < original.len());

    let status = fdecomp().args(["-o", path_str(&back), path_str(&packed)]).status().unwrap();
    assert!(status.success());
    assert_eq!(fs::read(&back).unwrap(), original);
}

#[test]
fn history_switch_must_match_on_both_sides() {
    let dir = TempDir::new().unwrap();
    let (input, original) = make_input(&dir, "input.txt");
    let packed = dir.path().join("input.fed");
    let back = dir.path().join("back.txt");

    assert!(fcomp()
        .args(["-history", "14", path_str(&input), path_str(&packed)])
        .status()
        .unwrap()
        .success());
    assert!(fdecomp()
        .args(["-hi", "14", path_str(&packed), path_str(&back)])
        .status()
        .unwrap()
        .success());
    assert_eq!(fs::read(&back).unwrap(), original);
}

#[test]
fn environment_sets_default_history() {
    let dir = TempDir::new().unwrap();
    let (input, original) = make_input(&dir, "input.txt");
    let packed = dir.path().join("input.fed");
    let back = dir.path().join("back.txt");

    assert!(fcomp()
        .env("FEDNET_HISTORY", "5")
        .args([path_str(&input), path_str(&packed)])
        .status()
        .unwrap()
        .success());
    assert!(fdecomp()
        .args(["-history", "5", path_str(&packed), path_str(&back)])
        .status()
        .unwrap()
        .success());
    assert_eq!(fs::read(&back).unwrap(), original);
}

#[test]
fn time_switch_reports_processor_time() {
    let dir = TempDir::new().unwrap();
    let (input, _) = make_input(&dir, "input.txt");
    let packed = dir.path().join("input.fed");

    let out = fcomp().args(["-time", path_str(&input), path_str(&packed)]).output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("Time taken: "), "{stdout}");
    assert!(stdout.trim_end().ends_with(" seconds"), "{stdout}");
}

#[test]
fn in_place_when_output_names_input() {
    let dir = TempDir::new().unwrap();
    let (input, original) = make_input(&dir, "same.txt");

    assert!(fcomp().args([path_str(&input), path_str(&input)]).status().unwrap().success());
    assert_ne!(fs::read(&input).unwrap(), original);
    assert!(fdecomp().args([path_str(&input), path_str(&input)]).status().unwrap().success());
    assert_eq!(fs::read(&input).unwrap(), original);
}

// ── 3. Standard streams ──────────────────────────────────────────────────────

#[test]
fn file_on_stdin_to_pipe_writes_header_first() {
    let dir = TempDir::new().unwrap();
    let (input, original) = make_input(&dir, "input.txt");

    let out = fcomp()
        .stdin(File::open(&input).unwrap())
        .stdout(Stdio::piped())
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", stderr_of(&out));
    assert_eq!(&out.stdout[..4], &(original.len() as i32).to_le_bytes());

    let back = run_piped(fdecomp(), &out.stdout);
    assert!(back.status.success(), "{}", stderr_of(&back));
    assert_eq!(back.stdout, original);
}

#[test]
fn pipe_to_file_on_stdout_back_patches_header() {
    let dir = TempDir::new().unwrap();
    let packed = dir.path().join("piped.fed");
    let original = b"streamed through a pipe, streamed through a pipe".to_vec();

    let mut child = fcomp()
        .stdin(Stdio::piped())
        .stdout(File::create(&packed).unwrap())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(&original).unwrap();
    assert!(child.wait().unwrap().success());

    let container = fs::read(&packed).unwrap();
    assert_eq!(&container[..4], &(original.len() as i32).to_le_bytes());
}

#[test]
fn pipes_on_both_ends_cannot_compress() {
    let out = run_piped(fcomp(), b"no seeking here");
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr_of(&out).contains("neither input nor output is seekable"));
    assert!(out.stdout.is_empty());
}

// ── 4. Failures ──────────────────────────────────────────────────────────────

#[test]
fn negative_header_is_reported_and_output_removed() {
    let dir = TempDir::new().unwrap();
    let bad = dir.path().join("bad.fed");
    fs::write(&bad, [0xFF, 0xFF, 0xFF, 0xFF, 0, 0]).unwrap();
    let out_path = dir.path().join("bad.out");

    let out = fdecomp().args([path_str(&bad), path_str(&out_path)]).output().unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr_of(&out).contains("uncompressed size"), "{}", stderr_of(&out));
    assert!(!out_path.exists());
}

#[test]
fn truncated_container_keeps_output_in_verbose_mode() {
    let dir = TempDir::new().unwrap();
    let (input, _) = make_input(&dir, "input.txt");
    let packed = dir.path().join("input.fed");
    assert!(fcomp().args([path_str(&input), path_str(&packed)]).status().unwrap().success());
    let container = fs::read(&packed).unwrap();
    fs::write(&packed, &container[..container.len() - 1]).unwrap();
    let out_path = dir.path().join("partial.txt");

    let out = fdecomp().args(["-v", path_str(&packed), path_str(&out_path)]).output().unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr_of(&out).contains("truncated"), "{}", stderr_of(&out));
    assert!(out_path.exists());
}

// ── 5. Batch ─────────────────────────────────────────────────────────────────

#[test]
fn batch_round_trip_and_partial_failure() {
    let dir = TempDir::new().unwrap();
    let (a, a_data) = make_input(&dir, "a.txt");
    let (b, b_data) = make_input(&dir, "b.txt");

    assert!(fcomp().args(["-batch", path_str(&a), path_str(&b)]).status().unwrap().success());
    assert_ne!(fs::read(&a).unwrap(), a_data);

    let missing = dir.path().join("missing.fed");
    let status = fdecomp()
        .args(["-b", path_str(&a), path_str(&missing), path_str(&b)])
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(1));
    assert_eq!(fs::read(&a).unwrap(), a_data);
    assert_eq!(fs::read(&b).unwrap(), b_data);
}
