// Integration tests for cli/dispatch.rs: parsed arguments to exit codes.

use std::fs;
use std::path::PathBuf;

use fednet::cli::args::ParsedArgs;
use fednet::cli::constants::{EXIT_FAILURE, EXIT_SUCCESS};
use fednet::cli::dispatch::run;
use fednet::{Direction, Prefs};
use tempfile::TempDir;

fn quiet() -> Prefs {
    let mut prefs = Prefs::default();
    prefs.set_display_level(0);
    prefs
}

fn single(input: PathBuf, output: PathBuf) -> ParsedArgs {
    ParsedArgs {
        prefs: quiet(),
        batch: false,
        input: Some(input),
        output: Some(output),
        files: Vec::new(),
    }
}

fn batch(files: Vec<PathBuf>) -> ParsedArgs {
    ParsedArgs { prefs: quiet(), batch: true, input: None, output: None, files }
}

#[test]
fn single_file_round_trip_exits_zero() {
    let dir = TempDir::new().unwrap();
    let plain = dir.path().join("a.txt");
    let packed = dir.path().join("a.fed");
    let back = dir.path().join("a.back");
    fs::write(&plain, b"abcabcabcabcabcabcabcabc").unwrap();

    assert_eq!(run(single(plain.clone(), packed.clone()), Direction::Compress), EXIT_SUCCESS);
    assert_eq!(run(single(packed, back.clone()), Direction::Decompress), EXIT_SUCCESS);
    assert_eq!(fs::read(back).unwrap(), fs::read(plain).unwrap());
}

#[test]
fn failed_file_exits_one() {
    let dir = TempDir::new().unwrap();
    let bogus = dir.path().join("bogus.fed");
    fs::write(&bogus, [0xFF, 0xFF, 0xFF, 0xFF]).unwrap();
    let out = dir.path().join("bogus.out");

    assert_eq!(run(single(bogus, out.clone()), Direction::Decompress), EXIT_FAILURE);
    assert!(!out.exists());
}

#[test]
fn batch_with_one_failure_exits_one() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("good");
    let missing = dir.path().join("missing");
    fs::write(&good, b"some text").unwrap();

    let code = run(batch(vec![good.clone(), missing]), Direction::Compress);

    assert_eq!(code, EXIT_FAILURE);
    let packed = fs::read(&good).unwrap();
    assert_eq!(&packed[..4], &9i32.to_le_bytes());
}
