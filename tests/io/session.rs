// Tests for single-file and batch processing.
//
// Coverage:
//   - file-to-file round trip and output tagging
//   - in-place rewrites through a temporary file
//   - a failed in-place run leaves the original untouched, including when
//     the compressor itself rejects its input mid-stream
//   - failed outputs are removed, or kept in verbose mode
//   - batch runs continue past a failing file

use std::cell::RefCell;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fednet::codec::Status;
use fednet::io::file_io::{DstStream, SrcStream};
use fednet::io::{process_batch, process_file, FileTagger, NativeTagger, Processor};
use fednet::pump::compress_stream_with;
use fednet::{Direction, FednetError, Prefs, TransferStats};
use tempfile::TempDir;

use super::common::*;

/// Remembers every tagging request.
#[derive(Default)]
struct RecordingTagger {
    calls: RefCell<Vec<(PathBuf, bool)>>,
}

impl FileTagger for RecordingTagger {
    fn tag(&self, path: &Path, compressed: bool) -> io::Result<()> {
        self.calls.borrow_mut().push((path.to_path_buf(), compressed));
        Ok(())
    }
}

struct FailingTagger;

impl FileTagger for FailingTagger {
    fn tag(&self, _path: &Path, _compressed: bool) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only volume"))
    }
}

/// Writes some output, then fails.
struct HalfwayFailure;

impl Processor for HalfwayFailure {
    fn produces_container(&self) -> bool {
        true
    }

    fn process(
        &self,
        _src: &mut SrcStream,
        dst: &mut DstStream,
        _prefs: &Prefs,
    ) -> Result<TransferStats, FednetError> {
        dst.write_all(b"partial").map_err(|e| FednetError::io("write", e))?;
        Err(FednetError::TruncatedInput)
    }
}

/// Runs the real compression pump over an engine that gives up after two
/// steps.
struct RejectingCompressor;

impl Processor for RejectingCompressor {
    fn produces_container(&self) -> bool {
        true
    }

    fn process(
        &self,
        src: &mut SrcStream,
        dst: &mut DstStream,
        prefs: &Prefs,
    ) -> Result<TransferStats, FednetError> {
        let mut engine = ScriptedEngine::failing(2, Status::BadInput);
        compress_stream_with(&mut engine, src, dst, prefs)
    }
}

fn write_file(dir: &TempDir, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, data).unwrap();
    path
}

// ═══════════════════════════════════════════════════════════════════════════
// Single file
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn file_round_trip_tags_outputs() {
    let dir = TempDir::new().unwrap();
    let data = sample_text(10_000);
    let input = write_file(&dir, "plain.txt", &data);
    let packed = dir.path().join("plain.fed");
    let unpacked = dir.path().join("plain.out");
    let tagger = RecordingTagger::default();
    let prefs = quiet_prefs();

    let stats = process_file(
        Some(input.as_path()),
        Some(packed.as_path()),
        &Direction::Compress,
        &prefs,
        &tagger,
    )
    .unwrap();
    assert_eq!(stats.bytes_in, 10_000);
    assert_eq!(stats.bytes_out, fs::metadata(&packed).unwrap().len());

    process_file(
        Some(packed.as_path()),
        Some(unpacked.as_path()),
        &Direction::Decompress,
        &prefs,
        &tagger,
    )
    .unwrap();
    assert_eq!(fs::read(&unpacked).unwrap(), data);

    assert_eq!(
        *tagger.calls.borrow(),
        vec![(packed.clone(), true), (unpacked.clone(), false)]
    );
}

#[test]
fn in_place_round_trip() {
    let dir = TempDir::new().unwrap();
    let data = pattern_000102(5000);
    let path = write_file(&dir, "data.bin", &data);
    let prefs = quiet_prefs();

    process_file(
        Some(path.as_path()),
        Some(path.as_path()),
        &Direction::Compress,
        &prefs,
        &NativeTagger,
    )
    .unwrap();
    let packed = fs::read(&path).unwrap();
    assert_eq!(header_of(&packed), 5000);
    assert!(packed.len() < data.len());

    process_file(
        Some(path.as_path()),
        Some(path.as_path()),
        &Direction::Decompress,
        &prefs,
        &NativeTagger,
    )
    .unwrap();
    assert_eq!(fs::read(&path).unwrap(), data);
}

#[test]
fn differently_spelled_same_path_is_in_place() {
    let dir = TempDir::new().unwrap();
    let data = sample_text(2000);
    let path = write_file(&dir, "doc.txt", &data);
    let dotted = dir.path().join(".").join("doc.txt");

    process_file(
        Some(path.as_path()),
        Some(dotted.as_path()),
        &Direction::Compress,
        &quiet_prefs(),
        &NativeTagger,
    )
    .unwrap();

    let packed = fs::read(&path).unwrap();
    assert_eq!(header_of(&packed), 2000);
    assert_eq!(decompress_bytes(&packed, &quiet_prefs()).unwrap(), data);
}

#[test]
fn failed_in_place_run_keeps_original() {
    let dir = TempDir::new().unwrap();
    let data = sample_text(3000);
    let path = write_file(&dir, "keep.txt", &data);

    let err = process_file(
        Some(path.as_path()),
        Some(path.as_path()),
        &HalfwayFailure,
        &quiet_prefs(),
        &NativeTagger,
    )
    .unwrap_err();

    assert!(matches!(err, FednetError::TruncatedInput));
    assert_eq!(fs::read(&path).unwrap(), data);
}

#[test]
fn rejected_in_place_compression_keeps_original() {
    let dir = TempDir::new().unwrap();
    let data = sample_text(3000);
    let path = write_file(&dir, "rejected.txt", &data);
    let mut prefs = quiet_prefs();
    prefs.set_buffer_size(64);

    let err = process_file(
        Some(path.as_path()),
        Some(path.as_path()),
        &RejectingCompressor,
        &prefs,
        &NativeTagger,
    )
    .unwrap_err();

    assert!(matches!(err, FednetError::CorruptInput(_)), "got {err:?}");
    assert_eq!(fs::read(&path).unwrap(), data);
}

#[test]
fn failed_output_is_removed() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "bad.fed", &[10, 0, 0, 0, 0x00]);
    let output = dir.path().join("bad.out");

    let err = process_file(
        Some(input.as_path()),
        Some(output.as_path()),
        &Direction::Decompress,
        &quiet_prefs(),
        &NativeTagger,
    )
    .unwrap_err();

    assert!(matches!(err, FednetError::TruncatedInput), "got {err:?}");
    assert!(!output.exists());
}

#[test]
fn failed_output_is_kept_when_verbose() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "bad.fed", &[10, 0, 0, 0, 0x00]);
    let output = dir.path().join("bad.out");
    let mut prefs = Prefs::new();
    prefs.set_display_level(3);

    assert!(
        process_file(
            Some(input.as_path()),
            Some(output.as_path()),
            &Direction::Decompress,
            &prefs,
            &NativeTagger,
        )
        .is_err()
    );
    assert!(output.exists());
}

#[test]
fn tagging_failure_fails_the_run() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "in.txt", b"tag me");
    let output = dir.path().join("in.fed");

    let err = process_file(
        Some(input.as_path()),
        Some(output.as_path()),
        &Direction::Compress,
        &quiet_prefs(),
        &FailingTagger,
    )
    .unwrap_err();

    match err {
        FednetError::Tagging { path, .. } => assert_eq!(path, output),
        other => panic!("expected tagging error, got {other:?}"),
    }
    assert!(!output.exists());
}

#[test]
fn missing_input_is_an_open_error() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("absent");
    let output = dir.path().join("never");

    let err = process_file(
        Some(input.as_path()),
        Some(output.as_path()),
        &Direction::Compress,
        &quiet_prefs(),
        &NativeTagger,
    )
    .unwrap_err();

    assert!(matches!(err, FednetError::Io { .. }), "got {err:?}");
    assert!(!output.exists());
}

#[test]
fn directory_input_is_rejected() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out");
    assert!(process_file(
        Some(dir.path()),
        Some(output.as_path()),
        &Direction::Compress,
        &quiet_prefs(),
        &NativeTagger,
    )
    .is_err());
}

// ═══════════════════════════════════════════════════════════════════════════
// Batch
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn batch_compress_then_decompress() {
    let dir = TempDir::new().unwrap();
    let originals: Vec<Vec<u8>> = vec![sample_text(100), pattern_000102(4000), Vec::new()];
    let files: Vec<PathBuf> = originals
        .iter()
        .enumerate()
        .map(|(i, data)| write_file(&dir, &format!("f{i}"), data))
        .collect();
    let prefs = quiet_prefs();

    let report = process_batch(&files, &Direction::Compress, &prefs, &NativeTagger);
    assert!(report.succeeded());
    for (file, data) in files.iter().zip(&originals) {
        assert_eq!(header_of(&fs::read(file).unwrap()), data.len() as i32);
    }

    let report = process_batch(&files, &Direction::Decompress, &prefs, &NativeTagger);
    assert!(report.succeeded());
    for (file, data) in files.iter().zip(&originals) {
        assert_eq!(&fs::read(file).unwrap(), data);
    }
}

#[test]
fn batch_continues_past_a_failure() {
    let dir = TempDir::new().unwrap();
    let prefs = quiet_prefs();
    let one = sample_text(500);
    let three = pattern_000102(700);
    let f1 = write_file(&dir, "one.fed", &compress_bytes(&one, &prefs));
    let f2 = write_file(&dir, "two.fed", b"hello, not a container");
    let f3 = write_file(&dir, "three.fed", &compress_bytes(&three, &prefs));

    let report = process_batch(
        &[f1.clone(), f2.clone(), f3.clone()],
        &Direction::Decompress,
        &prefs,
        &NativeTagger,
    );

    assert!(!report.succeeded());
    assert_eq!(report.outcomes.len(), 3);
    assert_eq!(report.failures().collect::<Vec<_>>(), vec![f2.as_path()]);
    assert_eq!(fs::read(&f1).unwrap(), one);
    assert_eq!(fs::read(&f2).unwrap(), b"hello, not a container");
    assert_eq!(fs::read(&f3).unwrap(), three);
}
