// Tests for the decompression direction of the framing pump.
//
// Coverage:
//   - short and negative headers are rejected before the engine runs
//   - every truncation of a valid container is detected
//   - trailing bytes after the end marker are rejected
//   - header/body length disagreement fails the size check
//   - malformed copy tokens are corrupt input
//   - pipes on both ends are fine

use std::io::Cursor;

use fednet::codec::Status;
use fednet::error::SizeCheck;
use fednet::pump::decompress_stream_with;
use fednet::{decompress_stream, FednetError};

use super::common::*;

// ═══════════════════════════════════════════════════════════════════════════
// Header
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn short_header_is_truncation() {
    for len in 0..4 {
        let err = decompress_bytes(&[0u8; 3][..len], &quiet_prefs()).unwrap_err();
        assert!(matches!(err, FednetError::TruncatedInput), "len {len}: {err:?}");
    }
}

#[test]
fn negative_header_is_rejected_before_decoding() {
    let container = [0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00];
    let mut src = Cursor::new(container.to_vec());
    let mut dst = Vec::new();
    let err =
        decompress_stream_with(&mut UntouchableEngine, &mut src, &mut dst, &quiet_prefs())
            .unwrap_err();
    assert!(matches!(err, FednetError::CorruptInput(_)), "got {err:?}");
    assert!(dst.is_empty());
}

#[test]
fn header_without_body_is_truncation() {
    let err = decompress_bytes(&[5, 0, 0, 0], &quiet_prefs()).unwrap_err();
    assert!(matches!(err, FednetError::TruncatedInput), "got {err:?}");
}

// ═══════════════════════════════════════════════════════════════════════════
// Body
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn every_truncation_is_detected() {
    let container = compress_bytes(&sample_text(400), &quiet_prefs());
    for cut in 4..container.len() {
        let err = decompress_bytes(&container[..cut], &quiet_prefs()).unwrap_err();
        assert!(matches!(err, FednetError::TruncatedInput), "cut {cut}: {err:?}");
    }
}

#[test]
fn trailing_data_is_rejected() {
    let mut container = compress_bytes(&sample_text(100), &quiet_prefs());
    container.push(0);
    let err = decompress_bytes(&container, &quiet_prefs()).unwrap_err();
    match err {
        FednetError::CorruptInput(msg) => assert!(msg.contains("unexpected data"), "{msg}"),
        other => panic!("expected corrupt input, got {other:?}"),
    }
}

#[test]
fn trailing_data_past_the_input_buffer_is_rejected() {
    let mut prefs = quiet_prefs();
    prefs.set_buffer_size(1);
    let mut container = compress_bytes(&sample_text(100), &prefs);
    container.extend_from_slice(b"junk");
    let err = decompress_bytes(&container, &prefs).unwrap_err();
    assert!(matches!(err, FednetError::CorruptInput(_)), "got {err:?}");
}

#[test]
fn header_disagreeing_with_body_fails_size_check() {
    let mut container = compress_bytes(&pattern_000102(1000), &quiet_prefs());
    container[..4].copy_from_slice(&999i32.to_le_bytes());
    let err = decompress_bytes(&container, &quiet_prefs()).unwrap_err();
    match err {
        FednetError::IntegrityMismatch { check, actual, expected } => {
            assert_eq!(check, SizeCheck::OutputLength);
            assert_eq!(actual, 1000);
            assert_eq!(expected, 999);
        }
        other => panic!("expected size mismatch, got {other:?}"),
    }
}

#[test]
fn copy_without_history_is_corrupt() {
    // h = 9: copy flag, distance 1, length 2, then padding.
    let container = [2, 0, 0, 0, 0x01, 0x00, 0x00];
    let err = decompress_bytes(&container, &quiet_prefs()).unwrap_err();
    match err {
        FednetError::CorruptInput(msg) => assert!(msg.contains("bad data"), "{msg}"),
        other => panic!("expected corrupt input, got {other:?}"),
    }
}

#[test]
fn engine_abort_is_cancellation() {
    let container = compress_bytes(&sample_text(100), &quiet_prefs());
    let mut engine = ScriptedEngine::failing(0, Status::Aborted);
    let mut src = Cursor::new(container);
    let mut dst = Vec::new();
    let err = decompress_stream_with(&mut engine, &mut src, &mut dst, &quiet_prefs()).unwrap_err();
    assert!(matches!(err, FednetError::Cancelled), "got {err:?}");
}

// ═══════════════════════════════════════════════════════════════════════════
// Streams
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn pipes_on_both_ends() {
    let data = sample_text(3000);
    let container = compress_bytes(&data, &quiet_prefs());
    let mut src = Unseekable(Cursor::new(container.clone()));
    let mut dst = Unseekable(Vec::new());

    let stats = decompress_stream(&mut src, &mut dst, &quiet_prefs()).unwrap();

    assert_eq!(dst.0, data);
    assert_eq!(stats.bytes_in, container.len() as u64);
    assert_eq!(stats.bytes_out, 3000);
}

#[test]
fn one_byte_buffers() {
    let data = pattern_000102(600);
    let container = compress_bytes(&data, &quiet_prefs());
    let mut prefs = quiet_prefs();
    prefs.set_buffer_size(1);
    assert_eq!(decompress_bytes(&container, &prefs).unwrap(), data);
}
