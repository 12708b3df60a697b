//! E2E: Fednet container layout
//!
//! Pins the on-disk format produced and accepted by the library:
//! - 4-byte little-endian signed size header
//! - LSB-first token packing with the history size as distance width
//! - end marker and zero padding

use std::io::Cursor;

use fednet::codec::bits::BitWriter;
use fednet::{compress_stream, decompress_stream, FednetError, Prefs};

fn prefs(history_log_2: u32) -> Prefs {
    let mut prefs = Prefs::new();
    prefs.set_display_level(0);
    prefs.set_history_log_2(history_log_2).unwrap();
    prefs
}

fn pack(data: &[u8], history_log_2: u32) -> Vec<u8> {
    let mut dst = Cursor::new(Vec::new());
    compress_stream(&mut Cursor::new(data.to_vec()), &mut dst, &prefs(history_log_2)).unwrap();
    dst.into_inner()
}

fn unpack(container: &[u8], history_log_2: u32) -> Result<Vec<u8>, FednetError> {
    let mut out = Vec::new();
    decompress_stream(&mut Cursor::new(container.to_vec()), &mut out, &prefs(history_log_2))?;
    Ok(out)
}

// ─────────────────────────────────────────────────────────────────────────────
// Known containers
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn empty_input() {
    // end: 1, nine zero bits, 0xFF
    assert_eq!(pack(b"", 9), [0, 0, 0, 0, 0x01, 0xFC, 0x03]);
}

#[test]
fn single_literal() {
    // literal 'A' (0, 0x41) then the end marker at bit 9
    assert_eq!(pack(b"A", 9), [1, 0, 0, 0, 0x82, 0x02, 0xF8, 0x07]);
}

#[test]
fn run_with_zero_width_distance() {
    // literal 'a', copy (1, length code 1), end
    let container = pack(b"aaaa", 0);
    assert_eq!(container, [4, 0, 0, 0, 0xC2, 0x06, 0xFC, 0x07]);
    assert_eq!(unpack(&container, 0).unwrap(), b"aaaa");
}

#[test]
fn header_is_little_endian() {
    let data = vec![0x5Au8; 0x0102];
    let container = pack(&data, 9);
    assert_eq!(&container[..4], &[0x02, 0x01, 0x00, 0x00]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Hand-built bitstreams
// ─────────────────────────────────────────────────────────────────────────────

fn hand_built(history_log_2: u32, size: i32, tokens: &[(u32, u32, u32)]) -> Vec<u8> {
    let mut sink = std::collections::VecDeque::new();
    let mut w = BitWriter::new();
    for &(flag, dist, code) in tokens {
        w.put(flag, 1, &mut sink);
        if flag == 1 {
            w.put(dist, history_log_2, &mut sink);
        }
        w.put(code, 8, &mut sink);
    }
    w.pad(&mut sink);
    let mut container = size.to_le_bytes().to_vec();
    container.extend(sink);
    container
}

#[test]
fn overlapping_copy_decodes() {
    let container =
        hand_built(4, 6, &[(0, 0, b'x' as u32), (0, 0, b'y' as u32), (1, 1, 2), (1, 0, 0xFF)]);
    assert_eq!(unpack(&container, 4).unwrap(), b"xyxyxy");
}

#[test]
fn longest_copy_decodes() {
    let container = hand_built(9, 257, &[(0, 0, b'z' as u32), (1, 0, 254), (1, 0, 0xFF)]);
    assert_eq!(unpack(&container, 9).unwrap(), vec![b'z'; 257]);
}

#[test]
fn end_marker_with_distance_is_rejected() {
    let container = hand_built(4, 1, &[(0, 0, b'q' as u32), (1, 3, 0xFF)]);
    assert!(matches!(unpack(&container, 4), Err(FednetError::CorruptInput(_))));
}

#[test]
fn maximum_header_is_accepted_as_a_size() {
    // Header 0x7FFFFFFF with an immediately ending body fails only the
    // size cross-check.
    let container = hand_built(9, i32::MAX, &[(1, 0, 0xFF)]);
    match unpack(&container, 9) {
        Err(FednetError::IntegrityMismatch { actual, expected, .. }) => {
            assert_eq!(actual, 0);
            assert_eq!(expected, i32::MAX as u64);
        }
        other => panic!("expected a size mismatch, got {other:?}"),
    }
}
