//! Decompression direction of the framing pump.

use std::io::{self, Read, Write};

use super::{
    decode_header, read_fill, ProgressReport, Transfer, TransferStats, FEDNET_HEADER_SIZE,
};
use crate::codec::{Decompressor, Engine, Status};
use crate::displayout;
use crate::error::{FednetError, SizeCheck};
use crate::io::prefs::Prefs;
use crate::pump::Direction;

/// Decompresses the Fednet container read from `src` into `dst`.
///
/// Neither stream needs to be seekable. The header is validated before the
/// engine is created.
pub fn decompress_stream<R, W>(
    src: &mut R,
    dst: &mut W,
    prefs: &Prefs,
) -> Result<TransferStats, FednetError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let expected = read_header(src, prefs)?;
    let mut engine = Decompressor::new(prefs.history_log_2)?;
    pump(&mut engine, expected, src, dst, prefs)
}

/// Like [`decompress_stream`] with a caller-supplied engine. The header is
/// still validated before the engine takes its first step.
pub fn decompress_stream_with<E, R, W>(
    engine: &mut E,
    src: &mut R,
    dst: &mut W,
    prefs: &Prefs,
) -> Result<TransferStats, FednetError>
where
    E: Engine + ?Sized,
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let expected = read_header(src, prefs)?;
    pump(engine, expected, src, dst, prefs)
}

fn read_header<R: Read + ?Sized>(src: &mut R, prefs: &Prefs) -> Result<u64, FednetError> {
    displayout!(prefs, 3, "Reading uncompressed size\n");
    let mut header = [0u8; FEDNET_HEADER_SIZE];
    let n = read_fill(src, &mut header)
        .map_err(|e| FednetError::io("Failed to read uncompressed size", e))?;
    if n < FEDNET_HEADER_SIZE {
        return Err(FednetError::TruncatedInput);
    }
    let expected = decode_header(header)?;
    displayout!(prefs, 3, "Uncompressed size is {}\n", expected);
    Ok(expected)
}

/// `true` if `src` still holds at least one byte.
fn has_trailing_data<R: Read + ?Sized>(src: &mut R) -> io::Result<bool> {
    let mut next = [0u8; 1];
    Ok(read_fill(src, &mut next)? > 0)
}

fn pump<E, R, W>(
    engine: &mut E,
    expected: u64,
    src: &mut R,
    dst: &mut W,
    prefs: &Prefs,
) -> Result<TransferStats, FednetError>
where
    E: Engine + ?Sized,
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut transfer = Transfer::new(Direction::Decompress, prefs.buffer_size);
    transfer.in_total = FEDNET_HEADER_SIZE as u64;
    let mut report = ProgressReport::new(prefs, Direction::Decompress);
    let mut eof = false;
    let mut status;

    loop {
        if transfer.input_exhausted() && !eof {
            eof = transfer.refill(src, "Failed to read compressed data from input")?;
        }

        status = transfer.step(engine, &mut report).status;

        let in_pending = transfer.has_unconsumed_input() || !eof;
        if in_pending && status == Status::TruncatedInput {
            status = Status::Ok;
        }

        if matches!(status, Status::BufferOverflow | Status::Finished) || !in_pending {
            transfer.flush_output(dst)?;
        }

        let more = status == Status::BufferOverflow || (status == Status::Ok && in_pending);
        if !more {
            break;
        }
    }

    report.show(transfer.in_total - FEDNET_HEADER_SIZE as u64, transfer.out_total);

    match status {
        Status::BadInput => {
            Err(FednetError::CorruptInput("Compressed bitstream contains bad data".to_string()))
        }
        Status::TruncatedInput => Err(FednetError::TruncatedInput),
        Status::Aborted => Err(FednetError::Cancelled),
        _ => {
            if status == Status::Finished {
                let trailing = transfer.has_unconsumed_input()
                    || (!eof
                        && has_trailing_data(src).map_err(|e| {
                            FednetError::io("Failed to read compressed data from input", e)
                        })?);
                if trailing {
                    return Err(FednetError::CorruptInput(
                        "Compressed bitstream is followed by unexpected data".to_string(),
                    ));
                }
            }
            if transfer.out_total != expected {
                return Err(FednetError::IntegrityMismatch {
                    check: SizeCheck::OutputLength,
                    actual: transfer.out_total,
                    expected,
                });
            }
            dst.flush().map_err(|e| FednetError::io("Failed to flush output", e))?;
            Ok(transfer.stats())
        }
    }
}
