//! Compression direction of the framing pump.

use std::io::{self, Read, Seek, SeekFrom, Write};

use super::{
    can_seek, encode_header, measure_remaining, HeaderMode, ProgressReport, Transfer,
    TransferStats, FEDNET_HEADER_SIZE, FEDNET_MAX_UNCOMPRESSED,
};
use crate::codec::{Compressor, Engine, Status};
use crate::displayout;
use crate::error::{FednetError, SizeCheck};
use crate::io::prefs::Prefs;
use crate::pump::Direction;

/// Compresses `src` into a Fednet container written to `dst`.
///
/// The header is reserved and back-patched when `dst` can seek; otherwise
/// the remaining length of `src` is measured and written first. One of the
/// two streams must be seekable.
pub fn compress_stream<R, W>(
    src: &mut R,
    dst: &mut W,
    prefs: &Prefs,
) -> Result<TransferStats, FednetError>
where
    R: Read + Seek + ?Sized,
    W: Write + Seek + ?Sized,
{
    let header = choose_header_mode(src, dst, prefs)?;
    let mut engine = Compressor::new(prefs.history_log_2)?;
    pump(&mut engine, header, src, dst, prefs)
}

/// Like [`compress_stream`] with a caller-supplied engine.
pub fn compress_stream_with<E, R, W>(
    engine: &mut E,
    src: &mut R,
    dst: &mut W,
    prefs: &Prefs,
) -> Result<TransferStats, FednetError>
where
    E: Engine + ?Sized,
    R: Read + Seek + ?Sized,
    W: Write + Seek + ?Sized,
{
    let header = choose_header_mode(src, dst, prefs)?;
    pump(engine, header, src, dst, prefs)
}

/// Picks deferred or immediate header mode and emits what must precede
/// the body.
fn choose_header_mode<R, W>(
    src: &mut R,
    dst: &mut W,
    prefs: &Prefs,
) -> Result<HeaderMode, FednetError>
where
    R: Read + Seek + ?Sized,
    W: Write + Seek + ?Sized,
{
    if can_seek(dst) {
        displayout!(prefs, 3, "Leaving {} bytes for uncompressed size\n", FEDNET_HEADER_SIZE);
        let after = dst
            .seek(SeekFrom::Current(FEDNET_HEADER_SIZE as i64))
            .map_err(|e| FednetError::io("Failed to seek beyond start of output", e))?;
        return Ok(HeaderMode::Deferred { header_pos: after - FEDNET_HEADER_SIZE as u64 });
    }

    displayout!(prefs, 3, "Output is not seekable; measuring input\n");
    if !can_seek(src) {
        return Err(FednetError::Configuration(
            "Cannot compress: neither input nor output is seekable".to_string(),
        ));
    }
    let expected =
        measure_remaining(src).map_err(|e| FednetError::io("Failed to measure input size", e))?;
    if expected > FEDNET_MAX_UNCOMPRESSED {
        return Err(FednetError::InputTooLarge(expected));
    }
    displayout!(prefs, 3, "Writing uncompressed size {}\n", expected);
    dst.write_all(&encode_header(expected)?)
        .map_err(|e| FednetError::io("Failed to write uncompressed size", e))?;
    Ok(HeaderMode::Immediate { expected })
}

fn pump<E, R, W>(
    engine: &mut E,
    header: HeaderMode,
    src: &mut R,
    dst: &mut W,
    prefs: &Prefs,
) -> Result<TransferStats, FednetError>
where
    E: Engine + ?Sized,
    R: Read + Seek + ?Sized,
    W: Write + Seek + ?Sized,
{
    let mut transfer = Transfer::new(Direction::Compress, prefs.buffer_size);
    let mut report = ProgressReport::new(prefs, Direction::Compress);
    let mut eof = false;

    // An empty input slice once end-of-file is reached makes the engine flush.
    loop {
        if transfer.input_exhausted() && !eof {
            eof = transfer.refill(src, "Failed to read uncompressed data from input")?;
        }

        let step = transfer.step(engine, &mut report);
        let mut status = step.status;

        if matches!(status, Status::Finished | Status::BufferOverflow) || transfer.output_full() {
            transfer.flush_output(dst)?;
            if status == Status::BufferOverflow {
                status = Status::Ok;
            }
        }

        match status {
            Status::Finished => break,
            Status::Ok | Status::TruncatedInput => continue,
            Status::Aborted => return Err(FednetError::Cancelled),
            Status::BadInput | Status::BufferOverflow => {
                return Err(FednetError::CorruptInput(
                    "Compressor rejected its input".to_string(),
                ))
            }
        }
    }

    let body_in = transfer.in_total;
    match header {
        HeaderMode::Immediate { expected } => {
            displayout!(prefs, 3, "Validating input size against expected\n");
            if body_in != expected {
                return Err(FednetError::IntegrityMismatch {
                    check: SizeCheck::InputLength,
                    actual: body_in,
                    expected,
                });
            }
        }
        HeaderMode::Deferred { header_pos } => {
            let bytes = encode_header(body_in)?;
            displayout!(prefs, 3, "Writing uncompressed size {}\n", body_in);
            dst.seek(SeekFrom::Start(header_pos))
                .map_err(|e| FednetError::io("Failed to seek to start of output", e))?;
            dst.write_all(&bytes)
                .map_err(|e| FednetError::io("Failed to write uncompressed size", e))?;
            // An append-mode output accepts the seek but writes at its end.
            let landed = dst
                .stream_position()
                .map_err(|e| FednetError::io("Failed to seek to start of output", e))?;
            if landed != header_pos + FEDNET_HEADER_SIZE as u64 {
                return Err(FednetError::io(
                    "Failed to write uncompressed size",
                    io::Error::new(
                        io::ErrorKind::Unsupported,
                        "output ignores seeks (opened for appending?)",
                    ),
                ));
            }
        }
    }
    dst.flush().map_err(|e| FednetError::io("Failed to flush output", e))?;

    transfer.out_total += FEDNET_HEADER_SIZE as u64;
    report.show(transfer.in_total, transfer.out_total - FEDNET_HEADER_SIZE as u64);
    Ok(transfer.stats())
}
