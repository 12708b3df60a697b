//! Framing pump: drives a codec engine between two streams through a pair
//! of fixed-capacity buffers and owns the 4-byte size header.
//!
//! A Fednet container is
//!
//! ```text
//! offset 0  length 4  uncompressed size, signed 32-bit little-endian, >= 0
//! offset 4  ...       engine bitstream
//! ```
//!
//! [`compress_stream`] and [`decompress_stream`] are the two directions.
//! Each call is one [`Transfer`] session: it owns its buffers and its
//! engine, and is torn down when the call returns.

pub mod compress;
pub mod decompress;

use std::io::{self, Read, Seek, SeekFrom, Write};

use crate::codec::{Engine, Progress, Step};
use crate::config::PROGRESS_FREQ;
use crate::displayout;
use crate::error::FednetError;
use crate::io::prefs::Prefs;

pub use compress::{compress_stream, compress_stream_with};
pub use decompress::{decompress_stream, decompress_stream_with};

/// Size of the uncompressed-size header in bytes.
pub const FEDNET_HEADER_SIZE: usize = 4;

/// Largest uncompressed size the header can describe.
pub const FEDNET_MAX_UNCOMPRESSED: u64 = i32::MAX as u64;

// ---------------------------------------------------------------------------
// Direction and results
// ---------------------------------------------------------------------------

/// Which way a transfer runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Compress,
    Decompress,
}

/// Totals of a successful transfer, header bytes included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransferStats {
    pub bytes_in: u64,
    pub bytes_out: u64,
}

/// How the compressor obtains the size header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderMode {
    /// Output is seekable: header space was reserved at `header_pos` and is
    /// written once the input has been consumed.
    Deferred { header_pos: u64 },
    /// Only the input is seekable: its remaining length was measured and the
    /// header written up front.
    Immediate { expected: u64 },
}

// ---------------------------------------------------------------------------
// Header codec
// ---------------------------------------------------------------------------

/// Encodes an uncompressed size, refusing sizes above [`FEDNET_MAX_UNCOMPRESSED`].
pub fn encode_header(len: u64) -> Result<[u8; FEDNET_HEADER_SIZE], FednetError> {
    let len = i32::try_from(len).map_err(|_| FednetError::InputTooLarge(len))?;
    Ok(len.to_le_bytes())
}

/// Decodes a size header; a value with the sign bit set is corrupt.
pub fn decode_header(bytes: [u8; FEDNET_HEADER_SIZE]) -> Result<u64, FednetError> {
    let len = i32::from_le_bytes(bytes);
    u64::try_from(len).map_err(|_| {
        FednetError::CorruptInput(format!("Negative or over-large uncompressed size {}", len))
    })
}

// ---------------------------------------------------------------------------
// Stream helpers
// ---------------------------------------------------------------------------

/// Reports whether `stream` supports seeking, without moving it.
pub fn can_seek<S: Seek + ?Sized>(stream: &mut S) -> bool {
    stream.stream_position().is_ok()
}

/// Returns the number of bytes between the current position and the end of
/// `stream`, leaving the position unchanged.
pub fn measure_remaining<S: Seek + ?Sized>(stream: &mut S) -> io::Result<u64> {
    let start = stream.stream_position()?;
    let end = stream.seek(SeekFrom::End(0))?;
    stream.seek(SeekFrom::Start(start))?;
    Ok(end.saturating_sub(start))
}

/// Reads until `buf` is full or end-of-file, retrying on `Interrupted`.
/// A short count means end-of-file was reached.
pub fn read_fill<R: Read + ?Sized>(src: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match src.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Verbose progress reporter handed to the engine.
pub(crate) struct ProgressReport<'a> {
    prefs: &'a Prefs,
    direction: Direction,
    next_report: u64,
}

impl<'a> ProgressReport<'a> {
    pub(crate) fn new(prefs: &'a Prefs, direction: Direction) -> Self {
        ProgressReport { prefs, direction, next_report: PROGRESS_FREQ }
    }

    /// Prints `Compression ratio ...` for engine-side totals.
    pub(crate) fn show(&self, bytes_in: u64, bytes_out: u64) {
        let header = FEDNET_HEADER_SIZE as u64;
        let (bytes_in, bytes_out, ratio) = match self.direction {
            Direction::Compress => {
                let out = bytes_out + header;
                let ratio = (bytes_in > 0).then(|| out as f64 * 100.0 / bytes_in as f64);
                (bytes_in, out, ratio)
            }
            Direction::Decompress => {
                let inp = bytes_in + header;
                let ratio = (bytes_out > 0).then(|| inp as f64 * 100.0 / bytes_out as f64);
                (inp, bytes_out, ratio)
            }
        };
        if let Some(ratio) = ratio {
            displayout!(
                self.prefs,
                3,
                "Compression ratio {:.2}% ({} bytes in, {} bytes out)\n",
                ratio,
                bytes_in,
                bytes_out
            );
        }
    }
}

impl Progress for ProgressReport<'_> {
    fn update(&mut self, bytes_in: u64, bytes_out: u64) -> bool {
        if self.prefs.verbose() && bytes_in >= self.next_report {
            self.next_report = (bytes_in / PROGRESS_FREQ + 1) * PROGRESS_FREQ;
            self.show(bytes_in, bytes_out);
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Transfer session
// ---------------------------------------------------------------------------

/// Buffers and running totals of one pump invocation.
pub struct Transfer {
    pub direction: Direction,
    in_buf: Vec<u8>,
    out_buf: Vec<u8>,
    in_pos: usize,
    in_len: usize,
    out_len: usize,
    /// Bytes read from the input stream, header included.
    pub in_total: u64,
    /// Bytes written to the output stream, header included.
    pub out_total: u64,
}

impl Transfer {
    pub fn new(direction: Direction, buffer_size: usize) -> Self {
        let cap = buffer_size.max(1);
        Transfer {
            direction,
            in_buf: vec![0u8; cap],
            out_buf: vec![0u8; cap],
            in_pos: 0,
            in_len: 0,
            out_len: 0,
            in_total: 0,
            out_total: 0,
        }
    }

    fn input_exhausted(&self) -> bool {
        self.in_pos == self.in_len
    }

    fn has_unconsumed_input(&self) -> bool {
        self.in_pos < self.in_len
    }

    fn output_full(&self) -> bool {
        self.out_len == self.out_buf.len()
    }

    /// Refills the input buffer; returns `true` on end-of-file.
    fn refill<R: Read + ?Sized>(
        &mut self,
        src: &mut R,
        context: &str,
    ) -> Result<bool, FednetError> {
        let n = read_fill(src, &mut self.in_buf).map_err(|e| FednetError::io(context, e))?;
        self.in_pos = 0;
        self.in_len = n;
        self.in_total += n as u64;
        Ok(n < self.in_buf.len())
    }

    /// Runs one engine step over the unconsumed input and free output space.
    fn step<E: Engine + ?Sized>(&mut self, engine: &mut E, progress: &mut dyn Progress) -> Step {
        let step = engine.step(
            &self.in_buf[self.in_pos..self.in_len],
            &mut self.out_buf[self.out_len..],
            progress,
        );
        self.in_pos += step.consumed;
        self.out_len += step.produced;
        step
    }

    /// Writes and resets the output buffer.
    fn flush_output<W: Write + ?Sized>(&mut self, dst: &mut W) -> Result<(), FednetError> {
        if self.out_len > 0 {
            dst.write_all(&self.out_buf[..self.out_len]).map_err(|e| {
                FednetError::io(format!("Failed to write {} bytes to output", self.out_len), e)
            })?;
            self.out_total += self.out_len as u64;
            self.out_len = 0;
        }
        Ok(())
    }

    pub fn stats(&self) -> TransferStats {
        TransferStats { bytes_in: self.in_total, bytes_out: self.out_total }
    }
}
