//! Streaming codec engine.
//!
//! The framing pump treats an engine as an opaque state machine: each call
//! to [`Engine::step`] consumes some prefix of an input slice, produces into
//! an output slice, and reports a [`Status`]. An empty input slice passed to
//! a compressor asks it to flush everything and emit the end-of-stream
//! marker.
//!
//! # Bitstream
//!
//! Fields are packed LSB-first (see [`bits`]). With `h` the history log 2:
//!
//! | token   | layout                                          |
//! |---------|-------------------------------------------------|
//! | literal | `0`, 8 bits byte                                |
//! | copy    | `1`, `h` bits `distance - 1`, 8 bits `length - 2` |
//! | end     | `1`, `h` zero bits, `0xFF`                      |
//!
//! followed by zero padding to a byte boundary. Copy lengths run from
//! [`MIN_MATCH`] to [`MAX_MATCH`]; the length code `0xFF` is reserved for
//! the end token, so a stream cut anywhere before its end is detectable.

pub mod bits;
pub mod compress;
pub mod decompress;
pub mod window;

pub use compress::Compressor;
pub use decompress::Decompressor;

/// Shortest back-reference worth encoding.
pub const MIN_MATCH: usize = 2;
/// Longest back-reference one copy token can describe.
pub const MAX_MATCH: usize = 256;

pub(crate) const LENGTH_BITS: u32 = 8;
pub(crate) const END_CODE: u32 = 0xFF;

/// Outcome of one engine step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// All offered input was consumed; more may follow.
    Ok,
    /// The output slice is full and output is still pending.
    BufferOverflow,
    /// The engine needs more input to make progress.
    TruncatedInput,
    /// The input is not a valid bitstream.
    BadInput,
    /// The end-of-stream marker has been fully produced or consumed.
    Finished,
    /// The progress observer asked to stop.
    Aborted,
}

/// Result of [`Engine::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub status: Status,
    /// Bytes of the input slice that were consumed.
    pub consumed: usize,
    /// Bytes written to the front of the output slice.
    pub produced: usize,
}

impl Step {
    pub(crate) fn new(status: Status, consumed: usize, produced: usize) -> Self {
        Step { status, consumed, produced }
    }
}

/// Observer invoked synchronously after every token with cumulative
/// `(bytes_in, bytes_out)` totals. Returning `false` stops the step with
/// [`Status::Aborted`].
pub trait Progress {
    fn update(&mut self, bytes_in: u64, bytes_out: u64) -> bool;
}

impl<F: FnMut(u64, u64) -> bool> Progress for F {
    fn update(&mut self, bytes_in: u64, bytes_out: u64) -> bool {
        self(bytes_in, bytes_out)
    }
}

/// Observer that never reports and never cancels.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Progress for Silent {
    fn update(&mut self, _bytes_in: u64, _bytes_out: u64) -> bool {
        true
    }
}

/// A stateful codec engine. Dropping it releases its history.
pub trait Engine {
    fn step(&mut self, input: &[u8], output: &mut [u8], progress: &mut dyn Progress) -> Step;
}

impl<E: Engine + ?Sized> Engine for Box<E> {
    fn step(&mut self, input: &[u8], output: &mut [u8], progress: &mut dyn Progress) -> Step {
        (**self).step(input, output, progress)
    }
}

/// Size in bytes of a `2^history_log_2` history window.
pub(crate) fn window_size(history_log_2: u32) -> usize {
    1usize << history_log_2
}
