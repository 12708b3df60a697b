//! LSB-first bit packing for the codec bitstream.
//!
//! Fields are packed starting at bit 0 of each byte; a field that spans a
//! byte boundary continues in the low bits of the next byte.

use std::collections::VecDeque;

/// Accumulates bit fields and releases whole bytes into a sink.
#[derive(Debug, Default)]
pub struct BitWriter {
    acc: u64,
    nbits: u32,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the low `count` bits of `value` (at most 32).
    pub fn put(&mut self, value: u32, count: u32, sink: &mut VecDeque<u8>) {
        debug_assert!(count <= 32);
        if count == 0 {
            return;
        }
        let mask = (1u64 << count) - 1;
        self.acc |= (u64::from(value) & mask) << self.nbits;
        self.nbits += count;
        while self.nbits >= 8 {
            sink.push_back(self.acc as u8);
            self.acc >>= 8;
            self.nbits -= 8;
        }
    }

    /// Zero-pads to the next byte boundary.
    pub fn pad(&mut self, sink: &mut VecDeque<u8>) {
        if self.nbits > 0 {
            sink.push_back(self.acc as u8);
            self.acc = 0;
            self.nbits = 0;
        }
    }
}

/// Holds up to 64 bits fed one byte at a time.
#[derive(Debug, Default)]
pub struct BitReader {
    acc: u64,
    nbits: u32,
}

impl BitReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of buffered bits not yet consumed.
    pub fn available(&self) -> u32 {
        self.nbits
    }

    /// Appends one byte above the buffered bits. Callers keep at most 56
    /// bits buffered before feeding.
    pub fn feed(&mut self, byte: u8) {
        debug_assert!(self.nbits <= 56);
        self.acc |= u64::from(byte) << self.nbits;
        self.nbits += 8;
    }

    /// Returns the next `count` bits (at most 32) without consuming them.
    pub fn peek(&self, count: u32) -> u32 {
        debug_assert!(count <= 32 && count <= self.nbits);
        if count == 0 {
            return 0;
        }
        (self.acc & ((1u64 << count) - 1)) as u32
    }

    pub fn consume(&mut self, count: u32) {
        debug_assert!(count <= self.nbits);
        self.acc = if count >= 64 { 0 } else { self.acc >> count };
        self.nbits -= count;
    }

    /// Reads and consumes `count` bits.
    pub fn take(&mut self, count: u32) -> u32 {
        let value = self.peek(count);
        self.consume(count);
        value
    }

    /// Drops every buffered bit; used to skip the padding after the end token.
    pub fn clear(&mut self) {
        self.acc = 0;
        self.nbits = 0;
    }
}
