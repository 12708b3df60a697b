//! History window for the decompressor.
//!
//! A ring of `capacity` bytes that grows on demand: a large history
//! (up to 2 GiB) only costs memory once that much output has been produced.

use std::collections::TryReserveError;

/// Bytes reserved up front by [`Window::with_capacity`].
const INITIAL_RESERVE: usize = 64 * 1024;

#[derive(Debug)]
pub struct Window {
    buf: Vec<u8>,
    capacity: usize,
    /// Next write position once the ring is full.
    pos: usize,
}

impl Window {
    /// Creates an empty window holding at most `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(capacity.min(INITIAL_RESERVE))?;
        Ok(Window { buf, capacity, pos: 0 })
    }

    /// Number of bytes that can currently be recalled.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn push(&mut self, byte: u8) {
        if self.buf.len() < self.capacity {
            self.buf.push(byte);
        } else {
            self.buf[self.pos] = byte;
            self.pos = (self.pos + 1) % self.capacity;
        }
    }

    /// Returns the byte written `distance` pushes ago, `1 <= distance <= len()`.
    pub fn recall(&self, distance: usize) -> u8 {
        debug_assert!(distance >= 1 && distance <= self.buf.len());
        if self.buf.len() < self.capacity {
            self.buf[self.buf.len() - distance]
        } else {
            self.buf[(self.pos + self.capacity - distance) % self.capacity]
        }
    }
}
