//! Encoding side of the codec engine.
//!
//! Greedy LZSS parse over a linear buffer holding the reachable history
//! followed by the lookahead. Candidate positions are found through hash
//! chains keyed on the next two bytes; the chain ring only spans the last
//! `2^SEARCH_LOG_2_MAX` positions, so very large history windows are legal
//! but only their most recent part is searched.

use std::collections::VecDeque;

use super::bits::BitWriter;
use super::{
    window_size, Engine, Progress, Status, Step, END_CODE, LENGTH_BITS, MAX_MATCH, MIN_MATCH,
};
use crate::error::FednetError;
use crate::io::prefs::check_history_log_2;

const HASH_LOG: u32 = 16;
const SEARCH_LOG_2_MAX: u32 = 16;
const MAX_CHAIN: usize = 64;
/// Input buffered ahead of the encoding position.
const LOOKAHEAD_LIMIT: usize = 4 * MAX_MATCH;
const NIL: u64 = u64::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Encoding,
    Ended,
}

/// Streaming compressor.
#[derive(Debug)]
pub struct Compressor {
    history_log_2: u32,
    max_distance: usize,
    /// History followed by lookahead; `data[0]` is absolute position `base`.
    data: Vec<u8>,
    base: u64,
    /// Absolute position of the next byte to encode.
    pos: u64,
    head: Vec<u64>,
    prev: Vec<u64>,
    bits: BitWriter,
    pending: VecDeque<u8>,
    phase: Phase,
    total_out: u64,
}

#[inline]
fn hash2(a: u8, b: u8) -> usize {
    let key = (u32::from(a) << 8) | u32::from(b);
    (key.wrapping_mul(2_654_435_761) >> (32 - HASH_LOG)) as usize
}

impl Compressor {
    /// Creates a compressor with a `2^history_log_2` byte history.
    pub fn new(history_log_2: u32) -> Result<Self, FednetError> {
        check_history_log_2(history_log_2)?;
        let max_distance = window_size(history_log_2);
        let ring = window_size(history_log_2.min(SEARCH_LOG_2_MAX));

        let mut head = Vec::new();
        head.try_reserve_exact(1 << HASH_LOG).map_err(|_| FednetError::Allocation)?;
        head.resize(1 << HASH_LOG, NIL);
        let mut prev = Vec::new();
        prev.try_reserve_exact(ring).map_err(|_| FednetError::Allocation)?;
        prev.resize(ring, NIL);
        let mut data = Vec::new();
        data.try_reserve(ring.min(max_distance) + LOOKAHEAD_LIMIT)
            .map_err(|_| FednetError::Allocation)?;

        Ok(Compressor {
            history_log_2,
            max_distance: max_distance.min(ring),
            data,
            base: 0,
            pos: 0,
            head,
            prev,
            bits: BitWriter::new(),
            pending: VecDeque::new(),
            phase: Phase::Encoding,
            total_out: 0,
        })
    }

    fn end(&self) -> u64 {
        self.base + self.data.len() as u64
    }

    fn byte_at(&self, abs: u64) -> u8 {
        self.data[(abs - self.base) as usize]
    }

    /// Links `abs` into its hash chain; needs the following byte.
    fn insert(&mut self, abs: u64) {
        if abs + 1 >= self.end() {
            return;
        }
        let h = hash2(self.byte_at(abs), self.byte_at(abs + 1));
        let slot = (abs % self.prev.len() as u64) as usize;
        self.prev[slot] = self.head[h];
        self.head[h] = abs;
    }

    /// Longest match for the bytes at `pos` as `(distance, length)`.
    fn longest_match(&self) -> Option<(usize, usize)> {
        let avail = (self.end() - self.pos) as usize;
        let max_len = avail.min(MAX_MATCH);
        if max_len < MIN_MATCH {
            return None;
        }
        let here = (self.pos - self.base) as usize;
        let mut candidate = self.head[hash2(self.data[here], self.data[here + 1])];
        let mut best: Option<(usize, usize)> = None;
        let mut chain = MAX_CHAIN;

        while candidate != NIL && candidate < self.pos && chain > 0 {
            let distance = (self.pos - candidate) as usize;
            if distance > self.max_distance || candidate < self.base {
                break;
            }
            let there = (candidate - self.base) as usize;
            let len = self.data[there..]
                .iter()
                .zip(&self.data[here..here + max_len])
                .take_while(|(a, b)| a == b)
                .count();
            if len >= MIN_MATCH && best.map_or(true, |(_, l)| len > l) {
                best = Some((distance, len));
                if len == max_len {
                    break;
                }
            }
            let next = self.prev[(candidate % self.prev.len() as u64) as usize];
            if next == NIL || next >= candidate {
                break;
            }
            candidate = next;
            chain -= 1;
        }
        best
    }

    /// A copy token only pays off when it is shorter than the literals it replaces.
    fn worth_copying(&self, len: usize) -> bool {
        1 + self.history_log_2 + LENGTH_BITS < (len as u32) * (1 + 8)
    }

    fn encode_token(&mut self) {
        let (advance, token) = match self.longest_match() {
            Some((distance, len)) if self.worth_copying(len) => (len, Some((distance, len))),
            _ => (1, None),
        };
        match token {
            Some((distance, len)) => {
                self.bits.put(1, 1, &mut self.pending);
                self.bits.put((distance - 1) as u32, self.history_log_2, &mut self.pending);
                self.bits.put((len - MIN_MATCH) as u32, LENGTH_BITS, &mut self.pending);
            }
            None => {
                let byte = self.byte_at(self.pos);
                self.bits.put(0, 1, &mut self.pending);
                self.bits.put(u32::from(byte), 8, &mut self.pending);
            }
        }
        for _ in 0..advance {
            self.insert(self.pos);
            self.pos += 1;
        }
    }

    fn encode_end(&mut self) {
        self.bits.put(1, 1, &mut self.pending);
        self.bits.put(0, self.history_log_2, &mut self.pending);
        self.bits.put(END_CODE, LENGTH_BITS, &mut self.pending);
        self.bits.pad(&mut self.pending);
        self.phase = Phase::Ended;
    }

    /// Drops history that can no longer be referenced.
    fn compact(&mut self) {
        let keep_from = self.pos.saturating_sub(self.max_distance as u64).max(self.base);
        let stale = (keep_from - self.base) as usize;
        if stale > 0 && stale >= self.data.len() / 2 {
            self.data.drain(..stale);
            self.base = keep_from;
        }
    }

    fn drain(&mut self, output: &mut [u8], produced: &mut usize) {
        while *produced < output.len() {
            let Some(byte) = self.pending.pop_front() else {
                break;
            };
            output[*produced] = byte;
            *produced += 1;
            self.total_out += 1;
        }
    }
}

impl Engine for Compressor {
    fn step(&mut self, input: &[u8], output: &mut [u8], progress: &mut dyn Progress) -> Step {
        let flushing = input.is_empty();
        let mut consumed = 0;
        let mut produced = 0;

        if self.phase == Phase::Ended && !flushing {
            return Step::new(Status::BadInput, 0, 0);
        }

        loop {
            self.drain(output, &mut produced);
            if !self.pending.is_empty() {
                return Step::new(Status::BufferOverflow, consumed, produced);
            }
            if self.phase == Phase::Ended {
                return Step::new(Status::Finished, consumed, produced);
            }

            let lookahead = (self.end() - self.pos) as usize;
            if consumed < input.len() && lookahead < LOOKAHEAD_LIMIT {
                let take = (input.len() - consumed).min(LOOKAHEAD_LIMIT - lookahead);
                self.data.extend_from_slice(&input[consumed..consumed + take]);
                consumed += take;
            }

            let lookahead = (self.end() - self.pos) as usize;
            if lookahead >= MAX_MATCH || (flushing && lookahead > 0) {
                self.encode_token();
                self.compact();
                let out = self.total_out + self.pending.len() as u64;
                if !progress.update(self.pos, out) {
                    return Step::new(Status::Aborted, consumed, produced);
                }
            } else if flushing {
                self.encode_end();
            } else {
                return Step::new(Status::Ok, consumed, produced);
            }
        }
    }
}
