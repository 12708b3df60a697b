//! Decoding side of the codec engine.

use super::bits::BitReader;
use super::window::Window;
use super::{window_size, Engine, Progress, Status, Step, END_CODE, LENGTH_BITS, MIN_MATCH};
use crate::error::FednetError;
use crate::io::prefs::check_history_log_2;

/// Output decoded from a token but not yet written.
#[derive(Debug, Clone, Copy)]
enum Pending {
    None,
    Literal(u8),
    Copy { distance: usize, remaining: usize },
}

/// Streaming decompressor.
#[derive(Debug)]
pub struct Decompressor {
    history_log_2: u32,
    history: Window,
    bits: BitReader,
    pending: Pending,
    finished: bool,
    total_in: u64,
    total_out: u64,
}

enum Token {
    Decoded,
    NeedInput,
    Invalid,
}

impl Decompressor {
    /// Creates a decompressor with a `2^history_log_2` byte history.
    pub fn new(history_log_2: u32) -> Result<Self, FednetError> {
        check_history_log_2(history_log_2)?;
        let history =
            Window::with_capacity(window_size(history_log_2)).map_err(|_| FednetError::Allocation)?;
        Ok(Decompressor {
            history_log_2,
            history,
            bits: BitReader::new(),
            pending: Pending::None,
            finished: false,
            total_in: 0,
            total_out: 0,
        })
    }

    /// Feeds input bytes until `needed` bits are buffered.
    fn fill(&mut self, needed: u32, input: &[u8], consumed: &mut usize) -> bool {
        while self.bits.available() < needed {
            let Some(&byte) = input.get(*consumed) else {
                return false;
            };
            self.bits.feed(byte);
            *consumed += 1;
            self.total_in += 1;
        }
        true
    }

    fn decode_token(&mut self, input: &[u8], consumed: &mut usize) -> Token {
        if !self.fill(1, input, consumed) {
            return Token::NeedInput;
        }
        if self.bits.peek(1) == 0 {
            if !self.fill(1 + 8, input, consumed) {
                return Token::NeedInput;
            }
            self.bits.consume(1);
            self.pending = Pending::Literal(self.bits.take(8) as u8);
            return Token::Decoded;
        }

        if !self.fill(1 + self.history_log_2 + LENGTH_BITS, input, consumed) {
            return Token::NeedInput;
        }
        self.bits.consume(1);
        let distance = self.bits.take(self.history_log_2) as usize + 1;
        let code = self.bits.take(LENGTH_BITS);
        if code == END_CODE {
            if distance != 1 {
                return Token::Invalid;
            }
            self.bits.clear();
            self.finished = true;
            return Token::Decoded;
        }
        if distance > self.history.len() {
            return Token::Invalid;
        }
        self.pending = Pending::Copy { distance, remaining: code as usize + MIN_MATCH };
        Token::Decoded
    }

    /// Writes pending output; returns `false` if `output` filled up first.
    fn drain(&mut self, output: &mut [u8], produced: &mut usize) -> bool {
        loop {
            if *produced == output.len() {
                return matches!(self.pending, Pending::None);
            }
            let byte = match &mut self.pending {
                Pending::None => return true,
                Pending::Literal(b) => {
                    let b = *b;
                    self.pending = Pending::None;
                    b
                }
                Pending::Copy { distance, remaining } => {
                    let b = self.history.recall(*distance);
                    *remaining -= 1;
                    if *remaining == 0 {
                        self.pending = Pending::None;
                    }
                    b
                }
            };
            self.history.push(byte);
            output[*produced] = byte;
            *produced += 1;
            self.total_out += 1;
        }
    }
}

impl Engine for Decompressor {
    fn step(&mut self, input: &[u8], output: &mut [u8], progress: &mut dyn Progress) -> Step {
        let mut consumed = 0;
        let mut produced = 0;
        loop {
            if !self.drain(output, &mut produced) {
                return Step::new(Status::BufferOverflow, consumed, produced);
            }
            if self.finished {
                return Step::new(Status::Finished, consumed, produced);
            }
            match self.decode_token(input, &mut consumed) {
                Token::Decoded => {}
                Token::NeedInput => return Step::new(Status::TruncatedInput, consumed, produced),
                Token::Invalid => return Step::new(Status::BadInput, consumed, produced),
            }
            let pending_len = match self.pending {
                Pending::None => 0,
                Pending::Literal(_) => 1,
                Pending::Copy { remaining, .. } => remaining as u64,
            };
            if !progress.update(self.total_in, self.total_out + pending_len) {
                return Step::new(Status::Aborted, consumed, produced);
            }
        }
    }
}
