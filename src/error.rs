//! Error taxonomy shared by the codec engine, the framing pump and the
//! stream resolver.
//!
//! Every failure of a single-file run is reported through one
//! [`FednetError`] value; the resolver prints it exactly once and the CLI
//! folds it into the process exit code.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Which size cross-check failed at the end of a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeCheck {
    /// Compression read a different number of bytes than was measured up
    /// front for the immediately written header.
    InputLength,
    /// Decompression produced a different number of bytes than the header
    /// announced.
    OutputLength,
}

/// Errors produced while transferring one Fednet container.
#[derive(Debug)]
pub enum FednetError {
    /// The run cannot proceed with the given configuration: neither stream
    /// is seekable, or the history size is out of range.
    Configuration(String),
    /// An open/read/write/seek/flush operation failed.
    Io { context: String, source: io::Error },
    /// The compressed bitstream or the size header is malformed.
    CorruptInput(String),
    /// The compressed bitstream ended before the end-of-stream marker.
    TruncatedInput,
    /// A size cross-check failed.
    IntegrityMismatch { check: SizeCheck, actual: u64, expected: u64 },
    /// The input is too long to be described by the 4-byte size header.
    InputTooLarge(u64),
    /// The codec engine could not reserve its history window.
    Allocation,
    /// The progress observer asked for the run to stop.
    Cancelled,
    /// Setting the platform file type of the output failed.
    Tagging { path: PathBuf, source: io::Error },
}

impl FednetError {
    /// Wraps an I/O error with a short description of the failed operation.
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        FednetError::Io { context: context.into(), source }
    }
}

impl fmt::Display for FednetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FednetError::Configuration(msg) => f.write_str(msg),
            FednetError::Io { context, source } => write!(f, "{}: {}", context, source),
            FednetError::CorruptInput(msg) => f.write_str(msg),
            FednetError::TruncatedInput => {
                f.write_str("Compressed bitstream appears truncated")
            }
            FednetError::IntegrityMismatch { check: SizeCheck::InputLength, actual, expected } => {
                write!(
                    f,
                    "{} bytes read from input mismatches expected size {}",
                    actual, expected
                )
            }
            FednetError::IntegrityMismatch { check: SizeCheck::OutputLength, actual, expected } => {
                write!(f, "Decompressed {} bytes but expected {}", actual, expected)
            }
            FednetError::InputTooLarge(len) => {
                write!(f, "Input of {} bytes is too large for a Fednet container", len)
            }
            FednetError::Allocation => f.write_str("Not enough memory for history window"),
            FednetError::Cancelled => f.write_str("Operation cancelled"),
            FednetError::Tagging { path, source } => {
                write!(f, "Failed to set type of output file '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for FednetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FednetError::Io { source, .. } | FednetError::Tagging { source, .. } => Some(source),
            _ => None,
        }
    }
}
