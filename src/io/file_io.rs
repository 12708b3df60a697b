//! Stream bindings for one transfer.
//!
//! - [`open_src_file`] binds the input role to a named file or, with no
//!   path, to standard input.
//! - [`open_dst_file`] binds the output role to a named file (created or
//!   truncated) or, with no path, to standard output.
//! - [`open_temp_file`] binds the output role to an anonymous temporary
//!   file, used when the output path names the input file.
//!
//! Standard streams are reached through duplicated descriptors (handles on
//! Windows). Dropping a binding therefore never closes the process's own
//! standard streams, and a standard stream redirected from or to a regular
//! file keeps its seekability.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::config::COPY_BUFFER_SIZE;
use crate::displaylevel;
use crate::displayout;
use crate::error::FednetError;
use crate::io::prefs::Prefs;
use crate::pump::read_fill;

// ---------------------------------------------------------------------------
// Standard stream duplication
// ---------------------------------------------------------------------------

#[cfg(unix)]
fn duplicate_std<T: std::os::fd::AsFd>(stream: &T) -> io::Result<File> {
    Ok(File::from(stream.as_fd().try_clone_to_owned()?))
}

#[cfg(windows)]
fn duplicate_std<T: std::os::windows::io::AsHandle>(stream: &T) -> io::Result<File> {
    Ok(File::from(stream.as_handle().try_clone_to_owned()?))
}

#[cfg(not(any(unix, windows)))]
fn duplicate_std<T>(_stream: &T) -> io::Result<File> {
    Err(io::Error::new(io::ErrorKind::Unsupported, "standard stream duplication"))
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

enum SrcInner {
    File(BufReader<File>),
    /// Standard input that could not be duplicated; never seekable.
    Stdin(io::Stdin),
}

/// Readable end of a transfer.
pub struct SrcStream {
    inner: SrcInner,
}

impl SrcStream {
    /// Wraps an already opened file.
    pub fn from_file(file: File) -> Self {
        SrcStream { inner: SrcInner::File(BufReader::new(file)) }
    }
}

impl Read for SrcStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &mut self.inner {
            SrcInner::File(f) => f.read(buf),
            SrcInner::Stdin(s) => s.read(buf),
        }
    }
}

impl Seek for SrcStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match &mut self.inner {
            SrcInner::File(f) => f.seek(pos),
            SrcInner::Stdin(_) => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "standard input is not seekable",
            )),
        }
    }
}

/// Opens the input of a transfer; `None` selects standard input.
pub fn open_src_file(path: Option<&Path>, prefs: &Prefs) -> Result<SrcStream, FednetError> {
    let Some(path) = path else {
        displaylevel!(prefs, 2, "Reading from stdin...\n");
        let stdin = io::stdin();
        let inner = match duplicate_std(&stdin) {
            Ok(file) => SrcInner::File(BufReader::new(file)),
            Err(_) => SrcInner::Stdin(stdin),
        };
        return Ok(SrcStream { inner });
    };

    displayout!(prefs, 3, "Opening input file '{}'\n", path.display());
    if path.is_dir() {
        return Err(FednetError::io(
            "Failed to open input file",
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is a directory", path.display()),
            ),
        ));
    }
    let file = File::open(path).map_err(|e| FednetError::io("Failed to open input file", e))?;
    Ok(SrcStream::from_file(file))
}

// ---------------------------------------------------------------------------
// Destination
// ---------------------------------------------------------------------------

enum DstInner {
    File(BufWriter<File>),
    /// Standard output that could not be duplicated; never seekable.
    Stdout(io::Stdout),
}

/// Writable end of a transfer.
pub struct DstStream {
    inner: DstInner,
}

impl DstStream {
    /// Wraps an already opened file.
    pub fn from_file(file: File) -> Self {
        DstStream { inner: DstInner::File(BufWriter::new(file)) }
    }

    /// Flushes buffered data and returns the underlying file.
    pub fn into_file(self) -> io::Result<File> {
        match self.inner {
            DstInner::File(w) => w.into_inner().map_err(|e| e.into_error()),
            DstInner::Stdout(_) => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "standard output has no backing file",
            )),
        }
    }
}

impl Write for DstStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.inner {
            DstInner::File(f) => f.write(buf),
            DstInner::Stdout(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.inner {
            DstInner::File(f) => f.flush(),
            DstInner::Stdout(s) => s.flush(),
        }
    }
}

impl Seek for DstStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match &mut self.inner {
            DstInner::File(f) => f.seek(pos),
            DstInner::Stdout(_) => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "standard output is not seekable",
            )),
        }
    }
}

/// Opens the output of a transfer; `None` selects standard output.
pub fn open_dst_file(path: Option<&Path>, prefs: &Prefs) -> Result<DstStream, FednetError> {
    let Some(path) = path else {
        let stdout = io::stdout();
        let inner = match duplicate_std(&stdout) {
            Ok(file) => DstInner::File(BufWriter::new(file)),
            Err(_) => DstInner::Stdout(stdout),
        };
        return Ok(DstStream { inner });
    };

    displayout!(prefs, 3, "Opening output file '{}'\n", path.display());
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| FednetError::io("Failed to open output file", e))?;
    Ok(DstStream::from_file(file))
}

/// Opens an anonymous temporary file, deleted when its last handle closes.
pub fn open_temp_file(prefs: &Prefs) -> Result<DstStream, FednetError> {
    displayout!(prefs, 3, "Opening temporary output file\n");
    let file =
        tempfile::tempfile().map_err(|e| FednetError::io("Failed to open temporary file", e))?;
    Ok(DstStream::from_file(file))
}

// ---------------------------------------------------------------------------
// Copy-back and path identity
// ---------------------------------------------------------------------------

/// Rewinds `tmp` and copies it byte-for-byte into `dst`; returns the count.
pub fn copy_back<W: Write + ?Sized>(tmp: &mut File, dst: &mut W) -> Result<u64, FednetError> {
    tmp.seek(SeekFrom::Start(0))
        .map_err(|e| FednetError::io("Failed to rewind temporary file", e))?;
    let mut buf = [0u8; COPY_BUFFER_SIZE];
    let mut total = 0u64;
    loop {
        let n = read_fill(tmp, &mut buf)
            .map_err(|e| FednetError::io("Failed to read from temporary file", e))?;
        if n == 0 {
            break;
        }
        dst.write_all(&buf[..n])
            .map_err(|e| FednetError::io(format!("Failed to write {} bytes to output", n), e))?;
        total += n as u64;
        if n < buf.len() {
            break;
        }
    }
    Ok(total)
}

/// `true` when `a` and `b` name the same file: equal as given, or resolving
/// to the same canonical path.
pub fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
