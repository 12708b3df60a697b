//! Single-file and batch processing.
//!
//! [`process_file`] binds the streams of one run, hands them to a
//! [`Processor`], then finalizes: temporary copy-back for in-place runs,
//! flushing, type tagging, and removal of a failed output.
//! [`process_batch`] repeats that in place over a list of files.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::displaylevel;
use crate::displayout;
use crate::error::FednetError;
use crate::io::file_io::{
    copy_back, open_dst_file, open_src_file, open_temp_file, same_file, DstStream, SrcStream,
};
use crate::io::file_type::{file_type_for, FileTagger};
use crate::io::prefs::Prefs;
use crate::pump::{compress_stream, decompress_stream, Direction, TransferStats};
use crate::timefn::{clock_span_ns, cpu_now, cpu_span_sec, get_time};

/// Transforms one input stream into one output stream.
pub trait Processor {
    /// `true` when the output is a Fednet container.
    fn produces_container(&self) -> bool;

    fn process(
        &self,
        src: &mut SrcStream,
        dst: &mut DstStream,
        prefs: &Prefs,
    ) -> Result<TransferStats, FednetError>;
}

impl Processor for Direction {
    fn produces_container(&self) -> bool {
        *self == Direction::Compress
    }

    fn process(
        &self,
        src: &mut SrcStream,
        dst: &mut DstStream,
        prefs: &Prefs,
    ) -> Result<TransferStats, FednetError> {
        match self {
            Direction::Compress => compress_stream(src, dst, prefs),
            Direction::Decompress => decompress_stream(src, dst, prefs),
        }
    }
}

// ---------------------------------------------------------------------------
// Single file
// ---------------------------------------------------------------------------

/// Processes one file.
///
/// `None` for `input` reads standard input; `None` for `output` writes
/// standard output. When both name the same file the output is staged in an
/// anonymous temporary file and only copied over the input once processing
/// has succeeded, so a failure leaves the original intact.
///
/// A failure is reported once at display level 1. A failed output file that
/// this call created is then removed, unless `prefs` is verbose.
pub fn process_file(
    input: Option<&Path>,
    output: Option<&Path>,
    processor: &dyn Processor,
    prefs: &Prefs,
    tagger: &dyn FileTagger,
) -> Result<TransferStats, FednetError> {
    let mut created_output = false;
    let result = run(input, output, processor, prefs, tagger, &mut created_output);

    if let Err(err) = &result {
        displaylevel!(prefs, 1, "{}\n", err);
        if let Some(path) = output {
            if created_output && !prefs.verbose() {
                if let Err(e) = fs::remove_file(path) {
                    displaylevel!(
                        prefs,
                        1,
                        "Failed to delete output file '{}': {}\n",
                        path.display(),
                        e
                    );
                }
            }
        }
    }
    result
}

fn run(
    input: Option<&Path>,
    output: Option<&Path>,
    processor: &dyn Processor,
    prefs: &Prefs,
    tagger: &dyn FileTagger,
    created_output: &mut bool,
) -> Result<TransferStats, FednetError> {
    let mut src = open_src_file(input, prefs)?;

    let in_place = match (input, output) {
        (Some(i), Some(o)) => same_file(i, o),
        _ => false,
    };
    let mut dst = if in_place {
        open_temp_file(prefs)?
    } else {
        let dst = open_dst_file(output, prefs)?;
        *created_output = output.is_some();
        dst
    };

    let wall_start = get_time();
    let cpu_start = cpu_now();
    let stats = processor.process(&mut src, &mut dst, prefs)?;
    if prefs.time {
        displayout!(prefs, 1, "Time taken: {:.2} seconds\n", cpu_span_sec(cpu_start));
    }
    displayout!(
        prefs,
        3,
        "Transfer took {:.3} ms wall clock\n",
        clock_span_ns(wall_start) as f64 / 1_000_000.0
    );

    displayout!(prefs, 3, "Closing input file\n");
    drop(src);

    match output {
        Some(path) if in_place => {
            displayout!(prefs, 3, "Copying from temporary to final output\n");
            let mut tmp = dst
                .into_file()
                .map_err(|e| FednetError::io("Failed to write temporary file", e))?;
            let mut real = open_dst_file(Some(path), prefs)?;
            *created_output = true;
            copy_back(&mut tmp, &mut real)?;
            displayout!(prefs, 3, "Closing temporary file\n");
            drop(tmp);
            displayout!(prefs, 3, "Closing output file\n");
            real.into_file().map_err(|e| FednetError::io("Failed to flush output", e))?;
        }
        _ => {
            displayout!(prefs, 3, "Closing output file\n");
            dst.flush().map_err(|e| FednetError::io("Failed to flush output", e))?;
            drop(dst);
        }
    }

    if let Some(path) = output {
        let compressed = processor.produces_container();
        displayout!(
            prefs,
            3,
            "Setting type of output file to &{:03X}\n",
            file_type_for(compressed)
        );
        tagger
            .tag(path, compressed)
            .map_err(|source| FednetError::Tagging { path: path.to_path_buf(), source })?;
    }
    Ok(stats)
}

// ---------------------------------------------------------------------------
// Batch
// ---------------------------------------------------------------------------

/// Per-file outcomes of [`process_batch`], in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<(PathBuf, Result<TransferStats, FednetError>)>,
}

impl BatchReport {
    /// `true` when every file succeeded.
    pub fn succeeded(&self) -> bool {
        self.outcomes.iter().all(|(_, r)| r.is_ok())
    }

    /// Paths of the files that failed.
    pub fn failures(&self) -> impl Iterator<Item = &Path> {
        self.outcomes.iter().filter(|(_, r)| r.is_err()).map(|(p, _)| p.as_path())
    }
}

/// Processes each file in place, sequentially. A failure does not stop the
/// remaining files.
pub fn process_batch<P: AsRef<Path>>(
    files: &[P],
    processor: &dyn Processor,
    prefs: &Prefs,
    tagger: &dyn FileTagger,
) -> BatchReport {
    let mut report = BatchReport::default();
    for file in files {
        let path = file.as_ref();
        let outcome = process_file(Some(path), Some(path), processor, prefs, tagger);
        report.outcomes.push((path.to_path_buf(), outcome));
    }
    report
}
