// io.rs - Stream resolution and file-level orchestration.
//
// The framing pump works on any `Read`/`Write` pair; this layer decides
// which concrete streams a run uses and what happens to them afterwards:
//
//   file_io   - source/destination bindings over files, standard streams
//               and anonymous temporary files.
//   file_type - platform file-type tagging of finished outputs.
//   prefs     - run preferences and display-level macros.
//   session   - single-file and batch processing.

pub mod file_io;
pub mod file_type;
pub mod prefs;
pub mod session;

pub use file_type::{FileTagger, NativeTagger};
pub use prefs::Prefs;
pub use session::{process_batch, process_file, BatchReport, Processor};

pub use crate::pump::{compress_stream, decompress_stream, Direction, TransferStats};
