//! Platform file-type tagging of finished outputs.
//!
//! On hosts with typed files a Fednet container is tagged [`FILE_TYPE_FEDNET`]
//! and plain data [`FILE_TYPE_DATA`]. Elsewhere tagging only confirms that
//! the output still exists.

use std::fs;
use std::io;
use std::path::Path;

/// File type of a Fednet container.
pub const FILE_TYPE_FEDNET: u16 = 0x154;
/// File type of uncompressed data.
pub const FILE_TYPE_DATA: u16 = 0xFFD;

/// Returns the type an output should carry.
pub fn file_type_for(compressed: bool) -> u16 {
    if compressed {
        FILE_TYPE_FEDNET
    } else {
        FILE_TYPE_DATA
    }
}

/// Sets the platform type of a finished output file.
pub trait FileTagger {
    fn tag(&self, path: &Path, compressed: bool) -> io::Result<()>;
}

/// Tagger for the host platform.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeTagger;

impl FileTagger for NativeTagger {
    // Supported hosts have no typed filesystem, so the type from
    // `file_type_for` has nowhere to go.
    fn tag(&self, path: &Path, _compressed: bool) -> io::Result<()> {
        fs::metadata(path).map(|_| ())
    }
}
