//! Screenshot file access: pixel dimensions for layout and raw bytes for
//! embedding. Both fail hard; a proof with a missing screenshot is useless.

use std::fs;
use std::path::Path;

use image::{ImageError, ImageReader};

use crate::error::ProofError;

/// Pixel size of the image at `path`, read from its header. The format is
/// sniffed from the file contents; the extension is only a fallback.
pub fn dimensions(path: &Path) -> Result<(u32, u32), ProofError> {
    let read_error = |source: std::io::Error| ProofError::ImageRead {
        path: path.to_path_buf(),
        source,
    };
    let reader = ImageReader::open(path)
        .and_then(ImageReader::with_guessed_format)
        .map_err(read_error)?;
    match reader.into_dimensions() {
        Ok(dims) => Ok(dims),
        Err(ImageError::IoError(source)) => Err(read_error(source)),
        Err(e) => Err(ProofError::ImageDecode {
            path: path.to_path_buf(),
            message: e.to_string(),
        }),
    }
}

pub fn read_bytes(path: &Path) -> Result<Vec<u8>, ProofError> {
    fs::read(path).map_err(|source| ProofError::ImageRead {
        path: path.to_path_buf(),
        source,
    })
}
