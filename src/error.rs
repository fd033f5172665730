use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProofError {
    #[error("cannot read image '{}': {source}", path.display())]
    ImageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode image '{}': {message}", path.display())]
    ImageDecode { path: PathBuf, message: String },

    #[error("output directory '{}' is not usable: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write '{}': {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid metadata: {0}")]
    Metadata(#[from] serde_json::Error),
}
