//! Error type for end-to-end dataset builds.
//!
//! Per-molecule failures carry the zero-based entry index so the offending
//! input line can be located; the underlying parse or encode error is kept as
//! the source.

use thiserror::Error;

use crate::{dataset, encode, io};

#[derive(Debug, Error)]
pub enum Error {
    /// Failed to parse a build configuration TOML.
    #[error("failed to parse build configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Reading the dataset or writing an output file failed.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// An entry's SMILES string could not be parsed.
    #[error("entry {index} (line {line}) is not a valid molecule")]
    Parse {
        index: usize,
        line: usize,
        #[source]
        source: io::Error,
    },

    /// A parsed molecule could not be encoded.
    #[error("entry {index} could not be encoded")]
    Encode {
        index: usize,
        #[source]
        source: encode::Error,
    },

    #[error(transparent)]
    Split(#[from] dataset::Error),
}

impl Error {
    /// Zero-based index of the entry that failed, if the error is tied to one.
    pub fn entry_index(&self) -> Option<usize> {
        match self {
            Self::Parse { index, .. } | Self::Encode { index, .. } => Some(*index),
            _ => None,
        }
    }
}
