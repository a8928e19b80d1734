use super::Format;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse {format} data: {details} (at line ~{line})")]
    Parse {
        format: Format,
        line: usize,
        details: String,
    },

    #[error("failed to parse SMILES '{input}' at position {position}: {details}")]
    Smiles {
        input: String,
        position: usize,
        details: String,
    },

    #[error("invalid JSON in {format} data: {source}")]
    Json {
        format: Format,
        #[source]
        source: serde_json::Error,
    },

    #[error("record payload could not be encoded or decoded: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("record {index} is malformed: {details}")]
    MalformedRecord { index: usize, details: String },
}

impl Error {
    pub fn parse(format: Format, line: usize, details: impl Into<String>) -> Self {
        Self::Parse {
            format,
            line,
            details: details.into(),
        }
    }

    pub fn smiles(input: &str, position: usize, details: impl Into<String>) -> Self {
        Self::Smiles {
            input: input.to_string(),
            position,
            details: details.into(),
        }
    }

    pub fn malformed_record(index: usize, details: impl Into<String>) -> Self {
        Self::MalformedRecord {
            index,
            details: details.into(),
        }
    }
}
