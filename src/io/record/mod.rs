//! Length-prefixed record containers.
//!
//! A container is a plain concatenation of records. Each record is an
//! 8-byte little-endian payload length followed by a bincode-encoded
//! [`Example`]: a map from feature name to a typed value list.

pub mod example;
pub mod reader;
pub mod writer;

pub use example::{Example, Feature, FeatureError};
pub use reader::{RecordReader, read_records};
pub use writer::RecordWriter;

/// Upper bound on a single payload; larger prefixes indicate corruption.
pub const MAX_PAYLOAD_LEN: u64 = 1 << 30;
