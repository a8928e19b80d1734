use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::bufread::MultiGzDecoder;

pub mod error;
pub mod jsonl;
pub mod record;
pub mod smiles;
pub mod vocab;

pub use error::Error;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    JsonLines,
    Vocabulary,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::JsonLines => write!(f, "JSON-lines"),
            Format::Vocabulary => write!(f, "vocabulary"),
        }
    }
}

/// Opens a dataset file, decompressing it on the fly when it is gzipped.
pub fn open_dataset(path: impl AsRef<Path>) -> Result<Box<dyn BufRead>, Error> {
    let file = File::open(path)?;
    decompress(BufReader::new(file))
}

/// Wraps `reader` in a gzip decoder if its first bytes are the gzip magic.
///
/// Detection peeks at the buffer without consuming it, so plain input is
/// returned unchanged.
pub fn decompress<R: BufRead + 'static>(mut reader: R) -> Result<Box<dyn BufRead>, Error> {
    let is_gzip = reader.fill_buf()?.starts_with(&GZIP_MAGIC);
    if is_gzip {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(reader))))
    } else {
        Ok(Box::new(reader))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::{Cursor, Read, Write};

    const TEXT: &str = "{\"smiles\": \"C\"}\n{\"smiles\": \"O\"}\n";

    #[test]
    fn plain_input_passes_through() {
        let mut out = String::new();
        decompress(Cursor::new(TEXT.as_bytes().to_vec()))
            .unwrap()
            .read_to_string(&mut out)
            .unwrap();
        assert_eq!(out, TEXT);
    }

    #[test]
    fn gzip_input_is_detected_and_decoded() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(TEXT.as_bytes()).unwrap();
        let compressed = encoder.finish().unwrap();
        assert_eq!(compressed[..2], GZIP_MAGIC);

        let mut out = String::new();
        decompress(Cursor::new(compressed))
            .unwrap()
            .read_to_string(&mut out)
            .unwrap();
        assert_eq!(out, TEXT);
    }

    #[test]
    fn empty_input_is_not_gzip() {
        let reader = decompress(Cursor::new(Vec::new())).unwrap();
        assert_eq!(reader.lines().count(), 0);
    }

    #[test]
    fn format_names_are_human_readable() {
        assert_eq!(Format::JsonLines.to_string(), "JSON-lines");
        assert_eq!(Format::Vocabulary.to_string(), "vocabulary");
    }
}
