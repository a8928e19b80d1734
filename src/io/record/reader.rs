use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use super::MAX_PAYLOAD_LEN;
use super::example::Example;
use crate::io::error::Error;
use crate::model::record::LabeledRecord;

/// Iterates over the records of a length-prefixed container.
///
/// Iteration stops after the first error; a clean end of input between two
/// records ends it normally.
pub struct RecordReader<R: Read> {
    inner: R,
    index: usize,
    failed: bool,
}

impl RecordReader<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read> RecordReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            index: 0,
            failed: false,
        }
    }

    /// Reads the next payload, or `None` at a record boundary at end of input.
    pub fn read_example(&mut self) -> Result<Option<Example>, Error> {
        let mut prefix = [0u8; 8];
        let filled = read_fully(&mut self.inner, &mut prefix)?;
        if filled == 0 {
            return Ok(None);
        }
        if filled < prefix.len() {
            return Err(Error::malformed_record(
                self.index,
                format!("length prefix truncated after {filled} bytes"),
            ));
        }

        let len = u64::from_le_bytes(prefix);
        if len > MAX_PAYLOAD_LEN {
            return Err(Error::malformed_record(
                self.index,
                format!("payload length {len} exceeds {MAX_PAYLOAD_LEN}"),
            ));
        }

        let mut payload = vec![0u8; len as usize];
        self.inner.read_exact(&mut payload).map_err(|e| {
            if e.kind() == ErrorKind::UnexpectedEof {
                Error::malformed_record(self.index, format!("payload truncated, expected {len} bytes"))
            } else {
                Error::from(e)
            }
        })?;

        let example = bincode::deserialize(&payload)?;
        self.index += 1;
        Ok(Some(example))
    }

    /// Reads the next payload and rebuilds the labeled record from it.
    pub fn read_record(&mut self) -> Result<Option<LabeledRecord>, Error> {
        let index = self.index;
        match self.read_example()? {
            Some(example) => LabeledRecord::try_from(&example)
                .map(Some)
                .map_err(|e| Error::malformed_record(index, e.to_string())),
            None => Ok(None),
        }
    }

    /// Number of records read so far.
    pub fn position(&self) -> usize {
        self.index
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<LabeledRecord, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let result = self.read_record().transpose();
        if matches!(result, Some(Err(_))) {
            self.failed = true;
        }
        result
    }
}

/// Reads a whole container into memory.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<LabeledRecord>, Error> {
    RecordReader::new(reader).collect()
}

/// Fills as much of `buf` as the source allows, returning the byte count.
fn read_fully<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize, Error> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::record::RecordWriter;
    use crate::model::record::EncodedRecord;
    use std::io::Cursor;

    fn water(gap: f32) -> LabeledRecord {
        LabeledRecord::new(EncodedRecord {
            n_atom: 3,
            n_bond: 4,
            atom: vec![2, 0, 0],
            bond: vec![0; 4],
            connectivity: vec![[0, 1], [0, 2], [1, 0], [2, 0]],
        })
        .with_label("bandgap", gap)
    }

    fn container(records: &[LabeledRecord]) -> Vec<u8> {
        let mut writer = RecordWriter::new(Vec::new());
        writer.write_all(records).unwrap();
        writer.finish().unwrap()
    }

    #[test]
    fn reads_back_what_was_written() {
        let records = vec![water(0.1), water(0.2), water(0.3)];
        let restored = read_records(Cursor::new(container(&records))).unwrap();
        assert_eq!(restored, records);
    }

    #[test]
    fn empty_container_has_no_records() {
        assert!(read_records(Cursor::new(Vec::new())).unwrap().is_empty());
    }

    #[test]
    fn truncated_payload_is_malformed() {
        let mut bytes = container(&[water(0.1), water(0.2)]);
        bytes.truncate(bytes.len() - 3);

        let mut reader = RecordReader::new(Cursor::new(bytes));
        assert!(reader.next().unwrap().is_ok());
        let err = reader.next().unwrap().unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { index: 1, .. }));
        assert!(reader.next().is_none());
    }

    #[test]
    fn truncated_prefix_is_malformed() {
        let mut bytes = container(&[water(0.1)]);
        bytes.extend_from_slice(&[1, 0, 0]);
        let err = read_records(Cursor::new(bytes)).unwrap_err();
        assert!(err.to_string().contains("length prefix truncated after 3 bytes"));
    }

    #[test]
    fn oversized_prefix_is_rejected() {
        let bytes = u64::MAX.to_le_bytes().to_vec();
        let err = read_records(Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { index: 0, .. }));
    }

    #[test]
    fn raw_examples_are_available() {
        let bytes = container(&[water(0.5)]);
        let mut reader = RecordReader::new(Cursor::new(bytes));
        let example = reader.read_example().unwrap().unwrap();
        assert_eq!(example.float_list("bandgap").unwrap(), &[0.5]);
        assert_eq!(reader.position(), 1);
        assert!(reader.read_example().unwrap().is_none());
    }
}
