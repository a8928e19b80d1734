use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::example::Example;
use crate::io::error::Error;
use crate::model::record::LabeledRecord;

/// Appends length-prefixed records to a byte sink.
///
/// The sink is flushed by [`finish`](Self::finish); dropping the writer
/// without finishing may leave buffered records unwritten.
pub struct RecordWriter<W: Write> {
    inner: W,
    written: usize,
}

impl RecordWriter<BufWriter<File>> {
    /// Creates (or truncates) the container at `path`.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, Error> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> RecordWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    pub fn write_example(&mut self, example: &Example) -> Result<(), Error> {
        let payload = bincode::serialize(example)?;
        self.inner.write_all(&(payload.len() as u64).to_le_bytes())?;
        self.inner.write_all(&payload)?;
        self.written += 1;
        Ok(())
    }

    pub fn write_record(&mut self, record: &LabeledRecord) -> Result<(), Error> {
        self.write_example(&Example::from(record))
    }

    pub fn write_all<'r>(
        &mut self,
        records: impl IntoIterator<Item = &'r LabeledRecord>,
    ) -> Result<(), Error> {
        records
            .into_iter()
            .try_for_each(|record| self.write_record(record))
    }

    /// Number of records written so far.
    pub fn count(&self) -> usize {
        self.written
    }

    pub fn finish(mut self) -> Result<W, Error> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}
