//! Line-delimited JSON datasets: one object per molecule.

pub mod reader;

pub use reader::{DatasetEntry, EntryFields, EntryReader, read_entries};
