//! SMILES line notation.
//!
//! Only reading is supported. Stereo descriptors, isotopes and atom classes
//! are accepted and discarded since the graph records do not carry them.

pub mod reader;
mod valence;

pub use reader::read;
