//! Core data structures flowing through `molgraph-forge`.
//!
//! - [`atom`] – Atom with element, formal charge and implicit hydrogen count.
//! - [`types`] – Periodic table elements and bond categories.
//! - [`molecule`] – Molecular graph (atoms, undirected bonds, source name).
//! - [`vocab`] – Sorted atom/bond category lookup tables.
//! - [`record`] – Fixed-schema encoded graph records and their labels.
//!
//! Parsed structure ([`Molecule`]) and model-ready output ([`EncodedRecord`])
//! are kept separate; [`crate::encode`] turns one into the other.
//!
//! [`Molecule`]: molecule::Molecule
//! [`EncodedRecord`]: record::EncodedRecord

pub mod atom;
pub mod molecule;
pub mod record;
pub mod types;
pub mod vocab;
