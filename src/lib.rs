//! Turns a corpus of SMILES strings into fixed-schema molecular graph records
//! for graph neural network training.
//!
//! Each molecule is parsed, optionally expanded with explicit hydrogens, and
//! encoded against a corpus-wide vocabulary of atom and bond categories as
//! dense index vectors plus a directed, source-sorted connectivity table. The
//! encoded corpus is shuffled into train/validation/test partitions and
//! written as length-prefixed record containers.
//!
//! # Features
//!
//! - **SMILES parsing** — organic subset, bracket atoms, branches, ring
//!   closures and aromaticity, with implicit hydrogens from default valences
//! - **Vocabulary** — deterministic, order-independent atom and bond type
//!   tables built in one pass over the corpus
//! - **Encoding** — per-molecule records with both directions of every bond,
//!   sorted by source atom, validated for contiguous atom coverage
//! - **Splitting** — seeded two-stage shuffle into three disjoint partitions
//! - **Record containers** — self-describing feature maps, one per molecule,
//!   with an 8-byte length prefix
//!
//! # Quick Start
//!
//! ```
//! use molgraph_forge::{Element, build_vocabulary, encode, io};
//!
//! // Methane: one carbon whose four hydrogens become explicit atoms 1..=4
//! let methane = io::smiles::read("C")?.with_hydrogens();
//! let ammonia = io::smiles::read("N")?.with_hydrogens();
//!
//! // The vocabulary must see the whole corpus before encoding
//! let vocab = build_vocabulary([&methane, &ammonia]);
//! assert_eq!(vocab.atom_types(), &[Element::H, Element::C, Element::N]);
//!
//! let record = encode(&methane, &vocab)?;
//! assert_eq!(record.n_atom, 5);
//! assert_eq!(record.n_bond, 8);
//! assert_eq!(record.atom, vec![1, 0, 0, 0, 0]);
//! assert_eq!(record.connectivity[..4], [[0, 1], [0, 2], [0, 3], [0, 4]]);
//! assert_eq!(record.connectivity[4..], [[1, 0], [2, 0], [3, 0], [4, 0]]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! For whole datasets, [`pipeline::prepare`] chains parsing, vocabulary
//! construction, encoding and splitting, and [`pipeline::write_dataset`]
//! writes the partition files:
//!
//! ```no_run
//! use molgraph_forge::{io, pipeline};
//!
//! let config = pipeline::load_config(None)?;
//! let reader = io::open_dataset("qm9.jsonl.gz")?;
//! let entries = io::jsonl::read_entries(reader, &config.input)?;
//! let prepared = pipeline::prepare(&entries, &config)?;
//! pipeline::write_dataset("out", &prepared)?;
//! # Ok::<(), pipeline::Error>(())
//! ```
//!
//! # Module Organization
//!
//! - [`io`] — SMILES reader, JSON-lines dataset reader, record containers,
//!   vocabulary file
//! - [`dataset`] — train/validation/test partitioning
//! - [`pipeline`] — end-to-end build stages and [`BuildConfig`]
//! - [`encode()`] and [`build_vocabulary`] — single-molecule encoding
//!
//! # Data Types
//!
//! - [`Molecule`] — molecular graph with atoms, bonds and a source name
//! - [`Atom`] — element, formal charge, aromatic flag, implicit hydrogens
//! - [`Bond`] — undirected bond with a [`BondOrder`]
//! - [`Element`] — chemical element (H through Og)
//! - [`TypeVocabulary`] — sorted atom and bond category tables
//! - [`EncodedRecord`] — the five-field graph record
//! - [`LabeledRecord`] — a record with scalar property labels attached

mod encode;
mod model;

pub mod dataset;
pub mod io;
pub mod pipeline;

pub use model::atom::Atom;
pub use model::molecule::{Bond, Molecule};
pub use model::record::{EncodedRecord, LabeledRecord};
pub use model::types::{BondOrder, Element, ParseElementError};
pub use model::vocab::TypeVocabulary;

pub use dataset::{PartitionKind, Partitions, SplitConfig};
pub use pipeline::BuildConfig;

pub use encode::{build_vocabulary, encode};

pub use encode::Error as EncodeError;
