//! JSON form of the type vocabulary.
//!
//! ```json
//! {"atom_types": [1, 6, 7, 8, 9], "bond_types": ["single", "double", "triple", "aromatic"]}
//! ```
//!
//! Atom types are stored as atomic numbers. Order is preserved on reading,
//! so indices assigned by a saved vocabulary stay valid.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use super::{Format, error::Error};
use crate::model::types::{BondOrder, Element};
use crate::model::vocab::TypeVocabulary;

pub const FILE_NAME: &str = "vocab.json";

#[derive(Debug, Serialize, Deserialize)]
struct VocabFile {
    atom_types: Vec<u8>,
    bond_types: Vec<BondOrder>,
}

pub fn write<W: Write>(writer: W, vocab: &TypeVocabulary) -> Result<(), Error> {
    let file = VocabFile {
        atom_types: vocab.atom_types().iter().map(Element::atomic_number).collect(),
        bond_types: vocab.bond_types().to_vec(),
    };
    serde_json::to_writer_pretty(writer, &file).map_err(|source| Error::Json {
        format: Format::Vocabulary,
        source,
    })
}

pub fn read<R: Read>(reader: R) -> Result<TypeVocabulary, Error> {
    let file: VocabFile = serde_json::from_reader(reader).map_err(|source| Error::Json {
        format: Format::Vocabulary,
        source,
    })?;

    let atom_types = file
        .atom_types
        .iter()
        .map(|&z| {
            Element::from_atomic_number(z).ok_or_else(|| {
                Error::parse(Format::Vocabulary, 1, format!("unknown atomic number {z}"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let vocab = TypeVocabulary::new(atom_types.iter().copied(), file.bond_types.iter().copied());
    if vocab.atom_types() != atom_types.as_slice() || vocab.bond_types() != file.bond_types.as_slice() {
        return Err(Error::parse(
            Format::Vocabulary,
            1,
            "atom_types and bond_types must be sorted and free of duplicates",
        ));
    }
    Ok(vocab)
}
