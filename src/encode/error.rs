//! Error types for record encoding.
//!
//! Encoding fails only on malformed molecules or on a vocabulary that was
//! built from a different corpus than the one being encoded.

use thiserror::Error;

use crate::model::types::{BondOrder, Element};

/// Errors that can occur while encoding a molecule into a record.
#[derive(Debug, Error)]
pub enum Error {
    /// The molecule has no atoms.
    #[error("molecule '{molecule}' has no atoms")]
    EmptyMolecule {
        /// Molecule identifier.
        molecule: String,
    },

    /// An atom's element is missing from the vocabulary.
    ///
    /// Indicates the vocabulary was not built from a corpus containing this
    /// molecule.
    #[error("atom {atom_index} of molecule '{molecule}' has element {element} which is not in the vocabulary")]
    UnknownAtomType {
        /// Molecule identifier.
        molecule: String,
        /// Index of the offending atom.
        atom_index: usize,
        /// Element that failed the lookup.
        element: Element,
    },

    /// A bond's category is missing from the vocabulary.
    #[error("bond {i}-{j} of molecule '{molecule}' has category {order} which is not in the vocabulary")]
    UnknownBondType {
        /// Molecule identifier.
        molecule: String,
        /// First atom index.
        i: usize,
        /// Second atom index.
        j: usize,
        /// Category that failed the lookup.
        order: BondOrder,
    },

    /// A bond references atoms that cannot form an edge.
    #[error("invalid bond between atoms {i} and {j} in molecule '{molecule}': {detail}")]
    InvalidBond {
        /// Molecule identifier.
        molecule: String,
        /// First atom index.
        i: usize,
        /// Second atom index.
        j: usize,
        /// Description of the problem.
        detail: String,
    },

    /// The highest-indexed atom does not take part in any bond.
    #[error(
        "molecule '{molecule}' is not fully connected: highest bonded atom index is {max_index} but the molecule has {n_atom} atoms"
    )]
    Disconnected {
        /// Molecule identifier.
        molecule: String,
        /// Largest atom index found in the connectivity table.
        max_index: usize,
        /// Number of atoms in the molecule.
        n_atom: usize,
    },
}

impl Error {
    pub fn invalid_bond(
        molecule: impl Into<String>,
        i: usize,
        j: usize,
        details: impl Into<String>,
    ) -> Self {
        Self::InvalidBond {
            molecule: molecule.into(),
            i,
            j,
            detail: details.into(),
        }
    }

    /// Identifier of the molecule that failed to encode.
    pub fn molecule(&self) -> &str {
        match self {
            Self::EmptyMolecule { molecule }
            | Self::UnknownAtomType { molecule, .. }
            | Self::UnknownBondType { molecule, .. }
            | Self::InvalidBond { molecule, .. }
            | Self::Disconnected { molecule, .. } => molecule,
        }
    }
}
