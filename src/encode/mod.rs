mod connectivity;
mod error;
mod vocab;

pub use error::Error;
pub use vocab::build_vocabulary;

use tracing::trace;

use crate::model::molecule::Molecule;
use crate::model::record::EncodedRecord;
use crate::model::vocab::TypeVocabulary;

/// Encodes one molecule into a fixed-schema graph record.
///
/// The vocabulary must have been built from a corpus that contains
/// `molecule`; see [`build_vocabulary`].
pub fn encode(molecule: &Molecule, vocab: &TypeVocabulary) -> Result<EncodedRecord, Error> {
    if molecule.atoms.is_empty() {
        return Err(Error::EmptyMolecule {
            molecule: molecule.label().to_string(),
        });
    }

    let atom = molecule
        .atoms
        .iter()
        .enumerate()
        .map(|(atom_index, a)| {
            vocab
                .atom_index(a.element)
                .ok_or_else(|| Error::UnknownAtomType {
                    molecule: molecule.label().to_string(),
                    atom_index,
                    element: a.element,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let edges = connectivity::directed_edges(molecule, vocab)?;
    connectivity::check_coverage(molecule, &edges)?;

    let (connectivity, bond): (Vec<[usize; 2]>, Vec<usize>) = edges
        .iter()
        .map(|e| ([e.source, e.target], e.bond_type))
        .unzip();

    trace!(
        molecule = molecule.label(),
        n_atom = atom.len(),
        n_bond = bond.len(),
        "encoded"
    );

    Ok(EncodedRecord {
        n_atom: atom.len(),
        n_bond: bond.len(),
        atom,
        bond,
        connectivity,
    })
}
