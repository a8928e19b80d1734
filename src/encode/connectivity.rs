use super::error::Error;
use crate::model::molecule::Molecule;
use crate::model::vocab::TypeVocabulary;

/// One directed edge: source atom, target atom, bond category index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DirectedEdge {
    pub source: usize,
    pub target: usize,
    pub bond_type: usize,
}

/// Expands every undirected bond into two directed edges and sorts them by
/// (source, target).
pub(crate) fn directed_edges(
    molecule: &Molecule,
    vocab: &TypeVocabulary,
) -> Result<Vec<DirectedEdge>, Error> {
    let n_atom = molecule.atom_count();
    let mut edges = Vec::with_capacity(2 * molecule.bond_count());

    for bond in &molecule.bonds {
        if bond.i == bond.j {
            return Err(Error::invalid_bond(
                molecule.label(),
                bond.i,
                bond.j,
                "bond connects an atom to itself",
            ));
        }
        if bond.i >= n_atom || bond.j >= n_atom {
            return Err(Error::invalid_bond(
                molecule.label(),
                bond.i,
                bond.j,
                format!("atom index out of range for {n_atom} atoms"),
            ));
        }

        let bond_type = vocab
            .bond_index(bond.order)
            .ok_or_else(|| Error::UnknownBondType {
                molecule: molecule.label().to_string(),
                i: bond.i,
                j: bond.j,
                order: bond.order,
            })?;

        edges.push(DirectedEdge {
            source: bond.i,
            target: bond.j,
            bond_type,
        });
        edges.push(DirectedEdge {
            source: bond.j,
            target: bond.i,
            bond_type,
        });
    }

    edges.sort_by_key(|e| (e.source, e.target));
    Ok(edges)
}

/// Every atom up to the last index must appear in at least one edge for the
/// per-atom aggregation downstream; only the upper bound is checked here.
pub(crate) fn check_coverage(
    molecule: &Molecule,
    edges: &[DirectedEdge],
) -> Result<(), Error> {
    let Some(max_index) = edges.iter().map(|e| e.source.max(e.target)).max() else {
        return Ok(());
    };

    let n_atom = molecule.atom_count();
    if max_index + 1 != n_atom {
        return Err(Error::Disconnected {
            molecule: molecule.label().to_string(),
            max_index,
            n_atom,
        });
    }
    Ok(())
}
