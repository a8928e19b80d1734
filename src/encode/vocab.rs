use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::model::molecule::Molecule;
use crate::model::vocab::TypeVocabulary;

/// Collects every element and bond category present in the corpus.
///
/// Must see the whole corpus before any molecule is encoded: record indices
/// are positions in these tables.
pub fn build_vocabulary<'a, I>(molecules: I) -> TypeVocabulary
where
    I: IntoIterator<Item = &'a Molecule>,
{
    let mut elements = BTreeSet::new();
    let mut orders = BTreeSet::new();
    let mut seen = 0usize;

    for molecule in molecules {
        seen += 1;
        elements.extend(molecule.atoms.iter().map(|a| a.element));
        orders.extend(molecule.bonds.iter().map(|b| b.order));
    }

    if seen == 0 {
        warn!("building vocabulary from an empty corpus");
    }
    debug!(
        molecules = seen,
        atom_types = elements.len(),
        bond_types = orders.len(),
        "vocabulary collected"
    );

    TypeVocabulary::new(elements, orders)
}
