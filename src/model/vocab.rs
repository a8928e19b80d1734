use super::types::{BondOrder, Element};

/// Ordered lookup tables mapping atom and bond categories to dense indices.
///
/// Both tables are kept sorted and deduplicated, so an index assigned to a
/// category depends only on the set of categories, never on the order in
/// which they were observed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeVocabulary {
    atom_types: Vec<Element>,
    bond_types: Vec<BondOrder>,
}

impl TypeVocabulary {
    pub fn new(
        atom_types: impl IntoIterator<Item = Element>,
        bond_types: impl IntoIterator<Item = BondOrder>,
    ) -> Self {
        let mut atom_types: Vec<_> = atom_types.into_iter().collect();
        atom_types.sort_unstable();
        atom_types.dedup();

        let mut bond_types: Vec<_> = bond_types.into_iter().collect();
        bond_types.sort_unstable();
        bond_types.dedup();

        Self {
            atom_types,
            bond_types,
        }
    }

    #[inline]
    pub fn atom_types(&self) -> &[Element] {
        &self.atom_types
    }

    #[inline]
    pub fn bond_types(&self) -> &[BondOrder] {
        &self.bond_types
    }

    pub fn atom_index(&self, element: Element) -> Option<usize> {
        self.atom_types.binary_search(&element).ok()
    }

    pub fn bond_index(&self, order: BondOrder) -> Option<usize> {
        self.bond_types.binary_search(&order).ok()
    }

    pub fn atom_type(&self, index: usize) -> Option<Element> {
        self.atom_types.get(index).copied()
    }

    pub fn bond_type(&self, index: usize) -> Option<BondOrder> {
        self.bond_types.get(index).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.atom_types.is_empty() && self.bond_types.is_empty()
    }
}
