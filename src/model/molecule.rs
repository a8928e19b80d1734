use super::atom::Atom;
use super::types::{BondOrder, Element};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bond {
    pub i: usize,
    pub j: usize,
    pub order: BondOrder,
}

impl Bond {
    pub fn new(idx1: usize, idx2: usize, order: BondOrder) -> Self {
        if idx1 <= idx2 {
            Self { i: idx1, j: idx2, order }
        } else {
            Self { i: idx2, j: idx1, order }
        }
    }

    #[inline]
    pub fn connects(&self, a: usize, b: usize) -> bool {
        (self.i == a && self.j == b) || (self.i == b && self.j == a)
    }
}

/// Molecular graph: atoms in parser order plus undirected bonds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Molecule {
    pub atoms: Vec<Atom>,
    pub bonds: Vec<Bond>,
    /// Source identifier, usually the SMILES string the molecule came from.
    pub name: Option<String>,
}

impl Molecule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    /// Name used to identify the molecule in diagnostics.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }

    pub fn implicit_hydrogen_count(&self) -> usize {
        self.atoms
            .iter()
            .map(|a| usize::from(a.implicit_hydrogens))
            .sum()
    }

    /// Turns every implicit hydrogen into an explicit H atom.
    ///
    /// New atoms are appended after all existing atoms, grouped by parent in
    /// ascending parent index, each joined to its parent by a single bond.
    /// Existing atom indices are left untouched.
    pub fn add_hydrogens(&mut self) {
        let parent_count = self.atoms.len();
        self.atoms.reserve(self.implicit_hydrogen_count());

        for parent in 0..parent_count {
            let count = std::mem::take(&mut self.atoms[parent].implicit_hydrogens);
            for _ in 0..count {
                let h = self.atoms.len();
                self.atoms.push(Atom::new(Element::H));
                self.bonds.push(Bond::new(parent, h, BondOrder::Single));
            }
        }
    }

    /// Copy of the molecule with implicit hydrogens made explicit.
    pub fn with_hydrogens(&self) -> Self {
        let mut out = self.clone();
        out.add_hydrogens();
        out
    }

    pub fn neighbors(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        self.bonds.iter().filter_map(move |b| {
            if b.i == idx {
                Some(b.j)
            } else if b.j == idx {
                Some(b.i)
            } else {
                None
            }
        })
    }

    pub fn has_bond(&self, a: usize, b: usize) -> bool {
        self.bonds.iter().any(|bond| bond.connects(a, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn methane_heavy() -> Molecule {
        Molecule {
            atoms: vec![Atom::new(Element::C).with_implicit_hydrogens(4)],
            bonds: vec![],
            name: Some("C".to_string()),
        }
    }

    #[test]
    fn bond_new_normalizes_index_order() {
        let bond = Bond::new(3, 1, BondOrder::Double);
        assert_eq!((bond.i, bond.j), (1, 3));
        assert!(bond.connects(3, 1));
        assert!(!bond.connects(1, 2));
    }

    #[test]
    fn add_hydrogens_appends_after_heavy_atoms() {
        let mut mol = methane_heavy();
        mol.add_hydrogens();

        assert_eq!(mol.atom_count(), 5);
        assert_eq!(mol.bond_count(), 4);
        assert_eq!(mol.atoms[0].element, Element::C);
        assert!(mol.atoms[1..].iter().all(|a| a.element == Element::H));
        assert_eq!(mol.implicit_hydrogen_count(), 0);
        for (k, bond) in mol.bonds.iter().enumerate() {
            assert_eq!((bond.i, bond.j), (0, k + 1));
            assert_eq!(bond.order, BondOrder::Single);
        }
    }

    #[test]
    fn add_hydrogens_groups_by_parent() {
        // C-O with 3 and 1 implicit hydrogens (methanol heavy skeleton)
        let mut mol = Molecule {
            atoms: vec![
                Atom::new(Element::C).with_implicit_hydrogens(3),
                Atom::new(Element::O).with_implicit_hydrogens(1),
            ],
            bonds: vec![Bond::new(0, 1, BondOrder::Single)],
            name: None,
        };
        mol.add_hydrogens();

        assert_eq!(mol.atom_count(), 6);
        let parents: Vec<usize> = (2..6)
            .map(|h| mol.neighbors(h).next().unwrap())
            .collect();
        assert_eq!(parents, vec![0, 0, 0, 1]);
    }

    #[test]
    fn add_hydrogens_is_noop_when_nothing_implicit() {
        let mut mol = Molecule {
            atoms: vec![Atom::new(Element::Ne)],
            bonds: vec![],
            name: None,
        };
        let before = mol.clone();
        mol.add_hydrogens();
        assert_eq!(mol, before);
    }

    #[test]
    fn with_hydrogens_leaves_original_untouched() {
        let mol = methane_heavy();
        let expanded = mol.with_hydrogens();
        assert_eq!(mol.atom_count(), 1);
        assert_eq!(expanded.atom_count(), 5);
    }

    #[test]
    fn label_falls_back_when_unnamed() {
        assert_eq!(Molecule::new().label(), "<unnamed>");
        assert_eq!(methane_heavy().label(), "C");
    }
}
