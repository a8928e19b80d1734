use std::collections::HashMap;
use std::str::FromStr;

use super::valence;
use crate::io::error::Error;
use crate::model::atom::Atom;
use crate::model::molecule::{Bond, Molecule};
use crate::model::types::{BondOrder, Element};

/// Lowercase symbols allowed inside brackets, longest first.
const AROMATIC_SYMBOLS: [(&str, Element); 9] = [
    ("se", Element::Se),
    ("as", Element::As),
    ("te", Element::Te),
    ("b", Element::B),
    ("c", Element::C),
    ("n", Element::N),
    ("o", Element::O),
    ("p", Element::P),
    ("s", Element::S),
];

const CHIRAL_CLASSES: [&[u8]; 5] = [b"TH", b"AL", b"SP", b"TB", b"OH"];

/// Parses a SMILES string into a heavy-atom molecular graph.
///
/// Hydrogens that are not written as atoms are recorded in
/// [`Atom::implicit_hydrogens`]; call [`Molecule::add_hydrogens`] to turn them
/// into explicit atoms. The returned molecule is named after `smiles`.
pub fn read(smiles: &str) -> Result<Molecule, Error> {
    Parser::new(smiles).parse()
}

#[derive(Debug)]
struct RingBond {
    atom: usize,
    order: Option<BondOrder>,
    position: usize,
}

struct Parser<'a> {
    text: &'a str,
    input: &'a [u8],
    index: usize,
    atoms: Vec<Atom>,
    bracketed: Vec<bool>,
    bonds: Vec<Bond>,
    branches: Vec<usize>,
    previous: Option<usize>,
    pending: Option<(BondOrder, usize)>,
    rings: HashMap<u32, RingBond>,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            input: text.as_bytes(),
            index: 0,
            atoms: Vec::new(),
            bracketed: Vec::new(),
            bonds: Vec::new(),
            branches: Vec::new(),
            previous: None,
            pending: None,
            rings: HashMap::new(),
        }
    }

    fn error(&self, position: usize, details: impl Into<String>) -> Error {
        Error::smiles(self.text, position, details)
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.index).copied()
    }

    fn parse(mut self) -> Result<Molecule, Error> {
        if self.input.is_empty() {
            return Err(self.error(0, "empty SMILES string"));
        }

        while let Some(c) = self.peek() {
            match c {
                b'(' => self.open_branch()?,
                b')' => self.close_branch()?,
                b'.' => self.disconnect()?,
                b'-' | b'=' | b'#' | b':' | b'/' | b'\\' => self.bond_symbol(c)?,
                b'$' => {
                    return Err(self.error(self.index, "quadruple bonds are not supported"));
                }
                b'0'..=b'9' | b'%' => self.ring_closure()?,
                b'[' => {
                    let start = self.index;
                    let atom = self.bracket_atom()?;
                    self.push_atom(atom, true, start)?;
                }
                _ => {
                    let start = self.index;
                    let atom = self.organic_atom()?;
                    self.push_atom(atom, false, start)?;
                }
            }
        }

        self.check_complete()?;
        Ok(self.into_molecule())
    }

    fn open_branch(&mut self) -> Result<(), Error> {
        let Some(root) = self.previous else {
            return Err(self.error(self.index, "branch opened before any atom"));
        };
        if let Some((_, at)) = self.pending {
            return Err(self.error(at, "bond symbol placed before a branch"));
        }
        self.branches.push(root);
        self.index += 1;
        if self.peek() == Some(b')') {
            return Err(self.error(self.index, "empty branch"));
        }
        Ok(())
    }

    fn close_branch(&mut self) -> Result<(), Error> {
        if let Some((_, at)) = self.pending {
            return Err(self.error(at, "bond symbol at the end of a branch"));
        }
        let root = self
            .branches
            .pop()
            .ok_or_else(|| self.error(self.index, "unmatched ')'"))?;
        self.previous = Some(root);
        self.index += 1;
        Ok(())
    }

    fn disconnect(&mut self) -> Result<(), Error> {
        if let Some((_, at)) = self.pending {
            return Err(self.error(at, "bond symbol placed before '.'"));
        }
        if self.previous.is_none() {
            return Err(self.error(self.index, "'.' must follow an atom"));
        }
        self.previous = None;
        self.index += 1;
        Ok(())
    }

    fn bond_symbol(&mut self, c: u8) -> Result<(), Error> {
        if self.previous.is_none() {
            return Err(self.error(self.index, "bond symbol without a preceding atom"));
        }
        if self.pending.is_some() {
            return Err(self.error(self.index, "consecutive bond symbols"));
        }
        let order = match c {
            b'=' => BondOrder::Double,
            b'#' => BondOrder::Triple,
            b':' => BondOrder::Aromatic,
            _ => BondOrder::Single,
        };
        self.pending = Some((order, self.index));
        self.index += 1;
        Ok(())
    }

    fn ring_closure(&mut self) -> Result<(), Error> {
        let start = self.index;
        let Some(atom) = self.previous else {
            return Err(self.error(start, "ring bond number without a preceding atom"));
        };
        let number = self.ring_number()?;
        let written = self.pending.take();

        let Some(open) = self.rings.remove(&number) else {
            self.rings.insert(
                number,
                RingBond {
                    atom,
                    order: written.map(|(order, _)| order),
                    position: start,
                },
            );
            return Ok(());
        };

        if open.atom == atom {
            return Err(self.error(start, format!("ring bond {number} closes on its own atom")));
        }
        let order = match (open.order, written) {
            (Some(a), Some((b, at))) if a != b => {
                return Err(self.error(
                    at,
                    format!(
                        "ring bond {number} is {} at one end and {} at the other",
                        a.name(),
                        b.name()
                    ),
                ));
            }
            (Some(order), _) | (None, Some((order, _))) => order,
            (None, None) => self.implicit_order(open.atom, atom),
        };
        self.connect(open.atom, atom, order, start)
    }

    fn ring_number(&mut self) -> Result<u32, Error> {
        let input = self.input;
        let start = self.index;
        if input[start] == b'%' {
            let digits = input
                .get(start + 1..start + 3)
                .filter(|d| d.iter().all(u8::is_ascii_digit))
                .ok_or_else(|| self.error(start, "'%' must be followed by two digits"))?;
            self.index += 3;
            Ok(u32::from(digits[0] - b'0') * 10 + u32::from(digits[1] - b'0'))
        } else {
            self.index += 1;
            Ok(u32::from(input[start] - b'0'))
        }
    }

    fn organic_atom(&mut self) -> Result<Atom, Error> {
        let start = self.index;
        let (element, aromatic, len) = match &self.input[start..] {
            [b'C', b'l', ..] => (Element::Cl, false, 2),
            [b'B', b'r', ..] => (Element::Br, false, 2),
            [b'B', ..] => (Element::B, false, 1),
            [b'C', ..] => (Element::C, false, 1),
            [b'N', ..] => (Element::N, false, 1),
            [b'O', ..] => (Element::O, false, 1),
            [b'P', ..] => (Element::P, false, 1),
            [b'S', ..] => (Element::S, false, 1),
            [b'F', ..] => (Element::F, false, 1),
            [b'I', ..] => (Element::I, false, 1),
            [b'b', ..] => (Element::B, true, 1),
            [b'c', ..] => (Element::C, true, 1),
            [b'n', ..] => (Element::N, true, 1),
            [b'o', ..] => (Element::O, true, 1),
            [b'p', ..] => (Element::P, true, 1),
            [b's', ..] => (Element::S, true, 1),
            [b'*', ..] => return Err(self.error(start, "wildcard atoms are not supported")),
            _ => {
                let found = self.text[start..].chars().next().unwrap_or(' ');
                return Err(self.error(start, format!("unexpected character '{found}'")));
            }
        };
        self.index += len;
        Ok(Atom {
            aromatic,
            ..Atom::new(element)
        })
    }

    fn bracket_atom(&mut self) -> Result<Atom, Error> {
        let open = self.index;
        self.index += 1;

        // isotope
        self.read_number();
        let (element, aromatic) = self.bracket_symbol()?;
        self.skip_chirality();

        let hydrogens = if self.peek() == Some(b'H') {
            let at = self.index;
            self.index += 1;
            let count = self.read_number().unwrap_or(1);
            u8::try_from(count)
                .map_err(|_| self.error(at, format!("hydrogen count {count} is out of range")))?
        } else {
            0
        };

        let charge = self.charge()?;

        // atom class
        if self.peek() == Some(b':') {
            self.index += 1;
            self.read_number();
        }

        if self.peek() != Some(b']') {
            return Err(self.error(
                self.index,
                format!("bracket atom opened at position {open} is not closed"),
            ));
        }
        self.index += 1;

        Ok(Atom {
            element,
            charge,
            aromatic,
            implicit_hydrogens: hydrogens,
        })
    }

    fn bracket_symbol(&mut self) -> Result<(Element, bool), Error> {
        let start = self.index;
        let rest = &self.input[start..];

        match rest.first() {
            Some(c) if c.is_ascii_lowercase() => {
                let (symbol, element) = AROMATIC_SYMBOLS
                    .iter()
                    .find(|(symbol, _)| rest.starts_with(symbol.as_bytes()))
                    .ok_or_else(|| self.error(start, "unknown aromatic symbol"))?;
                self.index += symbol.len();
                Ok((*element, true))
            }
            Some(c) if c.is_ascii_uppercase() => {
                let two = rest
                    .get(..2)
                    .filter(|s| s[1].is_ascii_lowercase())
                    .and_then(|s| std::str::from_utf8(s).ok())
                    .and_then(|s| Element::from_str(s).ok());
                if let Some(element) = two {
                    self.index += 2;
                    return Ok((element, false));
                }
                let one = &self.text[start..start + 1];
                let element = Element::from_str(one)
                    .map_err(|_| self.error(start, format!("unknown element '{one}'")))?;
                self.index += 1;
                Ok((element, false))
            }
            _ => Err(self.error(start, "expected an element symbol")),
        }
    }

    fn skip_chirality(&mut self) {
        if self.peek() != Some(b'@') {
            return;
        }
        while self.peek() == Some(b'@') {
            self.index += 1;
        }
        let rest = &self.input[self.index..];
        if CHIRAL_CLASSES.iter().any(|class| rest.starts_with(class)) {
            self.index += 2;
            self.read_number();
        }
    }

    fn charge(&mut self) -> Result<i8, Error> {
        let Some(sign @ (b'+' | b'-')) = self.peek() else {
            return Ok(0);
        };
        let at = self.index;
        self.index += 1;

        let magnitude = match self.read_number() {
            Some(n) => n,
            None => {
                let mut n = 1;
                while self.peek() == Some(sign) {
                    self.index += 1;
                    n += 1;
                }
                n
            }
        };
        let magnitude = i8::try_from(magnitude)
            .map_err(|_| self.error(at, format!("charge {magnitude} is out of range")))?;
        Ok(if sign == b'+' { magnitude } else { -magnitude })
    }

    /// Consumes a run of decimal digits, if any.
    fn read_number(&mut self) -> Option<u32> {
        let start = self.index;
        let mut value: u32 = 0;
        while let Some(d @ b'0'..=b'9') = self.peek() {
            value = value.saturating_mul(10).saturating_add(u32::from(d - b'0'));
            self.index += 1;
        }
        (self.index > start).then_some(value)
    }

    fn push_atom(&mut self, atom: Atom, bracketed: bool, position: usize) -> Result<(), Error> {
        let idx = self.atoms.len();
        self.atoms.push(atom);
        self.bracketed.push(bracketed);

        if let Some(prev) = self.previous {
            let order = match self.pending.take() {
                Some((order, _)) => order,
                None => self.implicit_order(prev, idx),
            };
            self.connect(prev, idx, order, position)?;
        }
        self.previous = Some(idx);
        Ok(())
    }

    fn implicit_order(&self, a: usize, b: usize) -> BondOrder {
        if self.atoms[a].aromatic && self.atoms[b].aromatic {
            BondOrder::Aromatic
        } else {
            BondOrder::Single
        }
    }

    fn connect(&mut self, a: usize, b: usize, order: BondOrder, position: usize) -> Result<(), Error> {
        if self.bonds.iter().any(|bond| bond.connects(a, b)) {
            return Err(self.error(
                position,
                format!("duplicate bond between atoms {a} and {b}"),
            ));
        }
        self.bonds.push(Bond::new(a, b, order));
        Ok(())
    }

    fn check_complete(&self) -> Result<(), Error> {
        if let Some((_, at)) = self.pending {
            return Err(self.error(at, "bond symbol at the end of the input"));
        }
        if !self.branches.is_empty() {
            return Err(self.error(self.input.len(), "unclosed branch"));
        }
        if let Some((number, ring)) = self.rings.iter().min_by_key(|(_, r)| r.position) {
            return Err(self.error(ring.position, format!("ring bond {number} is never closed")));
        }
        Ok(())
    }

    fn into_molecule(self) -> Molecule {
        let mut bond_valence = vec![0u32; self.atoms.len()];
        let mut has_multiple = vec![false; self.atoms.len()];
        for bond in &self.bonds {
            for idx in [bond.i, bond.j] {
                bond_valence[idx] += u32::from(bond.order.valence());
                has_multiple[idx] |= matches!(bond.order, BondOrder::Double | BondOrder::Triple);
            }
        }

        let mut atoms = self.atoms;
        for (idx, atom) in atoms.iter_mut().enumerate() {
            if !self.bracketed[idx] {
                atom.implicit_hydrogens =
                    valence::implicit_hydrogens(atom, bond_valence[idx], has_multiple[idx]);
            }
        }

        Molecule {
            atoms,
            bonds: self.bonds,
            name: Some(self.text.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hydrogens(mol: &Molecule) -> Vec<u8> {
        mol.atoms.iter().map(|a| a.implicit_hydrogens).collect()
    }

    fn error_position(smiles: &str) -> usize {
        match read(smiles).unwrap_err() {
            Error::Smiles { position, .. } => position,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn simple_hydrides_get_implicit_hydrogens() {
        assert_eq!(hydrogens(&read("C").unwrap()), vec![4]);
        assert_eq!(hydrogens(&read("N").unwrap()), vec![3]);
        assert_eq!(hydrogens(&read("O").unwrap()), vec![2]);
    }

    #[test]
    fn methane_expands_to_five_atoms() {
        let mol = read("C").unwrap().with_hydrogens();
        assert_eq!(mol.atom_count(), 5);
        assert_eq!(mol.bond_count(), 4);
        assert_eq!(mol.atoms[0].element, Element::C);
    }

    #[test]
    fn chain_with_triple_bond() {
        let mol = read("CC#N").unwrap();
        assert_eq!(hydrogens(&mol), vec![3, 0, 0]);
        assert_eq!(mol.bonds[1], Bond::new(1, 2, BondOrder::Triple));
        assert_eq!(mol.label(), "CC#N");
    }

    #[test]
    fn branches_return_to_their_root() {
        let mol = read("CC(C)(C)C").unwrap();
        assert_eq!(mol.atom_count(), 5);
        assert_eq!(mol.neighbors(1).count(), 4);
        assert_eq!(hydrogens(&mol), vec![3, 0, 3, 3, 3]);
    }

    #[test]
    fn double_bond_inside_branch() {
        let mol = read("CC(=O)O").unwrap();
        assert!(mol.bonds.contains(&Bond::new(1, 2, BondOrder::Double)));
        assert_eq!(hydrogens(&mol), vec![3, 0, 0, 1]);
    }

    #[test]
    fn ring_closures_bond_first_and_last_atom() {
        let mol = read("C1CC1").unwrap();
        assert_eq!(mol.bond_count(), 3);
        assert!(mol.has_bond(0, 2));
        assert_eq!(hydrogens(&mol), vec![2, 2, 2]);

        let percent = read("C%10CC%10").unwrap();
        assert_eq!(percent.bonds, mol.bonds);
    }

    #[test]
    fn ring_bond_symbol_on_either_end() {
        let opened = read("C=1CCC1").unwrap();
        let closed = read("C1CCC=1").unwrap();
        assert!(opened.bonds.contains(&Bond::new(0, 3, BondOrder::Double)));
        assert!(closed.bonds.contains(&Bond::new(0, 3, BondOrder::Double)));
        assert!(read("C=1CCC=1").is_ok());
    }

    #[test]
    fn benzene_is_aromatic_with_one_hydrogen_each() {
        let mol = read("c1ccccc1").unwrap();
        assert_eq!(mol.atom_count(), 6);
        assert!(mol.atoms.iter().all(|a| a.aromatic));
        assert!(mol.bonds.iter().all(|b| b.order == BondOrder::Aromatic));
        assert_eq!(hydrogens(&mol), vec![1; 6]);
    }

    #[test]
    fn pyridine_nitrogen_has_no_hydrogen() {
        let mol = read("c1ccncc1").unwrap();
        assert_eq!(hydrogens(&mol), vec![1, 1, 1, 0, 1, 1]);
    }

    #[test]
    fn pyrrole_uses_bracket_hydrogen() {
        let mol = read("c1cc[nH]c1").unwrap();
        assert_eq!(hydrogens(&mol), vec![1, 1, 1, 1, 1]);
        assert_eq!(mol.with_hydrogens().atom_count(), 10);
    }

    #[test]
    fn substituted_aromatic_nitrogen_stays_neutral() {
        let mol = read("Cn1cccc1").unwrap();
        assert_eq!(hydrogens(&mol), vec![3, 0, 1, 1, 1, 1]);
    }

    #[test]
    fn exocyclic_double_bond_on_aromatic_carbon() {
        let mol = read("O=c1cc[nH]cc1").unwrap();
        assert_eq!(mol.atoms[1].implicit_hydrogens, 0);
    }

    #[test]
    fn substituent_between_aromatic_atoms_is_single() {
        let mol = read("c1ccccc1-c1ccccc1").unwrap();
        assert!(mol.bonds.contains(&Bond::new(5, 6, BondOrder::Single)));
    }

    #[test]
    fn charged_brackets_use_explicit_counts() {
        let ammonium = read("[NH4+]").unwrap();
        assert_eq!(ammonium.atoms[0].charge, 1);
        assert_eq!(ammonium.atoms[0].implicit_hydrogens, 4);

        let formate = read("[O-]C=O").unwrap();
        assert_eq!(formate.atoms[0].charge, -1);
        assert_eq!(hydrogens(&formate), vec![0, 1, 0]);

        assert_eq!(read("[Fe++]").unwrap().atoms[0].charge, 2);
        assert_eq!(read("[Fe-3]").unwrap().atoms[0].charge, -3);
    }

    #[test]
    fn bracket_decorations_are_skipped() {
        let mol = read("[13C@@H](F)(Cl)Br").unwrap();
        assert_eq!(mol.atoms[0].element, Element::C);
        assert_eq!(mol.atoms[0].implicit_hydrogens, 1);
        assert_eq!(read("[CH3:7]C").unwrap().atoms[0].implicit_hydrogens, 3);
        assert_eq!(read("[se]1cccc1").unwrap().atoms[0].element, Element::Se);
    }

    #[test]
    fn bracket_atom_without_hydrogens_has_none() {
        let mol = read("[C]").unwrap();
        assert_eq!(mol.atoms[0].implicit_hydrogens, 0);
    }

    #[test]
    fn dot_separates_fragments() {
        let mol = read("CC#N.[F]").unwrap();
        assert_eq!(mol.atom_count(), 4);
        assert_eq!(mol.bond_count(), 2);
        assert_eq!(mol.neighbors(3).count(), 0);
    }

    #[test]
    fn directional_bonds_are_single() {
        let mol = read("F/C=C/F").unwrap();
        assert_eq!(mol.bonds[0].order, BondOrder::Single);
        assert_eq!(mol.bonds[1].order, BondOrder::Double);
    }

    #[test]
    fn two_letter_halogens() {
        let mol = read("ClCBr").unwrap();
        let elements: Vec<_> = mol.atoms.iter().map(|a| a.element).collect();
        assert_eq!(elements, vec![Element::Cl, Element::C, Element::Br]);
    }

    #[test]
    fn quadruple_bond_is_rejected() {
        assert_eq!(error_position("C$C"), 1);
    }

    #[test]
    fn conflicting_ring_bonds_are_rejected() {
        let err = read("C=1CCC#1").unwrap_err();
        assert!(err.to_string().contains("double at one end and triple"));
        assert_eq!(error_position("C=1CCC#1"), 6);
    }

    #[test]
    fn duplicate_bond_is_rejected() {
        let err = read("C12CC12").unwrap_err();
        assert!(err.to_string().contains("duplicate bond"));
    }

    #[test]
    fn ring_closing_on_same_atom_is_rejected() {
        assert!(read("C11").is_err());
    }

    #[test]
    fn structural_syntax_errors_report_positions() {
        assert_eq!(error_position(""), 0);
        assert_eq!(error_position("CC)C"), 2);
        assert_eq!(error_position("C(C"), 3);
        assert_eq!(error_position("C1CC"), 1);
        assert_eq!(error_position("CXC"), 1);
        assert_eq!(error_position("C()C"), 2);
        assert_eq!(error_position("=C"), 0);
        assert_eq!(error_position("CC="), 2);
        assert_eq!(error_position("C==C"), 2);
        assert_eq!(error_position("[CH4"), 4);
        assert_eq!(error_position("C[Xx]"), 2);
        assert_eq!(error_position("C.*"), 2);
    }

    #[test]
    fn error_message_carries_input() {
        let err = read("CC)C").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'CC)C'"));
        assert!(message.contains("position 2"));
    }
}
