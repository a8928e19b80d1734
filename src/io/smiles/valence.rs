use crate::model::atom::Atom;
use crate::model::types::Element;

/// Aromatic atoms that contribute one valence unit to the delocalized π bond.
const PI_CONTRIBUTORS: [Element; 4] = [Element::B, Element::C, Element::N, Element::P];

/// Hydrogens needed to bring an unbracketed atom up to its next normal
/// valence.
///
/// `bond_valence` counts aromatic bonds as one unit. An aromatic `b c n p`
/// reserves one more unit for its π bond unless it already has an explicit
/// double or triple bond, or the extra unit would overflow its lowest normal
/// valence (pyrrole-type nitrogen with three neighbours).
pub(super) fn implicit_hydrogens(atom: &Atom, bond_valence: u32, has_multiple_bond: bool) -> u8 {
    let valences = atom.element.default_valences();
    let Some(&lowest) = valences.first() else {
        return 0;
    };

    let mut used = bond_valence;
    if atom.aromatic
        && !has_multiple_bond
        && PI_CONTRIBUTORS.contains(&atom.element)
        && used < u32::from(lowest)
    {
        used += 1;
    }

    valences
        .iter()
        .map(|&v| u32::from(v))
        .find(|&v| v >= used)
        .map_or(0, |v| (v - used) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aromatic(element: Element) -> Atom {
        Atom {
            aromatic: true,
            ..Atom::new(element)
        }
    }

    #[test]
    fn saturates_to_lowest_valence() {
        assert_eq!(implicit_hydrogens(&Atom::new(Element::C), 0, false), 4);
        assert_eq!(implicit_hydrogens(&Atom::new(Element::O), 1, false), 1);
        assert_eq!(implicit_hydrogens(&Atom::new(Element::F), 1, false), 0);
    }

    #[test]
    fn climbs_to_next_valence_when_exceeded() {
        // nitrogen in a nitro group: 4 units used, next valence is 5
        assert_eq!(implicit_hydrogens(&Atom::new(Element::N), 4, true), 1);
        assert_eq!(implicit_hydrogens(&Atom::new(Element::S), 3, true), 1);
    }

    #[test]
    fn over_valent_atoms_get_no_hydrogens() {
        assert_eq!(implicit_hydrogens(&Atom::new(Element::C), 5, true), 0);
    }

    #[test]
    fn elements_without_default_valence_get_none() {
        assert_eq!(implicit_hydrogens(&Atom::new(Element::Na), 0, false), 0);
    }

    #[test]
    fn aromatic_carbon_reserves_pi_unit() {
        assert_eq!(implicit_hydrogens(&aromatic(Element::C), 2, false), 1);
        assert_eq!(implicit_hydrogens(&aromatic(Element::C), 3, false), 0);
        // two ring bonds plus an exocyclic double bond
        assert_eq!(implicit_hydrogens(&aromatic(Element::C), 4, true), 0);
        assert_eq!(implicit_hydrogens(&aromatic(Element::C), 2, true), 2);
    }

    #[test]
    fn aromatic_nitrogen_with_three_neighbours_keeps_lowest_valence() {
        assert_eq!(implicit_hydrogens(&aromatic(Element::N), 2, false), 0);
        assert_eq!(implicit_hydrogens(&aromatic(Element::N), 3, false), 0);
    }

    #[test]
    fn aromatic_oxygen_does_not_reserve() {
        assert_eq!(implicit_hydrogens(&aromatic(Element::O), 2, false), 0);
    }
}
