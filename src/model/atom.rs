use super::types::Element;

#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub element: Element,
    pub charge: i8,
    pub aromatic: bool,
    /// Hydrogens attached to this atom that are not yet explicit atoms.
    pub implicit_hydrogens: u8,
}

impl Atom {
    pub fn new(element: Element) -> Self {
        Self {
            element,
            charge: 0,
            aromatic: false,
            implicit_hydrogens: 0,
        }
    }

    pub fn with_implicit_hydrogens(mut self, count: u8) -> Self {
        self.implicit_hydrogens = count;
        self
    }
}
