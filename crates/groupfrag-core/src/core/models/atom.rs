use super::element::Element;

/// A heavy atom of a molecular graph.
///
/// Hydrogens are folded into their parent atom as a count rather than being
/// represented as separate nodes. This mirrors how group-contribution methods
/// define their groups (e.g. `-CH3` is one group centred on one carbon).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Atom {
    /// The chemical element of the atom.
    pub element: Element,
    /// Whether the atom belongs to an aromatic system.
    pub aromatic: bool,
    /// Total attached hydrogens, implicit and explicit combined.
    pub hydrogens: u8,
    /// Formal charge in elementary charge units.
    pub charge: i8,
}

impl Atom {
    /// Creates a neutral, non-aromatic atom with the given hydrogen count.
    pub fn new(element: Element, hydrogens: u8) -> Self {
        Self {
            element,
            aromatic: false,
            hydrogens,
            charge: 0,
        }
    }

    /// Creates a neutral aromatic atom with the given hydrogen count.
    pub fn aromatic(element: Element, hydrogens: u8) -> Self {
        Self {
            aromatic: true,
            ..Self::new(element, hydrogens)
        }
    }

    pub fn with_charge(mut self, charge: i8) -> Self {
        self.charge = charge;
        self
    }
}
