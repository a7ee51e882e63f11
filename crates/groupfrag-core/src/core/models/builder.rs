use super::atom::Atom;
use super::molecule::{AtomIndex, Molecule, MoleculeError};
use super::topology::{Bond, BondOrder};

/// Incrementally assembles a [`Molecule`] from atoms and bonds.
///
/// Validation is deferred to [`MoleculeBuilder::build`], so an external parser can feed
/// its output in any order and receive a single error for a malformed graph.
#[derive(Debug, Clone, Default)]
pub struct MoleculeBuilder {
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
}

impl MoleculeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_atom(&mut self, atom: Atom) -> AtomIndex {
        self.atoms.push(atom);
        self.atoms.len() - 1
    }

    pub fn add_bond(&mut self, a: AtomIndex, b: AtomIndex, order: BondOrder) -> &mut Self {
        self.bonds.push(Bond::new(a, b, order));
        self
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn build(self) -> Result<Molecule, MoleculeError> {
        Molecule::from_parts(self.atoms, self.bonds)
    }
}
