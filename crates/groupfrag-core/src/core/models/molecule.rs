use super::atom::Atom;
use super::element::{Element, HYDROGEN_MASS};
use super::topology::Bond;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use thiserror::Error;

/// Index of a heavy atom within its [`Molecule`].
pub type AtomIndex = usize;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum MoleculeError {
    #[error("Bond {bond} references atom {atom}, but the molecule has only {atom_count} atoms")]
    BondOutOfRange {
        bond: usize,
        atom: AtomIndex,
        atom_count: usize,
    },
    #[error("Bond {bond} connects atom {atom} to itself")]
    SelfBond { bond: usize, atom: AtomIndex },
    #[error("Atoms {a} and {b} are bonded more than once")]
    DuplicateBond { a: AtomIndex, b: AtomIndex },
    #[error("Atom {atom} is an explicit hydrogen; hydrogens must be folded into their parent atom")]
    ExplicitHydrogen { atom: AtomIndex },
}

/// An immutable heavy-atom molecular graph.
///
/// Built through [`MoleculeBuilder`](super::builder::MoleculeBuilder), which validates
/// the bond list and derives ring membership.
#[derive(Debug, Clone, PartialEq)]
pub struct Molecule {
    pub(super) atoms: Vec<Atom>,
    pub(super) bonds: Vec<Bond>,
    pub(super) adjacency: Vec<Vec<(AtomIndex, usize)>>,
}

impl Molecule {
    pub(super) fn from_parts(atoms: Vec<Atom>, bonds: Vec<Bond>) -> Result<Self, MoleculeError> {
        let atom_count = atoms.len();
        if let Some(atom) = atoms.iter().position(|a| a.element == Element::H) {
            return Err(MoleculeError::ExplicitHydrogen { atom });
        }

        let mut adjacency = vec![Vec::new(); atom_count];
        for (i, bond) in bonds.iter().enumerate() {
            for atom in [bond.a, bond.b] {
                if atom >= atom_count {
                    return Err(MoleculeError::BondOutOfRange {
                        bond: i,
                        atom,
                        atom_count,
                    });
                }
            }
            if bond.a == bond.b {
                return Err(MoleculeError::SelfBond { bond: i, atom: bond.a });
            }
            if adjacency[bond.a]
                .iter()
                .any(|&(neighbor, _)| neighbor == bond.b)
            {
                return Err(MoleculeError::DuplicateBond {
                    a: bond.a.min(bond.b),
                    b: bond.a.max(bond.b),
                });
            }
            adjacency[bond.a].push((bond.b, i));
            adjacency[bond.b].push((bond.a, i));
        }

        let mut molecule = Self {
            atoms,
            bonds,
            adjacency,
        };
        molecule.mark_ring_bonds();
        Ok(molecule)
    }

    /// A bond is a ring bond iff its endpoints stay connected once it is removed.
    fn mark_ring_bonds(&mut self) {
        let flags: Vec<bool> = (0..self.bonds.len())
            .map(|i| self.connected_without(self.bonds[i].a, self.bonds[i].b, i))
            .collect();
        for (bond, in_ring) in self.bonds.iter_mut().zip(flags) {
            bond.in_ring = in_ring;
        }
    }

    fn connected_without(&self, from: AtomIndex, to: AtomIndex, skipped_bond: usize) -> bool {
        let mut visited = vec![false; self.atoms.len()];
        let mut queue = VecDeque::from([from]);
        visited[from] = true;
        while let Some(current) = queue.pop_front() {
            for &(next, bond) in &self.adjacency[current] {
                if bond == skipped_bond || visited[next] {
                    continue;
                }
                if next == to {
                    return true;
                }
                visited[next] = true;
                queue.push_back(next);
            }
        }
        false
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn atom(&self, index: AtomIndex) -> Option<&Atom> {
        self.atoms.get(index)
    }

    /// Neighbouring atoms of `index`, each paired with the connecting bond's index.
    pub fn neighbors(&self, index: AtomIndex) -> &[(AtomIndex, usize)] {
        match self.adjacency.get(index) {
            Some(neighbors) => neighbors,
            None => &[],
        }
    }

    pub fn bond_between(&self, a: AtomIndex, b: AtomIndex) -> Option<&Bond> {
        self.neighbors(a)
            .iter()
            .find(|&&(neighbor, _)| neighbor == b)
            .map(|&(_, bond)| &self.bonds[bond])
    }

    /// Number of heavy-atom neighbours (SMARTS `D`).
    pub fn degree(&self, index: AtomIndex) -> usize {
        self.neighbors(index).len()
    }

    /// Total connections including attached hydrogens (SMARTS `X`).
    pub fn connectivity(&self, index: AtomIndex) -> usize {
        self.degree(index) + self.atoms.get(index).map_or(0, |a| a.hydrogens as usize)
    }

    pub fn is_in_ring(&self, index: AtomIndex) -> bool {
        self.neighbors(index)
            .iter()
            .any(|&(_, bond)| self.bonds[bond].in_ring)
    }

    pub fn atom_indices(&self) -> BTreeSet<AtomIndex> {
        (0..self.atoms.len()).collect()
    }

    pub fn total_hydrogens(&self) -> u32 {
        self.atoms.iter().map(|a| a.hydrogens as u32).sum()
    }

    /// Molecular formula as element counts, hydrogens included.
    pub fn element_counts(&self) -> BTreeMap<Element, usize> {
        let mut counts = BTreeMap::new();
        for atom in &self.atoms {
            *counts.entry(atom.element).or_insert(0) += 1;
        }
        let hydrogens = self.total_hydrogens() as usize;
        if hydrogens > 0 {
            counts.insert(Element::H, hydrogens);
        }
        counts
    }

    /// Number of atoms once hydrogens are made explicit.
    pub fn atom_count_with_hydrogens(&self) -> usize {
        self.atoms.len() + self.total_hydrogens() as usize
    }

    /// Exact mass of the molecule built from the most abundant isotopes.
    pub fn monoisotopic_mass(&self) -> f64 {
        self.atoms
            .iter()
            .map(|a| a.element.monoisotopic_mass() + a.hydrogens as f64 * HYDROGEN_MASS)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::builder::MoleculeBuilder;
    use crate::core::models::topology::BondOrder;

    fn acetone() -> Molecule {
        let mut builder = MoleculeBuilder::new();
        let c1 = builder.add_atom(Atom::new(Element::C, 3));
        let c2 = builder.add_atom(Atom::new(Element::C, 0));
        let o = builder.add_atom(Atom::new(Element::O, 0));
        let c3 = builder.add_atom(Atom::new(Element::C, 3));
        builder
            .add_bond(c1, c2, BondOrder::Single)
            .add_bond(c2, o, BondOrder::Double)
            .add_bond(c2, c3, BondOrder::Single);
        builder.build().unwrap()
    }

    fn methylcyclopropane() -> Molecule {
        let mut builder = MoleculeBuilder::new();
        let ring: Vec<_> = [1u8, 2, 2]
            .iter()
            .map(|&h| builder.add_atom(Atom::new(Element::C, h)))
            .collect();
        let methyl = builder.add_atom(Atom::new(Element::C, 3));
        builder
            .add_bond(ring[0], ring[1], BondOrder::Single)
            .add_bond(ring[1], ring[2], BondOrder::Single)
            .add_bond(ring[2], ring[0], BondOrder::Single)
            .add_bond(ring[0], methyl, BondOrder::Single);
        builder.build().unwrap()
    }

    #[test]
    fn degree_and_connectivity_follow_smarts_definitions() {
        let mol = acetone();
        assert_eq!(mol.degree(0), 1);
        assert_eq!(mol.connectivity(0), 4);
        assert_eq!(mol.degree(1), 3);
        assert_eq!(mol.connectivity(1), 3);
        assert_eq!(mol.connectivity(2), 1);
    }

    #[test]
    fn bond_between_finds_bonds_in_either_direction() {
        let mol = acetone();
        assert_eq!(mol.bond_between(1, 2).map(|b| b.order), Some(BondOrder::Double));
        assert_eq!(mol.bond_between(2, 1).map(|b| b.order), Some(BondOrder::Double));
        assert!(mol.bond_between(0, 3).is_none());
    }

    #[test]
    fn acyclic_molecule_has_no_ring_atoms() {
        let mol = acetone();
        assert!(mol.bonds().iter().all(|b| !b.in_ring));
        assert!((0..mol.atom_count()).all(|i| !mol.is_in_ring(i)));
    }

    #[test]
    fn ring_membership_is_derived_from_cycles() {
        let mol = methylcyclopropane();
        assert!(mol.is_in_ring(0));
        assert!(mol.is_in_ring(1));
        assert!(mol.is_in_ring(2));
        assert!(!mol.is_in_ring(3));
        assert!(!mol.bond_between(0, 3).unwrap().in_ring);
    }

    #[test]
    fn hydrogen_totals_and_mass_are_computed_from_atoms() {
        let mol = acetone();
        assert_eq!(mol.total_hydrogens(), 6);
        assert_eq!(mol.atom_count_with_hydrogens(), 10);
        assert!((mol.monoisotopic_mass() - 58.041865).abs() < 1e-5);
    }

    #[test]
    fn element_counts_include_hydrogens() {
        let counts = acetone().element_counts();
        assert_eq!(
            counts,
            BTreeMap::from([(Element::H, 6), (Element::C, 3), (Element::O, 1)])
        );
    }

    #[test]
    fn neighbors_of_out_of_range_atom_is_empty() {
        let mol = acetone();
        assert!(mol.neighbors(42).is_empty());
        assert_eq!(mol.degree(42), 0);
        assert!(mol.atom(42).is_none());
    }
}
