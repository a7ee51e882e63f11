//! VF2-style subgraph matching of [`QueryPattern`]s against molecules.

use super::PatternError;
use super::oracle::{AtomTuple, PatternOracle};
use super::query::{QueryAtom, QueryBond, QueryPattern};
use crate::core::models::molecule::{AtomIndex, Molecule};
use std::collections::{HashSet, VecDeque};

/// The built-in pattern oracle.
///
/// Matches are unique by atom set; the first mapping found for a given set is kept, with
/// target atoms visited in ascending index order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstructureMatcher;

impl PatternOracle for SubstructureMatcher {
    type Compiled = CompiledPattern;

    fn compile(&self, pattern: &QueryPattern) -> Result<Self::Compiled, PatternError> {
        CompiledPattern::new(pattern)
    }

    fn find_matches(&self, compiled: &Self::Compiled, molecule: &Molecule) -> Vec<AtomTuple> {
        compiled.find_all(molecule)
    }
}

#[derive(Debug, Clone)]
pub struct CompiledPattern {
    atoms: Vec<CompiledAtom>,
    adjacency: Vec<Vec<(usize, QueryBond)>>,
    // Breadth-first from atom 0, so later atoms usually have a mapped neighbour.
    order: Vec<usize>,
}

#[derive(Debug, Clone)]
struct CompiledAtom {
    predicate: QueryAtom,
    require: Vec<CompiledPattern>,
    forbid: Vec<CompiledPattern>,
}

impl CompiledPattern {
    pub fn new(pattern: &QueryPattern) -> Result<Self, PatternError> {
        pattern.validate()?;
        Ok(Self::from_validated(pattern))
    }

    fn from_validated(pattern: &QueryPattern) -> Self {
        let atoms = pattern
            .atoms
            .iter()
            .map(|atom| CompiledAtom {
                predicate: QueryAtom {
                    require: Vec::new(),
                    forbid: Vec::new(),
                    ..atom.clone()
                },
                require: atom.require.iter().map(Self::from_validated).collect(),
                forbid: atom.forbid.iter().map(Self::from_validated).collect(),
            })
            .collect();

        let mut adjacency = vec![Vec::new(); pattern.atoms.len()];
        for bond in &pattern.bonds {
            adjacency[bond.from].push((bond.to, *bond));
            adjacency[bond.to].push((bond.from, *bond));
        }
        let order = search_order(&adjacency);

        Self {
            atoms,
            adjacency,
            order,
        }
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn find_all(&self, molecule: &Molecule) -> Vec<AtomTuple> {
        let mut state = Vf2State::new(self, molecule, false);
        if self.atom_count() <= molecule.atom_count() {
            state.match_recursive(0);
        }
        state.matches
    }

    /// Whether the pattern matches with its atom 0 mapped onto `anchor`.
    pub fn matches_at(&self, molecule: &Molecule, anchor: AtomIndex) -> bool {
        if self.atom_count() > molecule.atom_count() || anchor >= molecule.atom_count() {
            return false;
        }
        let mut state = Vf2State::new(self, molecule, true);
        let root = self.order[0];
        if !state.is_feasible(root, anchor) {
            return false;
        }
        state.assign(root, anchor);
        state.match_recursive(1);
        !state.matches.is_empty()
    }
}

fn search_order(adjacency: &[Vec<(usize, QueryBond)>]) -> Vec<usize> {
    let n = adjacency.len();
    let mut order = Vec::with_capacity(n);
    let mut seen = vec![false; n];
    for root in 0..n {
        if seen[root] {
            continue;
        }
        seen[root] = true;
        let mut queue = VecDeque::from([root]);
        while let Some(current) = queue.pop_front() {
            order.push(current);
            for &(next, _) in &adjacency[current] {
                if !seen[next] {
                    seen[next] = true;
                    queue.push_back(next);
                }
            }
        }
    }
    order
}

fn atom_matches(molecule: &Molecule, index: AtomIndex, query: &CompiledAtom) -> bool {
    let Some(atom) = molecule.atom(index) else {
        return false;
    };
    let p = &query.predicate;

    if p.element.is_some_and(|e| e != atom.element)
        || (!p.any_of.is_empty() && !p.any_of.contains(&atom.element))
        || p.not_elements.contains(&atom.element)
        || p.aromatic.is_some_and(|a| a != atom.aromatic)
        || p.hydrogens.is_some_and(|h| h != atom.hydrogens)
        || p.charge.is_some_and(|c| c != atom.charge)
        || p.connectivity.is_some_and(|x| x as usize != molecule.connectivity(index))
        || p.degree.is_some_and(|d| d as usize != molecule.degree(index))
        || p.in_ring.is_some_and(|r| r != molecule.is_in_ring(index))
    {
        return false;
    }

    query.require.iter().all(|env| env.matches_at(molecule, index))
        && !query.forbid.iter().any(|env| env.matches_at(molecule, index))
}

struct Vf2State<'a> {
    pattern: &'a CompiledPattern,
    molecule: &'a Molecule,
    // core_pattern[p] = Some(t) means pattern atom p is mapped to target atom t
    core_pattern: Vec<Option<AtomIndex>>,
    target_used: Vec<bool>,
    early_exit: bool,
    seen: HashSet<Vec<AtomIndex>>,
    matches: Vec<AtomTuple>,
}

impl<'a> Vf2State<'a> {
    fn new(pattern: &'a CompiledPattern, molecule: &'a Molecule, early_exit: bool) -> Self {
        Self {
            pattern,
            molecule,
            core_pattern: vec![None; pattern.atom_count()],
            target_used: vec![false; molecule.atom_count()],
            early_exit,
            seen: HashSet::new(),
            matches: Vec::new(),
        }
    }

    fn assign(&mut self, pattern_atom: usize, target_atom: AtomIndex) {
        self.core_pattern[pattern_atom] = Some(target_atom);
        self.target_used[target_atom] = true;
    }

    fn unassign(&mut self, pattern_atom: usize, target_atom: AtomIndex) {
        self.core_pattern[pattern_atom] = None;
        self.target_used[target_atom] = false;
    }

    fn done(&self) -> bool {
        self.early_exit && !self.matches.is_empty()
    }

    fn match_recursive(&mut self, depth: usize) {
        if self.done() {
            return;
        }

        if depth == self.pattern.order.len() {
            let tuple: AtomTuple = self.core_pattern.iter().flatten().copied().collect();
            let mut key = tuple.clone();
            key.sort_unstable();
            if self.seen.insert(key) {
                self.matches.push(tuple);
            }
            return;
        }

        let pattern_atom = self.pattern.order[depth];
        for target_atom in self.find_candidates(pattern_atom) {
            if self.target_used[target_atom] || !self.is_feasible(pattern_atom, target_atom) {
                continue;
            }
            self.assign(pattern_atom, target_atom);
            self.match_recursive(depth + 1);
            self.unassign(pattern_atom, target_atom);
            if self.done() {
                return;
            }
        }
    }

    fn find_candidates(&self, pattern_atom: usize) -> Vec<AtomIndex> {
        // Restrict to neighbours of an already-mapped pattern neighbour when one exists.
        let anchor = self.pattern.adjacency[pattern_atom]
            .iter()
            .find_map(|&(neighbor, _)| self.core_pattern[neighbor]);

        match anchor {
            Some(mapped) => self
                .molecule
                .neighbors(mapped)
                .iter()
                .map(|&(n, _)| n)
                .filter(|&n| !self.target_used[n])
                .collect(),
            None => (0..self.molecule.atom_count())
                .filter(|&i| !self.target_used[i])
                .collect(),
        }
    }

    fn is_feasible(&self, pattern_atom: usize, target_atom: AtomIndex) -> bool {
        for &(p_neighbor, query_bond) in &self.pattern.adjacency[pattern_atom] {
            if let Some(t_mapped) = self.core_pattern[p_neighbor] {
                let Some(bond) = self.molecule.bond_between(target_atom, t_mapped) else {
                    return false;
                };
                if !query_bond.order.accepts(bond.order)
                    || query_bond.in_ring.is_some_and(|r| r != bond.in_ring)
                {
                    return false;
                }
            }
        }
        atom_matches(
            self.molecule,
            target_atom,
            &self.pattern.atoms[pattern_atom],
        )
    }
}
