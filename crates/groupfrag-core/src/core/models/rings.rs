use super::molecule::{AtomIndex, Molecule};
use std::collections::{BTreeSet, VecDeque};

/// The smallest set of smallest rings (SSSR) of a molecule.
///
/// Rings are stored as atom cycles, rotated to start at their lowest index, and sorted by
/// size and then lexicographically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RingInfo {
    rings: Vec<Vec<AtomIndex>>,
}

impl RingInfo {
    /// Perceives the SSSR from Horton candidate cycles.
    ///
    /// Candidates are taken shortest first and kept while they are linearly independent
    /// over GF(2) in bond space, until the cyclomatic number is reached.
    pub fn sssr(molecule: &Molecule) -> Self {
        let expected = expected_ring_count(molecule);
        if expected == 0 {
            return Self::default();
        }

        let mut basis = CycleBasis::default();
        let mut rings = Vec::with_capacity(expected);
        for ring in horton_candidates(molecule) {
            if rings.len() == expected {
                break;
            }
            if basis.insert(bond_vector(molecule, &ring)) {
                rings.push(ring);
            }
        }

        rings.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        Self { rings }
    }

    pub fn rings(&self) -> &[Vec<AtomIndex>] {
        &self.rings
    }

    pub fn len(&self) -> usize {
        self.rings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    pub fn count_of_size(&self, size: usize) -> usize {
        self.rings.iter().filter(|ring| ring.len() == size).count()
    }

    /// Number of rings that share an atom with another ring or are bonded to one.
    pub fn linked_ring_count(&self, molecule: &Molecule) -> usize {
        (0..self.rings.len())
            .filter(|&i| {
                let others: BTreeSet<AtomIndex> = self
                    .rings
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .flat_map(|(_, ring)| ring.iter().copied())
                    .collect();
                self.rings[i].iter().any(|&atom| {
                    others.contains(&atom)
                        || molecule
                            .neighbors(atom)
                            .iter()
                            .any(|(neighbor, _)| others.contains(neighbor))
                })
            })
            .count()
    }
}

/// Cyclomatic number: bonds minus atoms plus connected components.
pub fn expected_ring_count(molecule: &Molecule) -> usize {
    let n = molecule.atom_count();
    let mut seen = vec![false; n];
    let mut components = 0;
    for start in 0..n {
        if seen[start] {
            continue;
        }
        components += 1;
        seen[start] = true;
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            for &(next, _) in molecule.neighbors(current) {
                if !seen[next] {
                    seen[next] = true;
                    queue.push_back(next);
                }
            }
        }
    }
    (molecule.bond_count() + components).saturating_sub(n)
}

/// Breadth-first predecessors from `source`; `None` marks the source and unreachable atoms.
fn shortest_path_tree(molecule: &Molecule, source: AtomIndex) -> Vec<Option<AtomIndex>> {
    let n = molecule.atom_count();
    let mut pred = vec![None; n];
    let mut seen = vec![false; n];
    seen[source] = true;
    let mut queue = VecDeque::from([source]);
    while let Some(current) = queue.pop_front() {
        for &(next, _) in molecule.neighbors(current) {
            if !seen[next] {
                seen[next] = true;
                pred[next] = Some(current);
                queue.push_back(next);
            }
        }
    }
    pred
}

/// Path from the tree's source to `target`, or `None` if `target` is unreachable.
fn path_to(pred: &[Option<AtomIndex>], source: AtomIndex, target: AtomIndex) -> Option<Vec<AtomIndex>> {
    let mut path = vec![target];
    let mut current = target;
    while current != source {
        current = pred[current]?;
        path.push(current);
    }
    path.reverse();
    Some(path)
}

fn horton_candidates(molecule: &Molecule) -> Vec<Vec<AtomIndex>> {
    let n = molecule.atom_count();
    let trees: Vec<Vec<Option<AtomIndex>>> =
        (0..n).map(|source| shortest_path_tree(molecule, source)).collect();

    let mut candidates = Vec::new();
    for bond in molecule.bonds().iter().filter(|b| b.in_ring) {
        for (w, tree) in trees.iter().enumerate() {
            let (Some(to_a), Some(to_b)) = (path_to(tree, w, bond.a), path_to(tree, w, bond.b))
            else {
                continue;
            };
            if to_a.len() + to_b.len() - 1 < 3 {
                continue;
            }
            if to_a[1..].iter().any(|atom| to_b[1..].contains(atom)) {
                continue;
            }
            let mut ring = to_a;
            ring.extend(to_b[1..].iter().rev());
            candidates.push(normalize(ring));
        }
    }

    candidates.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    candidates.dedup();
    candidates
}

/// Rotates a cycle to start at its lowest atom and orients it towards the lower neighbour.
fn normalize(mut ring: Vec<AtomIndex>) -> Vec<AtomIndex> {
    if let Some(start) = ring
        .iter()
        .enumerate()
        .min_by_key(|&(_, atom)| atom)
        .map(|(i, _)| i)
    {
        ring.rotate_left(start);
    }
    let len = ring.len();
    if len > 2 && ring[1] > ring[len - 1] {
        ring[1..].reverse();
    }
    ring
}

fn bond_vector(molecule: &Molecule, ring: &[AtomIndex]) -> Vec<u64> {
    let mut bits = vec![0u64; molecule.bond_count().div_ceil(64)];
    for (i, &a) in ring.iter().enumerate() {
        let b = ring[(i + 1) % ring.len()];
        if let Some(&(_, bond)) = molecule.neighbors(a).iter().find(|&&(n, _)| n == b) {
            bits[bond / 64] |= 1 << (bond % 64);
        }
    }
    bits
}

/// Row-reduced GF(2) basis keyed by each row's lowest set bit.
#[derive(Default)]
struct CycleBasis {
    rows: Vec<(usize, Vec<u64>)>,
}

impl CycleBasis {
    /// Adds `vector` if it is independent of the rows so far.
    fn insert(&mut self, mut vector: Vec<u64>) -> bool {
        loop {
            let Some(pivot) = lowest_bit(&vector) else {
                return false;
            };
            match self.rows.iter().find(|(p, _)| *p == pivot) {
                Some((_, row)) => {
                    for (word, other) in vector.iter_mut().zip(row) {
                        *word ^= other;
                    }
                }
                None => {
                    self.rows.push((pivot, vector));
                    return true;
                }
            }
        }
    }
}

fn lowest_bit(bits: &[u64]) -> Option<usize> {
    bits.iter()
        .enumerate()
        .find(|&(_, &word)| word != 0)
        .map(|(i, word)| i * 64 + word.trailing_zeros() as usize)
}
