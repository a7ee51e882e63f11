use crate::core::catalog::descriptor::GroupId;
use crate::core::models::molecule::AtomIndex;
use crate::core::pattern::oracle::AtomTuple;
use std::collections::{BTreeMap, BTreeSet};

/// Every candidate occurrence found in one molecule, grouped by catalog entry.
///
/// Entries keep catalog order and tuples keep the order the oracle returned them in.
/// Tuples may overlap freely, both across groups and within one group.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchSet {
    entries: Vec<(GroupId, Vec<AtomTuple>)>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a match set from externally computed candidates.
    ///
    /// Identical tuples of one group are collapsed, empty entries dropped, and repeated
    /// group ids merged into their first entry.
    pub fn from_entries(entries: impl IntoIterator<Item = (GroupId, Vec<AtomTuple>)>) -> Self {
        let mut set = Self::new();
        for (group, tuples) in entries {
            set.extend(group, tuples);
        }
        set
    }

    pub(crate) fn extend(&mut self, group: GroupId, tuples: impl IntoIterator<Item = AtomTuple>) {
        let position = match self.entries.iter().position(|(g, _)| *g == group) {
            Some(position) => position,
            None => {
                self.entries.push((group, Vec::new()));
                self.entries.len() - 1
            }
        };
        let existing = &mut self.entries[position].1;
        for tuple in tuples {
            if !existing.contains(&tuple) {
                existing.push(tuple);
            }
        }
        if existing.is_empty() {
            self.entries.remove(position);
        }
    }

    pub fn get(&self, group: GroupId) -> Option<&[AtomTuple]> {
        self.entries
            .iter()
            .find(|(g, _)| *g == group)
            .map(|(_, tuples)| tuples.as_slice())
    }

    pub fn groups(&self) -> impl Iterator<Item = GroupId> + '_ {
        self.entries.iter().map(|(g, _)| *g)
    }

    pub fn entries(&self) -> &[(GroupId, Vec<AtomTuple>)] {
        &self.entries
    }

    /// Every `(group, tuple)` pair in match-set order.
    pub fn occurrences(&self) -> impl Iterator<Item = (GroupId, &AtomTuple)> + '_ {
        self.entries
            .iter()
            .flat_map(|(g, tuples)| tuples.iter().map(move |t| (*g, t)))
    }

    pub fn occurrence_count(&self) -> usize {
        self.entries.iter().map(|(_, tuples)| tuples.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Atoms claimed by at least one tuple.
    pub fn covered_atoms(&self) -> BTreeSet<AtomIndex> {
        self.occurrences()
            .flat_map(|(_, tuple)| tuple.iter().copied())
            .collect()
    }

    /// How many tuples claim each atom.
    pub fn claim_counts(&self) -> BTreeMap<AtomIndex, usize> {
        let mut claims = BTreeMap::new();
        for (_, tuple) in self.occurrences() {
            for &atom in tuple {
                *claims.entry(atom).or_insert(0) += 1;
            }
        }
        claims
    }

    /// Per-group occurrence counts.
    pub fn counts(&self) -> BTreeMap<GroupId, usize> {
        self.entries
            .iter()
            .map(|(g, tuples)| (*g, tuples.len()))
            .collect()
    }

    pub(crate) fn retain(&mut self, mut keep: impl FnMut(GroupId, &AtomTuple) -> bool) {
        for (group, tuples) in &mut self.entries {
            let group = *group;
            tuples.retain(|t| keep(group, t));
        }
        self.entries.retain(|(_, tuples)| !tuples.is_empty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MatchSet {
        MatchSet::from_entries([
            (GroupId(1), vec![vec![0], vec![3]]),
            (GroupId(24), vec![vec![1, 2]]),
            (GroupId(2), vec![vec![1]]),
        ])
    }

    #[test]
    fn from_entries_deduplicates_and_drops_empty_groups() {
        let set = MatchSet::from_entries([
            (GroupId(5), vec![vec![0, 1], vec![0, 1], vec![2]]),
            (GroupId(6), vec![]),
            (GroupId(5), vec![vec![2], vec![3]]),
        ]);
        assert_eq!(set.entries(), &[(GroupId(5), vec![vec![0, 1], vec![2], vec![3]])]);
        assert!(set.get(GroupId(6)).is_none());
    }

    #[test]
    fn occurrences_follow_entry_then_tuple_order() {
        let set = sample();
        let occurrences: Vec<_> = set.occurrences().map(|(g, t)| (g.0, t.clone())).collect();
        assert_eq!(
            occurrences,
            vec![(1, vec![0]), (1, vec![3]), (24, vec![1, 2]), (2, vec![1])]
        );
        assert_eq!(set.occurrence_count(), 4);
    }

    #[test]
    fn coverage_and_claims_count_overlaps() {
        let set = sample();
        assert_eq!(set.covered_atoms(), BTreeSet::from([0, 1, 2, 3]));
        let claims = set.claim_counts();
        assert_eq!(claims[&1], 2);
        assert_eq!(claims[&0], 1);
    }

    #[test]
    fn retain_removes_tuples_and_emptied_groups() {
        let mut set = sample();
        set.retain(|g, _| g != GroupId(2));
        assert_eq!(set.groups().collect::<Vec<_>>(), vec![GroupId(1), GroupId(24)]);
        assert_eq!(set.counts(), BTreeMap::from([(GroupId(1), 2), (GroupId(24), 1)]));
    }
}
