use crate::core::catalog::descriptor::GroupId;
use crate::core::models::molecule::AtomIndex;
use crate::core::pattern::oracle::AtomTuple;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Outcome classification of one fragmentation.
///
/// Every variant other than [`FragmentationStatus::Ok`] is a normal result, not a fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentationStatus {
    Ok,
    /// The molecule could not be built from its source.
    ConstructionFailed,
    /// Some atom is matched by no pattern of the catalog.
    IncompleteCatalogCoverage,
    /// No suppression set within the configured bound produced a full cover.
    UnresolvedOverlap,
    /// Deduplication left atoms without any group.
    PartialCoverage { matched: usize, total: usize },
    /// Atoms still claimed by more than one group after deduplication.
    DuplicateAtomsUnresolved { atoms: Vec<AtomIndex> },
}

impl FragmentationStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl fmt::Display for FragmentationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::ConstructionFailed => write!(f, "Failed to construct mol"),
            Self::IncompleteCatalogCoverage => write!(f, "Did not match all atoms present"),
            Self::UnresolvedOverlap => write!(f, "Could not resolve overlapping matches"),
            Self::PartialCoverage { matched, total } => {
                write!(f, "Matched {matched} of {total} atoms only")
            }
            Self::DuplicateAtomsUnresolved { atoms } => {
                write!(f, "Matched some atoms repeatedly: {atoms:?}")
            }
        }
    }
}

/// Bookkeeping of the suppression search behind a priority-mode result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSummary {
    /// Suppression sets evaluated, counting the accepted one.
    pub trials: usize,
    /// The accepted suppression set, empty when none was needed or none worked.
    pub suppressed: Vec<(GroupId, AtomTuple)>,
}

/// A priority-mode fragmentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub group_counts: BTreeMap<GroupId, usize>,
    pub group_occurrences: BTreeMap<GroupId, Vec<AtomTuple>>,
    pub matched_atoms: BTreeSet<AtomIndex>,
    pub status: FragmentationStatus,
    pub search: SearchSummary,
}

impl Assignment {
    pub(crate) fn from_occurrences(
        occurrences: impl IntoIterator<Item = (GroupId, AtomTuple)>,
        status: FragmentationStatus,
        search: SearchSummary,
    ) -> Self {
        let mut group_occurrences: BTreeMap<GroupId, Vec<AtomTuple>> = BTreeMap::new();
        for (group, tuple) in occurrences {
            group_occurrences.entry(group).or_default().push(tuple);
        }
        let group_counts = group_occurrences
            .iter()
            .map(|(g, tuples)| (*g, tuples.len()))
            .collect();
        let matched_atoms = group_occurrences
            .values()
            .flatten()
            .flat_map(|tuple| tuple.iter().copied())
            .collect();
        Self {
            group_counts,
            group_occurrences,
            matched_atoms,
            status,
            search,
        }
    }

    /// An assignment with no groups at all.
    pub fn empty(status: FragmentationStatus) -> Self {
        Self::from_occurrences(std::iter::empty(), status, SearchSummary::default())
    }

    pub fn is_success(&self) -> bool {
        self.status.is_ok()
    }

    pub fn total_groups(&self) -> usize {
        self.group_counts.values().sum()
    }
}

/// A strict-cover fragmentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrictFragmentation {
    /// Counts after deduplication.
    pub group_counts: BTreeMap<GroupId, usize>,
    pub group_occurrences: BTreeMap<GroupId, Vec<AtomTuple>>,
    pub status: FragmentationStatus,
    pub iterations: usize,
}

impl StrictFragmentation {
    pub fn empty(status: FragmentationStatus) -> Self {
        Self {
            group_counts: BTreeMap::new(),
            group_occurrences: BTreeMap::new(),
            status,
            iterations: 0,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_ok()
    }
}
