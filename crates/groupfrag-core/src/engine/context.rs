use super::config::FragmentationConfig;
use super::match_set::MatchSet;
use super::progress::ProgressReporter;
use crate::core::catalog::registry::Catalog;
use crate::core::models::molecule::{AtomIndex, Molecule};
use std::collections::BTreeSet;

/// Everything the assignment tasks read while fragmenting one molecule.
pub struct AssignmentContext<'a> {
    pub catalog: &'a Catalog,
    pub molecule: &'a Molecule,
    pub match_set: &'a MatchSet,
    pub config: &'a FragmentationConfig,
    pub reporter: &'a ProgressReporter<'a>,
    /// Catalog positions by descending priority, ties in catalog order.
    pub priority_order: Vec<usize>,
    pub all_atoms: BTreeSet<AtomIndex>,
    pub total_hydrogens: u32,
}

impl<'a> AssignmentContext<'a> {
    pub fn new(
        catalog: &'a Catalog,
        molecule: &'a Molecule,
        match_set: &'a MatchSet,
        config: &'a FragmentationConfig,
        reporter: &'a ProgressReporter<'a>,
    ) -> Self {
        Self {
            catalog,
            molecule,
            match_set,
            config,
            reporter,
            priority_order: catalog.priority_order(),
            all_atoms: molecule.atom_indices(),
            total_hydrogens: molecule.total_hydrogens(),
        }
    }
}
