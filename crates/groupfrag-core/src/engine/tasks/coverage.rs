use super::greedy_assignment::GreedyAssignment;
use crate::core::models::molecule::AtomIndex;
use crate::engine::context::AssignmentContext;
use crate::engine::match_set::MatchSet;
use std::collections::BTreeSet;

/// Atoms that no tuple of the match set reaches.
pub fn uncovered_atoms(match_set: &MatchSet, all_atoms: &BTreeSet<AtomIndex>) -> Vec<AtomIndex> {
    let covered = match_set.covered_atoms();
    all_atoms.difference(&covered).copied().collect()
}

/// Whether every atom is matched by at least one pattern, before any assignment.
pub fn catalog_covers(context: &AssignmentContext) -> bool {
    uncovered_atoms(context.match_set, &context.all_atoms).is_empty()
}

/// Whether a greedy pass covers every heavy atom and implies the molecule's hydrogens.
pub fn is_complete(context: &AssignmentContext, assignment: &GreedyAssignment) -> bool {
    assignment.matched_atoms == context.all_atoms
        && assignment.implied_hydrogens == context.total_hydrogens
}
