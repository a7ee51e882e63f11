use crate::core::catalog::descriptor::{GroupDescriptor, GroupId, HydrogenPolicy};
use crate::core::models::molecule::{AtomIndex, Molecule};
use crate::core::pattern::oracle::AtomTuple;
use crate::engine::context::AssignmentContext;
use std::collections::BTreeSet;
use tracing::trace;

/// Non-overlapping occurrences accepted by one greedy pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GreedyAssignment {
    /// Accepted `(group, tuple)` pairs in acceptance order.
    pub occurrences: Vec<(GroupId, AtomTuple)>,
    pub matched_atoms: BTreeSet<AtomIndex>,
    /// Hydrogens implied by the accepted groups under their hydrogen policies.
    pub implied_hydrogens: u32,
}

/// One greedy pass over the match set, skipping the `suppressed` occurrences.
///
/// Groups are visited by descending priority and their tuples in match-set order. A tuple
/// is accepted unless it is suppressed, shares an atom with an accepted tuple, or covers
/// the whole molecule while disagreeing with its hydrogen total.
pub fn run(
    context: &AssignmentContext,
    suppressed: &[(GroupId, &AtomTuple)],
) -> GreedyAssignment {
    let mut result = GreedyAssignment::default();

    for &position in &context.priority_order {
        let descriptor = &context.catalog.groups()[position];
        let Some(tuples) = context.match_set.get(descriptor.id) else {
            continue;
        };
        for tuple in tuples {
            if suppressed
                .iter()
                .any(|&(group, t)| group == descriptor.id && t == tuple)
            {
                continue;
            }
            if tuple.iter().any(|atom| result.matched_atoms.contains(atom)) {
                continue;
            }
            if covers_molecule_with_wrong_hydrogens(context, descriptor, tuple) {
                trace!(
                    "Skipping whole-molecule match of group {} with {} hydrogen(s).",
                    descriptor.id, descriptor.hydrogens
                );
                continue;
            }
            result.matched_atoms.extend(tuple.iter().copied());
            result.implied_hydrogens += implied_hydrogens(context.molecule, descriptor, tuple);
            result.occurrences.push((descriptor.id, tuple.clone()));
        }
    }

    result
}

fn covers_molecule_with_wrong_hydrogens(
    context: &AssignmentContext,
    descriptor: &GroupDescriptor,
    tuple: &AtomTuple,
) -> bool {
    tuple.len() == context.all_atoms.len()
        && context.total_hydrogens != 0
        && descriptor.hydrogens != context.total_hydrogens
}

fn implied_hydrogens(molecule: &Molecule, descriptor: &GroupDescriptor, tuple: &AtomTuple) -> u32 {
    match descriptor.hydrogen_policy {
        HydrogenPolicy::Fixed => descriptor.hydrogens,
        HydrogenPolicy::FromMatch => tuple
            .iter()
            .filter_map(|&atom| molecule.atom(atom))
            .map(|atom| atom.hydrogens as u32)
            .sum(),
    }
}
