use crate::core::models::molecule::AtomIndex;
use crate::engine::match_set::MatchSet;
use tracing::{debug, instrument, trace};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeduplicationOutcome {
    /// Passes run, including the final pass that found nothing left to do.
    pub iterations: usize,
    /// Atoms still claimed by more than one tuple.
    pub contested: Vec<AtomIndex>,
}

/// Prunes overlapping tuples in place until no atom is claimed twice.
///
/// Each pass looks at the contested atoms in ascending order and resolves the first one
/// whose largest competing tuple is unique by discarding every smaller competitor. The
/// loop ends when nothing is contested, when every contested atom is tied, or after
/// `max_iterations` passes.
#[instrument(skip_all, name = "deduplication_task")]
pub fn run(match_set: &mut MatchSet, max_iterations: usize) -> DeduplicationOutcome {
    let mut iterations = 0;

    while iterations < max_iterations {
        iterations += 1;
        let contested = contested_atoms(match_set);
        if contested.is_empty() {
            break;
        }

        let Some((atom, largest)) = contested
            .iter()
            .find_map(|&atom| unique_largest_claim(match_set, atom).map(|size| (atom, size)))
        else {
            debug!(
                "All {} contested atom(s) are tied; stopping.",
                contested.len()
            );
            break;
        };

        trace!(atom, largest, "Discarding smaller claims on contested atom.");
        match_set.retain(|_, tuple| !(tuple.contains(&atom) && tuple.len() < largest));
    }

    let contested = contested_atoms(match_set);
    debug!(
        iterations,
        contested = contested.len(),
        "Deduplication finished."
    );
    DeduplicationOutcome {
        iterations,
        contested,
    }
}

fn contested_atoms(match_set: &MatchSet) -> Vec<AtomIndex> {
    match_set
        .claim_counts()
        .into_iter()
        .filter(|&(_, claims)| claims > 1)
        .map(|(atom, _)| atom)
        .collect()
}

/// Size of the largest tuple claiming `atom`, if no other claimant has that size.
fn unique_largest_claim(match_set: &MatchSet, atom: AtomIndex) -> Option<usize> {
    let sizes: Vec<usize> = match_set
        .occurrences()
        .filter(|(_, tuple)| tuple.contains(&atom))
        .map(|(_, tuple)| tuple.len())
        .collect();
    let largest = *sizes.iter().max()?;
    (sizes.iter().filter(|&&size| size == largest).count() == 1).then_some(largest)
}
