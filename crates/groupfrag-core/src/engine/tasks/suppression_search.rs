use super::coverage;
use super::greedy_assignment::{self, GreedyAssignment};
use crate::core::catalog::descriptor::GroupId;
use crate::core::pattern::oracle::AtomTuple;
use crate::engine::context::AssignmentContext;
use crate::engine::progress::Progress;
use crate::engine::state::SearchSummary;
use itertools::Itertools;
use tracing::{debug, instrument, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

type Suppression<'a> = Vec<(GroupId, &'a AtomTuple)>;

/// Suppression sets materialized at once; tiers are walked lazily in chunks of this size.
const CHUNK_SIZE: usize = 4096;

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub assignment: GreedyAssignment,
    pub summary: SearchSummary,
    pub resolved: bool,
}

/// Retries the greedy pass with growing sets of occurrences suppressed.
///
/// Every occurrence of the match set is a candidate. Sets of size 1 up to
/// `max_suppressions` are tried in lexicographic order of candidates and the first one that
/// yields a complete assignment wins. Without a winner the unsuppressed greedy result is
/// returned with `resolved` unset.
#[instrument(skip_all, name = "suppression_search_task")]
pub fn run(context: &AssignmentContext) -> SearchOutcome {
    search(context, CHUNK_SIZE)
}

fn search(context: &AssignmentContext, chunk_size: usize) -> SearchOutcome {
    let candidates: Vec<(GroupId, &AtomTuple)> = context.match_set.occurrences().collect();
    let max_size = context.config.max_suppressions.min(candidates.len());
    let mut trials = 0;

    for size in 1..=max_size {
        debug!(size, candidates = candidates.len(), "Trying suppression sets.");
        context.reporter.report(Progress::SearchTier {
            size,
            candidates: candidates.len(),
        });

        let chunks = candidates.iter().copied().combinations(size).chunks(chunk_size);
        for chunk in &chunks {
            let chunk: Vec<Suppression> = chunk.collect();
            match first_success(context, &chunk) {
                Some((index, assignment)) => {
                    trials += index + 1;
                    let suppressed = chunk[index]
                        .iter()
                        .map(|&(group, tuple)| (group, tuple.clone()))
                        .collect();
                    debug!(trials, "Suppression set of size {} resolved the overlap.", size);
                    return SearchOutcome {
                        assignment,
                        summary: SearchSummary { trials, suppressed },
                        resolved: true,
                    };
                }
                None => trials += chunk.len(),
            }
        }
    }

    SearchOutcome {
        assignment: greedy_assignment::run(context, &[]),
        summary: SearchSummary {
            trials,
            suppressed: Vec::new(),
        },
        resolved: false,
    }
}

/// The lowest-indexed suppression set of the chunk that completes the assignment.
fn first_success(
    context: &AssignmentContext,
    chunk: &[Suppression],
) -> Option<(usize, GreedyAssignment)> {
    let attempt = |(index, suppressed): (usize, &Suppression)| {
        let assignment = greedy_assignment::run(context, suppressed);
        let complete = coverage::is_complete(context, &assignment);
        trace!(index, complete, "Evaluated suppression set.");
        complete.then_some((index, assignment))
    };

    #[cfg(not(feature = "parallel"))]
    let hit = chunk.iter().enumerate().find_map(attempt);

    #[cfg(feature = "parallel")]
    let hit = chunk.par_iter().enumerate().find_map_first(attempt);

    hit
}
