use crate::core::catalog::registry::Catalog;
use crate::core::io::traits::MoleculeSource;
use crate::core::models::molecule::Molecule;
use crate::core::pattern::oracle::PatternOracle;
use crate::engine::collector::MatchCollector;
use crate::engine::config::FragmentationConfig;
use crate::engine::context::AssignmentContext;
use crate::engine::error::EngineError;
use crate::engine::match_set::MatchSet;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::state::{
    Assignment, FragmentationStatus, SearchSummary, StrictFragmentation,
};
use crate::engine::tasks::{coverage, deduplication, greedy_assignment, suppression_search};
use tracing::{info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Fragments `molecule` in priority mode.
///
/// Groups claim atoms greedily by descending priority. When the greedy pass leaves atoms
/// uncovered or implies the wrong hydrogen count, a bounded search suppresses growing sets
/// of occurrences until one pass succeeds.
#[instrument(skip_all, name = "priority_fragmentation_workflow")]
pub fn priority<O: PatternOracle>(
    molecule: &Molecule,
    collector: &MatchCollector<O>,
    config: &FragmentationConfig,
    reporter: &ProgressReporter,
) -> Result<Assignment, EngineError> {
    let match_set = collect_matches(molecule, collector, reporter)?;
    let assignment = assign_priority(molecule, collector.catalog(), &match_set, config, reporter);
    info!(
        status = %assignment.status,
        groups = assignment.total_groups(),
        "Priority fragmentation complete."
    );
    Ok(assignment)
}

/// Like [`priority`], for a molecule that still has to be built.
///
/// A source that fails to build yields a `ConstructionFailed` assignment rather than an
/// error.
pub fn priority_from_source<S: MoleculeSource, O: PatternOracle>(
    source: &S,
    collector: &MatchCollector<O>,
    config: &FragmentationConfig,
    reporter: &ProgressReporter,
) -> Result<Assignment, EngineError> {
    match source.construct() {
        Ok(molecule) => priority(&molecule, collector, config, reporter),
        Err(e) => {
            warn!("Failed to construct molecule: {}", e);
            Ok(Assignment::empty(FragmentationStatus::ConstructionFailed))
        }
    }
}

/// Runs the priority-mode assignment over an already collected match set.
pub fn assign_priority(
    molecule: &Molecule,
    catalog: &Catalog,
    match_set: &MatchSet,
    config: &FragmentationConfig,
    reporter: &ProgressReporter,
) -> Assignment {
    let context = AssignmentContext::new(catalog, molecule, match_set, config, reporter);

    let greedy = reporter.phase("Greedy Assignment", || {
        greedy_assignment::run(&context, &[])
    });

    if !coverage::catalog_covers(&context) {
        warn!(
            "Atoms {:?} are not matched by any catalog pattern.",
            coverage::uncovered_atoms(match_set, &context.all_atoms)
        );
        return Assignment::from_occurrences(
            greedy.occurrences,
            FragmentationStatus::IncompleteCatalogCoverage,
            SearchSummary::default(),
        );
    }
    if coverage::is_complete(&context, &greedy) {
        return Assignment::from_occurrences(
            greedy.occurrences,
            FragmentationStatus::Ok,
            SearchSummary::default(),
        );
    }

    let outcome = reporter.phase("Suppression Search", || suppression_search::run(&context));
    let status = if outcome.resolved {
        FragmentationStatus::Ok
    } else {
        warn!(
            trials = outcome.summary.trials,
            "No suppression set within the bound resolved the overlapping matches."
        );
        FragmentationStatus::UnresolvedOverlap
    };
    Assignment::from_occurrences(outcome.assignment.occurrences, status, outcome.summary)
}

/// Fragments `molecule` in strict-cover mode.
///
/// Overlaps are pruned by deduplication instead of priorities, and any overlap that
/// cannot be pruned is reported rather than searched away.
#[instrument(skip_all, name = "strict_fragmentation_workflow")]
pub fn strict<O: PatternOracle>(
    molecule: &Molecule,
    collector: &MatchCollector<O>,
    config: &FragmentationConfig,
    reporter: &ProgressReporter,
) -> Result<StrictFragmentation, EngineError> {
    let match_set = collect_matches(molecule, collector, reporter)?;
    let fragmentation = assign_strict(molecule, match_set, config, reporter);
    info!(
        status = %fragmentation.status,
        iterations = fragmentation.iterations,
        "Strict fragmentation complete."
    );
    Ok(fragmentation)
}

/// Like [`strict`], for a molecule that still has to be built.
pub fn strict_from_source<S: MoleculeSource, O: PatternOracle>(
    source: &S,
    collector: &MatchCollector<O>,
    config: &FragmentationConfig,
    reporter: &ProgressReporter,
) -> Result<StrictFragmentation, EngineError> {
    match source.construct() {
        Ok(molecule) => strict(&molecule, collector, config, reporter),
        Err(e) => {
            warn!("Failed to construct molecule: {}", e);
            Ok(StrictFragmentation::empty(
                FragmentationStatus::ConstructionFailed,
            ))
        }
    }
}

/// Runs strict-cover deduplication over an already collected match set.
pub fn assign_strict(
    molecule: &Molecule,
    mut match_set: MatchSet,
    config: &FragmentationConfig,
    reporter: &ProgressReporter,
) -> StrictFragmentation {
    let all_atoms = molecule.atom_indices();
    let catalog_covers = coverage::uncovered_atoms(&match_set, &all_atoms).is_empty();

    let outcome = reporter.phase("Deduplication", || {
        deduplication::run(&mut match_set, config.max_dedup_iterations)
    });

    let matched = match_set.covered_atoms().len();
    let status = if !catalog_covers {
        FragmentationStatus::IncompleteCatalogCoverage
    } else if matched != all_atoms.len() {
        FragmentationStatus::PartialCoverage {
            matched,
            total: all_atoms.len(),
        }
    } else if !outcome.contested.is_empty() {
        FragmentationStatus::DuplicateAtomsUnresolved {
            atoms: outcome.contested,
        }
    } else {
        FragmentationStatus::Ok
    };
    if !status.is_ok() {
        warn!("Strict fragmentation failed: {}", status);
    }

    StrictFragmentation {
        group_counts: match_set.counts(),
        group_occurrences: match_set
            .entries()
            .iter()
            .map(|(group, tuples)| (*group, tuples.clone()))
            .collect(),
        status,
        iterations: outcome.iterations,
    }
}

fn collect_matches<O: PatternOracle>(
    molecule: &Molecule,
    collector: &MatchCollector<O>,
    reporter: &ProgressReporter,
) -> Result<MatchSet, EngineError> {
    let match_set = reporter.phase("Collecting Matches", || collector.collect(molecule))?;
    reporter.report(Progress::MatchesCollected {
        groups: match_set.entries().len(),
        occurrences: match_set.occurrence_count(),
    });
    Ok(match_set)
}

/// Fragments every molecule in priority mode; results keep input order.
#[instrument(skip_all, name = "priority_batch_workflow")]
pub fn priority_batch<O: PatternOracle>(
    molecules: &[Molecule],
    collector: &MatchCollector<O>,
    config: &FragmentationConfig,
    reporter: &ProgressReporter,
) -> Vec<Result<Assignment, EngineError>> {
    run_batch(molecules, reporter, |molecule| {
        priority(molecule, collector, config, &ProgressReporter::new())
    })
}

/// Fragments every molecule in strict-cover mode; results keep input order.
#[instrument(skip_all, name = "strict_batch_workflow")]
pub fn strict_batch<O: PatternOracle>(
    molecules: &[Molecule],
    collector: &MatchCollector<O>,
    config: &FragmentationConfig,
    reporter: &ProgressReporter,
) -> Vec<Result<StrictFragmentation, EngineError>> {
    run_batch(molecules, reporter, |molecule| {
        strict(molecule, collector, config, &ProgressReporter::new())
    })
}

fn run_batch<T, F>(molecules: &[Molecule], reporter: &ProgressReporter, fragment: F) -> Vec<T>
where
    T: Send,
    F: Fn(&Molecule) -> T + Sync + Send,
{
    reporter.report(Progress::PhaseStart { name: "Batch" });
    reporter.report(Progress::TaskStart {
        total_steps: molecules.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = molecules.iter();

    #[cfg(feature = "parallel")]
    let iterator = molecules.par_iter();

    let results: Vec<T> = iterator
        .map(|molecule| {
            let result = fragment(molecule);
            reporter.report(Progress::TaskIncrement);
            result
        })
        .collect();

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);
    info!("Fragmented {} molecule(s).", results.len());
    results
}
