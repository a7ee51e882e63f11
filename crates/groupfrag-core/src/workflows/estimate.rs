use super::fragment;
use crate::core::models::molecule::Molecule;
use crate::core::pattern::oracle::PatternOracle;
use crate::core::properties::constants::GroupConstantsTable;
use crate::core::properties::joback::{JobackEstimates, JobackEstimator};
use crate::engine::collector::MatchCollector;
use crate::engine::config::FragmentationConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use crate::engine::state::StrictFragmentation;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone)]
pub struct JobackResult {
    pub fragmentation: StrictFragmentation,
    pub estimates: JobackEstimates,
}

/// Fragments `molecule` in strict-cover mode and estimates its Joback properties.
///
/// Estimates are computed from whatever groups were found, so callers should check
/// `fragmentation.status` before trusting them. An experimental `boiling_point` in kelvin
/// replaces the estimated one in the critical temperature.
#[instrument(skip_all, name = "joback_estimation_workflow")]
pub fn joback<O: PatternOracle>(
    molecule: &Molecule,
    collector: &MatchCollector<O>,
    constants: &GroupConstantsTable,
    boiling_point: Option<f64>,
    config: &FragmentationConfig,
    reporter: &ProgressReporter,
) -> Result<JobackResult, EngineError> {
    let fragmentation = fragment::strict(molecule, collector, config, reporter)?;
    if !fragmentation.is_success() {
        warn!(
            "Estimating from an incomplete fragmentation: {}",
            fragmentation.status
        );
    }

    let estimates = reporter.phase("Estimating Properties", || {
        let mut estimator = JobackEstimator::new(&fragmentation.group_counts, constants)
            .with_atom_count(molecule.atom_count_with_hydrogens())
            .with_molecular_weight(molecule.monoisotopic_mass());
        if let Some(tb) = boiling_point {
            estimator = estimator.with_boiling_point(tb);
        }
        estimator.estimate_all()
    });

    info!(
        boiling_point = ?estimates.boiling_point,
        critical_temperature = ?estimates.critical_temperature,
        "Joback estimation complete."
    );
    Ok(JobackResult {
        fragmentation,
        estimates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::descriptor::GroupDescriptor;
    use crate::core::catalog::registry::Catalog;
    use crate::core::models::atom::Atom;
    use crate::core::models::builder::MoleculeBuilder;
    use crate::core::models::element::Element;
    use crate::core::models::topology::BondOrder;
    use crate::core::pattern::query::{BondMatch, QueryAtom, QueryPattern};
    use crate::engine::config::FragmentationConfigBuilder;
    use crate::engine::state::FragmentationStatus;

    fn acetone() -> Molecule {
        let mut builder = MoleculeBuilder::new();
        builder.add_atom(Atom::new(Element::C, 3));
        builder.add_atom(Atom::new(Element::C, 0));
        builder.add_atom(Atom::new(Element::O, 0));
        builder.add_atom(Atom::new(Element::C, 3));
        builder
            .add_bond(0, 1, BondOrder::Single)
            .add_bond(1, 2, BondOrder::Double)
            .add_bond(1, 3, BondOrder::Single);
        builder.build().unwrap()
    }

    fn assert_close(actual: Option<f64>, expected: f64, rel_tol: f64) {
        let actual = actual.expect("expected a value");
        assert!(
            ((actual - expected) / expected).abs() < rel_tol,
            "actual {actual}, expected {expected}"
        );
    }

    #[test]
    fn acetone_end_to_end() {
        let collector = MatchCollector::new(Catalog::joback().unwrap());
        let constants = GroupConstantsTable::joback().unwrap();
        let result = joback(
            &acetone(),
            &collector,
            &constants,
            None,
            &FragmentationConfig::default(),
            &ProgressReporter::new(),
        )
        .unwrap();

        assert_eq!(result.fragmentation.status, FragmentationStatus::Ok);
        assert_close(result.estimates.boiling_point, 322.11, 1e-9);
        assert_close(result.estimates.critical_temperature, 500.5590, 1e-6);
        assert_close(result.estimates.critical_pressure, 4_802_499.6, 1e-6);
        let viscosity = result.estimates.liquid_viscosity.unwrap();
        assert_close(Some(viscosity.evaluate(300.0)), 2.9403e-4, 1e-3);
    }

    #[test]
    fn experimental_boiling_point_is_used() {
        let collector = MatchCollector::new(Catalog::joback().unwrap());
        let constants = GroupConstantsTable::joback().unwrap();
        let config = FragmentationConfig::default();
        let reporter = ProgressReporter::new();
        let estimated =
            joback(&acetone(), &collector, &constants, None, &config, &reporter).unwrap();
        let measured = joback(
            &acetone(),
            &collector,
            &constants,
            Some(329.2),
            &config,
            &reporter,
        )
        .unwrap();
        assert!(
            measured.estimates.critical_temperature.unwrap()
                > estimated.estimates.critical_temperature.unwrap()
        );
    }

    #[test]
    fn unmatched_molecule_reports_status_and_partial_estimates() {
        let mut builder = MoleculeBuilder::new();
        let boron = builder.add_atom(Atom::new(Element::B, 0));
        let carbon = builder.add_atom(Atom::new(Element::C, 3));
        builder.add_bond(boron, carbon, BondOrder::Single);
        let molecule = builder.build().unwrap();

        let collector = MatchCollector::new(Catalog::joback().unwrap());
        let constants = GroupConstantsTable::joback().unwrap();
        let result = joback(
            &molecule,
            &collector,
            &constants,
            None,
            &FragmentationConfig::default(),
            &ProgressReporter::new(),
        )
        .unwrap();
        assert_eq!(
            result.fragmentation.status,
            FragmentationStatus::IncompleteCatalogCoverage
        );
        // Only the methyl group was identified.
        assert_close(result.estimates.boiling_point, 198.2 + 23.58, 1e-9);
    }

    #[test]
    fn dedup_bound_is_taken_from_config() {
        let mut builder = MoleculeBuilder::new();
        builder.add_atom(Atom::new(Element::C, 3));
        builder.add_atom(Atom::new(Element::C, 3));
        builder.add_bond(0, 1, BondOrder::Single);
        let ethane = builder.build().unwrap();

        let pair = QueryPattern::new(vec![
            QueryAtom::element(Element::C),
            QueryAtom::element(Element::C),
        ])
        .bond(0, 1, BondMatch::Single);
        let single = QueryPattern::single(QueryAtom::element(Element::C));
        let collector = MatchCollector::new(
            Catalog::new(vec![
                GroupDescriptor::new(1, "pair", vec![pair]),
                GroupDescriptor::new(2, "single", vec![single]),
            ])
            .unwrap(),
        );
        let constants = GroupConstantsTable::joback().unwrap();
        let reporter = ProgressReporter::new();

        let bounded = FragmentationConfigBuilder::new()
            .max_dedup_iterations(1)
            .build()
            .unwrap();
        let result = joback(&ethane, &collector, &constants, None, &bounded, &reporter).unwrap();
        assert_eq!(result.fragmentation.iterations, 1);
        assert_eq!(
            result.fragmentation.status,
            FragmentationStatus::DuplicateAtomsUnresolved { atoms: vec![1] }
        );

        let default = FragmentationConfig::default();
        let result = joback(&ethane, &collector, &constants, None, &default, &reporter).unwrap();
        assert_eq!(result.fragmentation.status, FragmentationStatus::Ok);
        assert_eq!(result.fragmentation.iterations, 3);
    }
}
