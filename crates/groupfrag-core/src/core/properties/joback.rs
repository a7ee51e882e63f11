use super::constants::{GroupConstants, GroupConstantsTable};
use super::correlation::TemperatureCorrelation;
use crate::core::catalog::descriptor::GroupId;
use std::collections::BTreeMap;
use tracing::debug;

/// Scalar properties estimated by the Joback method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    /// Normal boiling point, K.
    BoilingPoint,
    /// Melting point, K.
    MeltingPoint,
    /// Critical temperature, K.
    CriticalTemperature,
    /// Critical pressure, Pa.
    CriticalPressure,
    /// Critical volume, m^3/mol.
    CriticalVolume,
    /// Ideal-gas enthalpy of formation at 298.15 K, J/mol.
    FormationEnthalpy,
    /// Ideal-gas Gibbs energy of formation at 298.15 K, J/mol.
    FormationGibbsEnergy,
    /// Enthalpy of fusion, J/mol.
    FusionEnthalpy,
    /// Enthalpy of vaporization at the normal boiling point, J/mol.
    VaporizationEnthalpy,
}

impl Property {
    pub const ALL: [Property; 9] = [
        Property::BoilingPoint,
        Property::MeltingPoint,
        Property::CriticalTemperature,
        Property::CriticalPressure,
        Property::CriticalVolume,
        Property::FormationEnthalpy,
        Property::FormationGibbsEnergy,
        Property::FusionEnthalpy,
        Property::VaporizationEnthalpy,
    ];
}

/// Every Joback estimate for one molecule. `None` marks a property that could not be
/// estimated because a contributing group has no tabulated constant.
#[derive(Debug, Clone, PartialEq)]
pub struct JobackEstimates {
    pub boiling_point: Option<f64>,
    pub melting_point: Option<f64>,
    pub critical_temperature: Option<f64>,
    pub critical_pressure: Option<f64>,
    pub critical_volume: Option<f64>,
    pub formation_enthalpy: Option<f64>,
    pub formation_gibbs_energy: Option<f64>,
    pub fusion_enthalpy: Option<f64>,
    pub vaporization_enthalpy: Option<f64>,
    pub ideal_gas_heat_capacity: Option<TemperatureCorrelation>,
    pub liquid_viscosity: Option<TemperatureCorrelation>,
}

/// Joback group-contribution estimator over a set of group counts.
///
/// Critical pressure needs the total atom count including hydrogens, and liquid viscosity
/// needs the molecular weight; both are `None` unless supplied. An experimental boiling
/// point, when given, replaces the estimated one in the critical temperature formula.
#[derive(Debug, Clone)]
pub struct JobackEstimator<'a> {
    counts: &'a BTreeMap<GroupId, usize>,
    table: &'a GroupConstantsTable,
    atom_count: Option<usize>,
    molecular_weight: Option<f64>,
    boiling_point: Option<f64>,
}

impl<'a> JobackEstimator<'a> {
    pub fn new(counts: &'a BTreeMap<GroupId, usize>, table: &'a GroupConstantsTable) -> Self {
        Self {
            counts,
            table,
            atom_count: None,
            molecular_weight: None,
            boiling_point: None,
        }
    }

    pub fn with_atom_count(mut self, atom_count: usize) -> Self {
        self.atom_count = Some(atom_count);
        self
    }

    pub fn with_molecular_weight(mut self, molecular_weight: f64) -> Self {
        self.molecular_weight = Some(molecular_weight);
        self
    }

    pub fn with_boiling_point(mut self, boiling_point: f64) -> Self {
        self.boiling_point = Some(boiling_point);
        self
    }

    fn sum(&self, field: fn(&GroupConstants) -> Option<f64>) -> Option<f64> {
        if self.counts.is_empty() {
            return None;
        }
        self.counts.iter().try_fold(0.0, |acc, (&id, &count)| {
            let value = self.table.get(id).and_then(field)?;
            Some(acc + value * count as f64)
        })
    }

    pub fn boiling_point(&self) -> Option<f64> {
        self.sum(|g| g.tb).map(|s| 198.2 + s)
    }

    pub fn melting_point(&self) -> Option<f64> {
        self.sum(|g| g.tm).map(|s| 122.5 + s)
    }

    pub fn critical_temperature(&self) -> Option<f64> {
        let tb = self.boiling_point.or_else(|| self.boiling_point())?;
        let s = self.sum(|g| g.tc)?;
        Some(tb / (0.584 + 0.965 * s - s * s))
    }

    pub fn critical_pressure(&self) -> Option<f64> {
        let atoms = self.atom_count? as f64;
        let s = self.sum(|g| g.pc)?;
        // bar to Pa
        Some((0.113 + 0.0032 * atoms - s).powi(-2) * 1e5)
    }

    pub fn critical_volume(&self) -> Option<f64> {
        self.sum(|g| g.vc).map(|s| (17.5 + s) * 1e-6)
    }

    pub fn formation_enthalpy(&self) -> Option<f64> {
        self.sum(|g| g.hform).map(|s| (68.29 + s) * 1000.0)
    }

    pub fn formation_gibbs_energy(&self) -> Option<f64> {
        self.sum(|g| g.gform).map(|s| (53.88 + s) * 1000.0)
    }

    pub fn fusion_enthalpy(&self) -> Option<f64> {
        self.sum(|g| g.hfus).map(|s| (-0.88 + s) * 1000.0)
    }

    pub fn vaporization_enthalpy(&self) -> Option<f64> {
        self.sum(|g| g.hvap).map(|s| (15.3 + s) * 1000.0)
    }

    /// Coefficients `[a, b, c, d]` of the ideal-gas heat capacity polynomial.
    pub fn ideal_gas_heat_capacity_coeffs(&self) -> Option<[f64; 4]> {
        Some([
            self.sum(|g| g.cpa)? - 37.93,
            self.sum(|g| g.cpb)? + 0.210,
            self.sum(|g| g.cpc)? - 3.91e-4,
            self.sum(|g| g.cpd)? + 2.06e-7,
        ])
    }

    /// Coefficients `[a, b]` of the liquid viscosity correlation.
    pub fn liquid_viscosity_coeffs(&self) -> Option<[f64; 2]> {
        Some([
            self.sum(|g| g.mua)? - 597.82,
            self.sum(|g| g.mub)? - 11.202,
        ])
    }

    pub fn ideal_gas_heat_capacity(&self) -> Option<TemperatureCorrelation> {
        self.ideal_gas_heat_capacity_coeffs()
            .map(|coeffs| TemperatureCorrelation::JobackIdealGasHeatCapacity { coeffs })
    }

    pub fn liquid_viscosity(&self) -> Option<TemperatureCorrelation> {
        let molecular_weight = self.molecular_weight?;
        let [a, b] = self.liquid_viscosity_coeffs()?;
        Some(TemperatureCorrelation::JobackLiquidViscosity {
            a,
            b,
            molecular_weight,
        })
    }

    pub fn estimate(&self, property: Property) -> Option<f64> {
        match property {
            Property::BoilingPoint => self.boiling_point(),
            Property::MeltingPoint => self.melting_point(),
            Property::CriticalTemperature => self.critical_temperature(),
            Property::CriticalPressure => self.critical_pressure(),
            Property::CriticalVolume => self.critical_volume(),
            Property::FormationEnthalpy => self.formation_enthalpy(),
            Property::FormationGibbsEnergy => self.formation_gibbs_energy(),
            Property::FusionEnthalpy => self.fusion_enthalpy(),
            Property::VaporizationEnthalpy => self.vaporization_enthalpy(),
        }
    }

    pub fn estimate_all(&self) -> JobackEstimates {
        let estimates = JobackEstimates {
            boiling_point: self.boiling_point(),
            melting_point: self.melting_point(),
            critical_temperature: self.critical_temperature(),
            critical_pressure: self.critical_pressure(),
            critical_volume: self.critical_volume(),
            formation_enthalpy: self.formation_enthalpy(),
            formation_gibbs_energy: self.formation_gibbs_energy(),
            fusion_enthalpy: self.fusion_enthalpy(),
            vaporization_enthalpy: self.vaporization_enthalpy(),
            ideal_gas_heat_capacity: self.ideal_gas_heat_capacity(),
            liquid_viscosity: self.liquid_viscosity(),
        };
        let missing = Property::ALL
            .iter()
            .filter(|&&p| self.estimate(p).is_none())
            .count();
        debug!(
            "Joback estimation over {} group(s): {} of {} scalar properties unavailable.",
            self.counts.len(),
            missing,
            Property::ALL.len()
        );
        estimates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Option<f64>, expected: f64, rel_tol: f64) {
        let actual = actual.expect("expected a value");
        assert!(
            ((actual - expected) / expected).abs() < rel_tol,
            "actual {actual}, expected {expected}"
        );
    }

    fn acetone_counts() -> BTreeMap<GroupId, usize> {
        BTreeMap::from([(GroupId(1), 2), (GroupId(24), 1)])
    }

    #[test]
    fn scalar_properties_match_reference_values_for_acetone() {
        let table = GroupConstantsTable::joback().unwrap();
        let counts = acetone_counts();
        let estimator = JobackEstimator::new(&counts, &table).with_atom_count(10);

        assert_close(estimator.boiling_point(), 322.11, 1e-9);
        assert_close(estimator.melting_point(), 173.5, 1e-9);
        assert_close(estimator.critical_temperature(), 500.5590, 1e-6);
        assert_close(estimator.critical_pressure(), 4_802_499.6, 1e-6);
        assert_close(estimator.critical_volume(), 2.095e-4, 1e-9);
        assert_close(estimator.formation_enthalpy(), -217_830.0, 1e-9);
        assert_close(estimator.formation_gibbs_energy(), -154_540.0, 1e-9);
        assert_close(estimator.fusion_enthalpy(), 5_125.0, 1e-9);
        assert_close(estimator.vaporization_enthalpy(), 29_018.0, 1e-9);
    }

    #[test]
    fn correlation_coefficients_match_reference_values_for_acetone() {
        let table = GroupConstantsTable::joback().unwrap();
        let counts = acetone_counts();
        let estimator = JobackEstimator::new(&counts, &table).with_molecular_weight(58.041864);

        let [a, b, c, d] = estimator.ideal_gas_heat_capacity_coeffs().unwrap();
        assert_close(Some(a), 7.52, 1e-9);
        assert_close(Some(b), 0.26084, 1e-9);
        assert_close(Some(c), -1.207e-4, 1e-9);
        assert_close(Some(d), 1.546e-8, 1e-6);

        let [mua, mub] = estimator.liquid_viscosity_coeffs().unwrap();
        assert_close(Some(mua), 839.11, 1e-9);
        assert_close(Some(mub), -14.99, 1e-9);

        let mu = estimator.liquid_viscosity().unwrap();
        assert_close(Some(mu.evaluate(300.0)), 2.9403e-4, 1e-3);
        let cp = estimator.ideal_gas_heat_capacity().unwrap();
        assert_close(Some(cp.evaluate(300.0)), 7.52 + 0.26084 * 300.0 - 1.207e-4 * 9e4 + 1.546e-8 * 2.7e7, 1e-9);
    }

    #[test]
    fn experimental_boiling_point_overrides_estimate_in_critical_temperature() {
        let table = GroupConstantsTable::joback().unwrap();
        let counts = acetone_counts();
        let estimated = JobackEstimator::new(&counts, &table);
        let experimental = JobackEstimator::new(&counts, &table).with_boiling_point(329.2);
        let ratio = experimental.critical_temperature().unwrap()
            / estimated.critical_temperature().unwrap();
        assert!((ratio - 329.2 / 322.11).abs() < 1e-12);
        // The boiling point estimate itself is unaffected.
        assert_eq!(experimental.boiling_point(), estimated.boiling_point());
    }

    #[test]
    fn missing_constants_make_only_affected_properties_absent() {
        let table = GroupConstantsTable::joback().unwrap();
        // Group 34 (-N= nonring) has no Vc, Tm, Gf, heat capacity or viscosity constants.
        let counts = BTreeMap::from([(GroupId(1), 2), (GroupId(34), 1)]);
        let estimator = JobackEstimator::new(&counts, &table).with_atom_count(9);
        assert_eq!(estimator.critical_volume(), None);
        assert_eq!(estimator.melting_point(), None);
        assert_eq!(estimator.ideal_gas_heat_capacity(), None);
        assert!(estimator.boiling_point().is_some());
        assert!(estimator.critical_temperature().is_some());
        assert!(estimator.critical_pressure().is_some());
    }

    #[test]
    fn unknown_group_makes_every_property_absent() {
        let table = GroupConstantsTable::joback().unwrap();
        let counts = BTreeMap::from([(GroupId(1), 1), (GroupId(999), 1)]);
        let estimates = JobackEstimator::new(&counts, &table).estimate_all();
        assert_eq!(estimates.boiling_point, None);
        assert_eq!(estimates.liquid_viscosity, None);
    }

    #[test]
    fn zero_groups_yield_no_estimates() {
        let table = GroupConstantsTable::joback().unwrap();
        let counts = BTreeMap::new();
        let estimator = JobackEstimator::new(&counts, &table)
            .with_atom_count(1)
            .with_molecular_weight(10.0);
        for property in Property::ALL {
            assert_eq!(estimator.estimate(property), None);
        }
        assert_eq!(estimator.ideal_gas_heat_capacity_coeffs(), None);
    }

    #[test]
    fn critical_pressure_requires_atom_count_and_viscosity_requires_weight() {
        let table = GroupConstantsTable::joback().unwrap();
        let counts = acetone_counts();
        let estimator = JobackEstimator::new(&counts, &table);
        assert_eq!(estimator.critical_pressure(), None);
        assert_eq!(estimator.liquid_viscosity(), None);
        assert!(estimator.liquid_viscosity_coeffs().is_some());
    }

    #[test]
    fn estimate_dispatches_to_matching_formula() {
        let table = GroupConstantsTable::joback().unwrap();
        let counts = acetone_counts();
        let estimator = JobackEstimator::new(&counts, &table).with_atom_count(10);
        let all = estimator.estimate_all();
        assert_eq!(estimator.estimate(Property::BoilingPoint), all.boiling_point);
        assert_eq!(estimator.estimate(Property::CriticalPressure), all.critical_pressure);
        assert_eq!(
            estimator.estimate(Property::VaporizationEnthalpy),
            all.vaporization_enthalpy
        );
    }
}
