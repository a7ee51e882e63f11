/// Lower bound of the Joback ideal-gas heat capacity fit, in K.
pub const JOBACK_CP_TMIN: f64 = 298.0;
/// Upper bound of the Joback ideal-gas heat capacity fit, in K.
pub const JOBACK_CP_TMAX: f64 = 1000.0;

/// A temperature-dependent property correlation.
///
/// Each variant carries its own coefficients and knows its validity range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TemperatureCorrelation {
    /// `Cp = a + b T + c T^2 + d T^3`, in J/mol/K.
    JobackIdealGasHeatCapacity { coeffs: [f64; 4] },
    /// `mu = MW exp(a / T + b)`, in Pa*s.
    JobackLiquidViscosity {
        a: f64,
        b: f64,
        molecular_weight: f64,
    },
}

impl TemperatureCorrelation {
    pub fn evaluate(&self, temperature: f64) -> f64 {
        match *self {
            Self::JobackIdealGasHeatCapacity { coeffs } => coeffs
                .iter()
                .rev()
                .fold(0.0, |acc, &c| acc * temperature + c),
            Self::JobackLiquidViscosity {
                a,
                b,
                molecular_weight,
            } => molecular_weight * (a / temperature + b).exp(),
        }
    }

    /// `(Tmin, Tmax)` in K, or `None` when the source gives no range.
    pub fn validity_range(&self) -> Option<(f64, f64)> {
        match self {
            Self::JobackIdealGasHeatCapacity { .. } => Some((JOBACK_CP_TMIN, JOBACK_CP_TMAX)),
            Self::JobackLiquidViscosity { .. } => None,
        }
    }

    pub fn is_valid_at(&self, temperature: f64) -> Option<bool> {
        self.validity_range()
            .map(|(tmin, tmax)| (tmin..=tmax).contains(&temperature))
    }
}
