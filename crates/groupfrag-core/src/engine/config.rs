use serde::Deserialize;
use thiserror::Error;

/// Default bound on the size of suppression sets tried by the backtracking search.
pub const DEFAULT_MAX_SUPPRESSIONS: usize = 5;
/// Default bound on strict-mode deduplication passes.
pub const DEFAULT_MAX_DEDUP_ITERATIONS: usize = 100;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for parameter '{parameter}': {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },
    #[error("TOML parsing error: {source}")]
    Toml {
        #[from]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct FragmentationConfig {
    /// Largest number of occurrences suppressed together in priority mode. Zero disables
    /// the search.
    pub max_suppressions: usize,
    /// Upper bound on strict-mode deduplication passes.
    pub max_dedup_iterations: usize,
}

impl Default for FragmentationConfig {
    fn default() -> Self {
        Self {
            max_suppressions: DEFAULT_MAX_SUPPRESSIONS,
            max_dedup_iterations: DEFAULT_MAX_DEDUP_ITERATIONS,
        }
    }
}

impl FragmentationConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_dedup_iterations == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "max_dedup_iterations",
                reason: "at least one deduplication pass is required".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct FragmentationConfigBuilder {
    max_suppressions: Option<usize>,
    max_dedup_iterations: Option<usize>,
}

impl FragmentationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_suppressions(mut self, n: usize) -> Self {
        self.max_suppressions = Some(n);
        self
    }
    pub fn max_dedup_iterations(mut self, n: usize) -> Self {
        self.max_dedup_iterations = Some(n);
        self
    }

    pub fn build(self) -> Result<FragmentationConfig, ConfigError> {
        let config = FragmentationConfig {
            max_suppressions: self.max_suppressions.unwrap_or(DEFAULT_MAX_SUPPRESSIONS),
            max_dedup_iterations: self
                .max_dedup_iterations
                .unwrap_or(DEFAULT_MAX_DEDUP_ITERATIONS),
        };
        config.validate()?;
        Ok(config)
    }
}
