//! Configuration types for controlling a property run.

use crate::rng::fresh_seed;

/// Environment variable holding the default seed
pub const SEED_VAR: &str = "REYNARD_SEED";
/// Environment variable holding the default number of trials
pub const NUMBER_OF_TESTS_VAR: &str = "REYNARD_NUMBER_OF_TESTS";
/// Environment variable holding the default maximum size
pub const MAXIMUM_SIZE_VAR: &str = "REYNARD_MAXIMUM_SIZE";

pub const DEFAULT_NUMBER_OF_TESTS: usize = 500;
pub const DEFAULT_MAXIMUM_SIZE: usize = 200;
pub const DEFAULT_MAX_DISCARD_RATIO: usize = 10;
pub const DEFAULT_MAX_SHRINK_STEPS: usize = 10_000;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConfigError {
    /// Invalid number of tests (must be > 0)
    InvalidNumberOfTests(usize),
    /// Invalid discard ratio (must be > 0)
    InvalidDiscardRatio(usize),
    /// Invalid shrink step limit (must be > 0)
    InvalidShrinkSteps(usize),
    /// An environment variable held something that is not a number
    InvalidEnvironmentValue { variable: String, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidNumberOfTests(n) => {
                write!(f, "Invalid number of tests: {} (must be > 0)", n)
            }
            ConfigError::InvalidDiscardRatio(n) => {
                write!(f, "Invalid discard ratio: {} (must be > 0)", n)
            }
            ConfigError::InvalidShrinkSteps(n) => {
                write!(f, "Invalid shrink step limit: {} (must be > 0)", n)
            }
            ConfigError::InvalidEnvironmentValue { variable, value } => {
                write!(f, "Invalid value for {}: {:?} (expected an unsigned integer)", variable, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Explicit inputs of a single run.
///
/// Process-wide defaults never leak into the runner directly; they are
/// resolved into one of these once, before the first trial.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TestConfig {
    /// Seed of the root random source
    pub seed: u64,
    /// Number of counted trials
    pub number_of_tests: usize,
    /// Upper bound of the size ramp
    pub maximum_size: usize,
    /// Discards allowed per counted trial before giving up
    pub max_discard_ratio: usize,
    /// Upper bound on shrink replacements
    pub max_shrink_steps: usize,
}

impl Default for TestConfig {
    /// Library defaults with a freshly drawn seed
    fn default() -> Self {
        Self {
            seed: fresh_seed(),
            number_of_tests: DEFAULT_NUMBER_OF_TESTS,
            maximum_size: DEFAULT_MAXIMUM_SIZE,
            max_discard_ratio: DEFAULT_MAX_DISCARD_RATIO,
            max_shrink_steps: DEFAULT_MAX_SHRINK_STEPS,
        }
    }
}

impl TestConfig {
    /// Create a new test configuration with validation
    pub fn new(seed: u64, number_of_tests: usize, maximum_size: usize) -> Result<Self, ConfigError> {
        let config = Self {
            seed,
            number_of_tests,
            maximum_size,
            max_discard_ratio: DEFAULT_MAX_DISCARD_RATIO,
            max_shrink_steps: DEFAULT_MAX_SHRINK_STEPS,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the test configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.number_of_tests == 0 {
            return Err(ConfigError::InvalidNumberOfTests(self.number_of_tests));
        }
        if self.max_discard_ratio == 0 {
            return Err(ConfigError::InvalidDiscardRatio(self.max_discard_ratio));
        }
        if self.max_shrink_steps == 0 {
            return Err(ConfigError::InvalidShrinkSteps(self.max_shrink_steps));
        }
        Ok(())
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_number_of_tests(mut self, number_of_tests: usize) -> Self {
        self.number_of_tests = number_of_tests;
        self
    }

    pub fn with_maximum_size(mut self, maximum_size: usize) -> Self {
        self.maximum_size = maximum_size;
        self
    }

    pub fn with_max_discard_ratio(mut self, ratio: usize) -> Self {
        self.max_discard_ratio = ratio;
        self
    }

    pub fn with_max_shrink_steps(mut self, steps: usize) -> Self {
        self.max_shrink_steps = steps;
        self
    }

    /// Total discards tolerated before the run is abandoned
    pub fn discard_ceiling(&self) -> usize {
        self.number_of_tests.saturating_mul(self.max_discard_ratio)
    }

    /// Size used for counted trial `trial` (1-based).
    ///
    /// Ramps monotonically from 0 on the first trial to `maximum_size` on
    /// the last one.
    pub fn size_for_trial(&self, trial: usize) -> usize {
        let steps = self.number_of_tests.saturating_sub(1).max(1);
        let index = trial.saturating_sub(1).min(steps);
        let size = (index as u128 * self.maximum_size as u128) / steps as u128;
        size as usize
    }

    /// Create a test configuration from global defaults with optional overrides
    pub fn from_global_with_overrides(
        global: &GlobalConfig,
        seed: Option<u64>,
        number_of_tests: Option<usize>,
        maximum_size: Option<usize>,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            seed: seed.or(global.default_seed).unwrap_or_else(fresh_seed),
            number_of_tests: number_of_tests.unwrap_or(global.default_number_of_tests),
            maximum_size: maximum_size.unwrap_or(global.default_maximum_size),
            max_discard_ratio: DEFAULT_MAX_DISCARD_RATIO,
            max_shrink_steps: DEFAULT_MAX_SHRINK_STEPS,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Process-wide defaults for runs that do not override them
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlobalConfig {
    /// Default seed; a fresh one is drawn per run when absent
    pub default_seed: Option<u64>,
    /// Default number of counted trials
    pub default_number_of_tests: usize,
    /// Default upper bound of the size ramp
    pub default_maximum_size: usize,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            default_seed: None,
            default_number_of_tests: DEFAULT_NUMBER_OF_TESTS,
            default_maximum_size: DEFAULT_MAXIMUM_SIZE,
        }
    }
}

impl GlobalConfig {
    /// Read defaults from `REYNARD_SEED`, `REYNARD_NUMBER_OF_TESTS` and
    /// `REYNARD_MAXIMUM_SIZE`, falling back to library defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build defaults from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            default_seed: parse_var(&lookup, SEED_VAR)?,
            default_number_of_tests: parse_var(&lookup, NUMBER_OF_TESTS_VAR)?
                .unwrap_or(defaults.default_number_of_tests),
            default_maximum_size: parse_var(&lookup, MAXIMUM_SIZE_VAR)?
                .unwrap_or(defaults.default_maximum_size),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the global configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_number_of_tests == 0 {
            return Err(ConfigError::InvalidNumberOfTests(self.default_number_of_tests));
        }
        Ok(())
    }
}

fn parse_var<F, N>(lookup: &F, variable: &str) -> Result<Option<N>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    N: std::str::FromStr,
{
    match lookup(variable) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => {
            let parsed = raw.trim().parse::<N>();
            match parsed {
                Ok(value) => Ok(Some(value)),
                Err(_) => Err(ConfigError::InvalidEnvironmentValue {
                    variable: variable.to_string(),
                    value: raw,
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_test_config_validation() {
        assert!(TestConfig::new(1, 100, 50).is_ok());
        assert_eq!(
            TestConfig::new(1, 0, 50),
            Err(ConfigError::InvalidNumberOfTests(0))
        );

        let config = TestConfig::default().with_max_discard_ratio(0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidDiscardRatio(0)));

        let config = TestConfig::default().with_max_shrink_steps(0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidShrinkSteps(0)));
    }

    #[test]
    fn test_size_ramp() {
        let config = TestConfig::new(0, 101, 100).unwrap();
        assert_eq!(config.size_for_trial(1), 0);
        assert_eq!(config.size_for_trial(51), 50);
        assert_eq!(config.size_for_trial(101), 100);

        let sizes: Vec<usize> = (1..=101).map(|i| config.size_for_trial(i)).collect();
        assert!(sizes.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_size_ramp_single_trial() {
        let config = TestConfig::new(0, 1, 100).unwrap();
        assert_eq!(config.size_for_trial(1), 0);
    }

    #[test]
    fn test_size_ramp_uneven() {
        let config = TestConfig::new(0, 4, 10).unwrap();
        let sizes: Vec<usize> = (1..=4).map(|i| config.size_for_trial(i)).collect();
        assert_eq!(sizes, vec![0, 3, 6, 10]);
    }

    #[test]
    fn test_discard_ceiling() {
        let config = TestConfig::new(0, 50, 10).unwrap();
        assert_eq!(config.discard_ceiling(), 500);
    }

    #[test]
    fn test_global_config_defaults() {
        let global = GlobalConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(global, GlobalConfig::default());
        assert_eq!(global.default_number_of_tests, 500);
        assert_eq!(global.default_maximum_size, 200);
        assert!(global.default_seed.is_none());
    }

    #[test]
    fn test_global_config_from_lookup() {
        let global = GlobalConfig::from_lookup(lookup(&[
            (SEED_VAR, "1234"),
            (NUMBER_OF_TESTS_VAR, " 25 "),
            (MAXIMUM_SIZE_VAR, "8"),
        ]))
        .unwrap();

        assert_eq!(global.default_seed, Some(1234));
        assert_eq!(global.default_number_of_tests, 25);
        assert_eq!(global.default_maximum_size, 8);
    }

    #[test]
    fn test_global_config_rejects_garbage() {
        let error = GlobalConfig::from_lookup(lookup(&[(SEED_VAR, "soon")])).unwrap_err();
        assert_eq!(
            error,
            ConfigError::InvalidEnvironmentValue {
                variable: SEED_VAR.to_string(),
                value: "soon".to_string(),
            }
        );

        let error = GlobalConfig::from_lookup(lookup(&[(NUMBER_OF_TESTS_VAR, "0")])).unwrap_err();
        assert_eq!(error, ConfigError::InvalidNumberOfTests(0));
    }

    #[test]
    fn test_overrides_take_precedence() {
        let global = GlobalConfig {
            default_seed: Some(9),
            default_number_of_tests: 10,
            default_maximum_size: 20,
        };

        let config = TestConfig::from_global_with_overrides(&global, None, None, None).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.number_of_tests, 10);
        assert_eq!(config.maximum_size, 20);

        let config =
            TestConfig::from_global_with_overrides(&global, Some(1), Some(2), Some(3)).unwrap();
        assert_eq!(config.seed, 1);
        assert_eq!(config.number_of_tests, 2);
        assert_eq!(config.maximum_size, 3);
    }

    #[test]
    fn test_config_error_display() {
        assert_eq!(
            ConfigError::InvalidNumberOfTests(0).to_string(),
            "Invalid number of tests: 0 (must be > 0)"
        );
        assert!(
            ConfigError::InvalidEnvironmentValue {
                variable: "X".to_string(),
                value: "y".to_string(),
            }
            .to_string()
            .contains("X")
        );
    }
}
