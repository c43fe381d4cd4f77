//! Test-harness integration: run a property inside `#[test]` and panic with
//! a readable report when it fails.

use std::fmt;

use tracing::debug;

use crate::config::{GlobalConfig, TestConfig};
use crate::error::{PropertyError, PropertyResult};
use crate::property::Property;
use crate::runner::Runner;

/// Per-call overrides for [`assert_property`]; unset fields fall back to
/// the environment, then to library defaults
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssertOptions {
    pub seed: Option<u64>,
    pub number_of_tests: Option<usize>,
    pub maximum_size: Option<usize>,
}

impl AssertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn number_of_tests(mut self, number_of_tests: usize) -> Self {
        self.number_of_tests = Some(number_of_tests);
        self
    }

    pub fn maximum_size(mut self, maximum_size: usize) -> Self {
        self.maximum_size = Some(maximum_size);
        self
    }

    /// Resolve against global defaults
    pub fn resolve(&self, global: &GlobalConfig) -> Result<TestConfig, PropertyError> {
        Ok(TestConfig::from_global_with_overrides(
            global,
            self.seed,
            self.number_of_tests,
            self.maximum_size,
        )?)
    }
}

/// Run `property` and return the result without panicking
pub fn run_property<T>(
    property: &Property<T>,
    options: &AssertOptions,
) -> Result<PropertyResult<T>, PropertyError>
where
    T: Clone + fmt::Debug + 'static,
{
    let global = GlobalConfig::from_env()?;
    let config = options.resolve(&global)?;
    Runner::new(config).run(property)
}

/// Assert that `property` holds, panicking with a one-line summary of the
/// counterexample and seed otherwise. The full report is logged at debug level.
///
/// # Panics
///
/// Panics when the property fails, when generation or preconditions give
/// out, or when the configuration is invalid.
#[track_caller]
pub fn assert_property<T>(property: &Property<T>, options: AssertOptions)
where
    T: Clone + fmt::Debug + 'static,
{
    match run_property(property, &options) {
        Ok(result) if result.succeeded => {}
        Ok(result) => {
            debug!(report = %result.detailed_report(), "property failed");
            panic!("{}", result.summary())
        }
        Err(error) => panic!("{}", error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::choose;
    use crate::config::DEFAULT_MAXIMUM_SIZE;
    use crate::property::{PropertyStatus, for_all, for_some};

    fn options() -> AssertOptions {
        AssertOptions::new().seed(42).number_of_tests(100).maximum_size(100)
    }

    #[test]
    fn test_resolve_prefers_options() {
        let global = GlobalConfig {
            default_seed: Some(1),
            default_number_of_tests: 7,
            default_maximum_size: 9,
        };
        let config = options().resolve(&global).unwrap();
        assert_eq!((config.seed, config.number_of_tests, config.maximum_size), (42, 100, 100));

        let config = AssertOptions::new().resolve(&global).unwrap();
        assert_eq!((config.seed, config.number_of_tests, config.maximum_size), (1, 7, 9));
    }

    #[test]
    fn test_resolve_rejects_zero_tests() {
        let result = AssertOptions::new()
            .number_of_tests(0)
            .resolve(&GlobalConfig::default());
        assert!(matches!(result, Err(PropertyError::Config(_))));
    }

    #[test]
    fn test_resolve_uses_defaults() {
        let config = AssertOptions::new().seed(3).resolve(&GlobalConfig::default()).unwrap();
        assert_eq!(config.maximum_size, DEFAULT_MAXIMUM_SIZE);
    }

    #[test]
    fn test_assert_property_passes() {
        assert_property(&for_all(choose(0i32, 100), |x| *x <= 100), options());
    }

    #[test]
    #[should_panic(expected = "Property failed with: 50")]
    fn test_assert_property_reports_counterexample() {
        assert_property(&for_all(choose(0i32, 100), |x| *x < 50), options());
    }

    #[test]
    fn test_assert_property_panics_with_single_line_summary() {
        let payload = std::panic::catch_unwind(|| {
            assert_property(&for_all(choose(0i32, 100), |x| *x < 50), options());
        })
        .unwrap_err();
        let message = crate::property::panic_message(&*payload);

        assert!(message.starts_with("Property failed with: 50"), "{message}");
        assert!(message.contains("seed: 42"), "{message}");
        assert!(!message.contains('\n'), "{message}");
    }

    #[test]
    #[should_panic(expected = "Unable to satisfy preconditions")]
    fn test_assert_property_reports_discard_exhaustion() {
        assert_property(
            &for_some(choose(0i32, 9), |_| PropertyStatus::Discard),
            options(),
        );
    }
}
