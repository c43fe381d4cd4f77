//! Error types and the result record of a property run.

use std::fmt;

use crate::config::ConfigError;

/// Conditions that end a run without a verdict on the property itself.
///
/// A property that is simply false is *not* an error: it is reported through
/// [`PropertyResult`] with `succeeded == false`. The variants here mean the
/// run could not produce a meaningful verdict, and need a different fix.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyError {
    /// A filtering generator exhausted its retry budget
    GenerationFailed { message: String, attempts: usize },

    /// Too many trials were discarded before enough valid ones were gathered
    PreconditionExhausted { passed: usize, discarded: usize },

    /// Invalid run configuration
    Config(ConfigError),
}

impl fmt::Display for PropertyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyError::GenerationFailed { message, attempts } => {
                write!(f, "Generation failed: {}", message)?;
                write!(f, " (after {} attempts)", attempts)
            }
            PropertyError::PreconditionExhausted { passed, discarded } => {
                write!(
                    f,
                    "Unable to satisfy preconditions: {} trials discarded after {} passed",
                    discarded, passed
                )
            }
            PropertyError::Config(error) => write!(f, "Configuration error: {}", error),
        }
    }
}

impl std::error::Error for PropertyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PropertyError::Config(error) => Some(error),
            _ => None,
        }
    }
}

impl From<ConfigError> for PropertyError {
    fn from(error: ConfigError) -> Self {
        PropertyError::Config(error)
    }
}

impl PropertyError {
    /// Create a generation failed error
    pub fn generation_failed(message: impl Into<String>, attempts: usize) -> Self {
        Self::GenerationFailed {
            message: message.into(),
            attempts,
        }
    }

    /// Create a precondition exhausted error
    pub fn precondition_exhausted(passed: usize, discarded: usize) -> Self {
        Self::PreconditionExhausted { passed, discarded }
    }
}

/// Outcome of one property run, produced once and never mutated.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyResult<T> {
    /// Whether every counted trial passed
    pub succeeded: bool,
    /// Seed that reproduces this run
    pub seed: u64,
    /// Counted (non-discarded) trials, including the failing one
    pub number_of_tests_run: usize,
    /// Trials discarded because a precondition was not met
    pub number_of_discards: usize,
    /// Size at which the first failure was drawn
    pub failing_size: Option<usize>,
    /// The first failing value, before shrinking
    pub failing_value: Option<T>,
    /// The minimal failing value found by shrinking
    pub smallest_failing_value: Option<T>,
    /// Failure reason reported for the minimal value
    pub failure_reason: Option<String>,
    /// Number of successful shrink replacements
    pub shrink_step_count: usize,
    /// False when shrinking stopped at the step limit
    pub shrink_completed: bool,
}

impl<T> PropertyResult<T> {
    pub(crate) fn passed(seed: u64, number_of_tests_run: usize, number_of_discards: usize) -> Self {
        Self {
            succeeded: true,
            seed,
            number_of_tests_run,
            number_of_discards,
            failing_size: None,
            failing_value: None,
            smallest_failing_value: None,
            failure_reason: None,
            shrink_step_count: 0,
            shrink_completed: true,
        }
    }

    /// One-line rendering of the minimal counterexample, if any
    pub fn single_line_description_of_smallest_value(&self) -> Option<String>
    where
        T: fmt::Debug,
    {
        self.smallest_failing_value
            .as_ref()
            .map(|value| format!("{:?}", value).replace('\n', " "))
    }

    /// Concise summary suitable for a failing test message
    pub fn summary(&self) -> String
    where
        T: fmt::Debug,
    {
        if self.succeeded {
            return format!(
                "Property passed {} tests (seed: {}, discarded: {})",
                self.number_of_tests_run, self.seed, self.number_of_discards
            );
        }

        let smallest = self
            .single_line_description_of_smallest_value()
            .unwrap_or_else(|| "<none>".to_string());
        let mut summary = format!("Property failed with: {}", smallest);
        if let Some(reason) = &self.failure_reason {
            summary.push_str(&format!(" ({})", reason));
        }
        summary.push_str(&format!(
            " [seed: {}, tests: {}, size: {}, shrinks: {}",
            self.seed,
            self.number_of_tests_run,
            self.failing_size.unwrap_or_default(),
            self.shrink_step_count
        ));
        if !self.shrink_completed {
            summary.push_str(", shrinking stopped early");
        }
        summary.push(']');
        summary
    }

    /// Multi-line report including the original failing value
    pub fn detailed_report(&self) -> String
    where
        T: fmt::Debug,
    {
        let mut report = String::new();
        report.push_str(&format!("{}\n", self.summary()));

        if let Some(original) = &self.failing_value {
            report.push_str(&format!("Original input: {:?}\n", original));
        }
        if let Some(shrunk) = &self.smallest_failing_value {
            report.push_str(&format!("Shrunk input: {:?}\n", shrunk));
            report.push_str(&format!("Shrinking steps: {}\n", self.shrink_step_count));
        }
        report.push_str(&format!(
            "Reproduce with: seed={} (use this to reproduce the failure)\n",
            self.seed
        ));

        report
    }
}

impl<T: fmt::Debug> fmt::Display for PropertyResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed() -> PropertyResult<Vec<i32>> {
        PropertyResult {
            succeeded: false,
            seed: 42,
            number_of_tests_run: 7,
            number_of_discards: 1,
            failing_size: Some(12),
            failing_value: Some(vec![9, 4, 7]),
            smallest_failing_value: Some(vec![7]),
            failure_reason: Some("predicate returned false".to_string()),
            shrink_step_count: 3,
            shrink_completed: true,
        }
    }

    #[test]
    fn test_property_error_display() {
        let error = PropertyError::generation_failed("no value matched the filter", 3);
        assert_eq!(
            error.to_string(),
            "Generation failed: no value matched the filter (after 3 attempts)"
        );

        let error = PropertyError::precondition_exhausted(4, 1000);
        assert_eq!(
            error.to_string(),
            "Unable to satisfy preconditions: 1000 trials discarded after 4 passed"
        );

        let error: PropertyError = ConfigError::InvalidNumberOfTests(0).into();
        assert!(error.to_string().starts_with("Configuration error:"));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_summary_of_failure() {
        let summary = failed().summary();
        assert!(summary.starts_with("Property failed with: [7]"));
        assert!(summary.contains("seed: 42"));
        assert!(summary.contains("size: 12"));
        assert!(summary.contains("shrinks: 3"));
        assert!(!summary.contains('\n'));
    }

    #[test]
    fn test_summary_of_success() {
        let result: PropertyResult<i32> = PropertyResult::passed(5, 100, 2);
        assert_eq!(result.summary(), "Property passed 100 tests (seed: 5, discarded: 2)");
        assert!(result.single_line_description_of_smallest_value().is_none());
    }

    #[test]
    fn test_detailed_report() {
        let report = failed().detailed_report();
        assert!(report.contains("Original input: [9, 4, 7]"));
        assert!(report.contains("Shrunk input: [7]"));
        assert!(report.contains("seed=42"));
    }

    #[test]
    fn test_single_line_description_flattens_newlines() {
        let mut result = failed();
        result.smallest_failing_value = None;
        let text: PropertyResult<String> = PropertyResult {
            smallest_failing_value: Some("a\nb".to_string()),
            ..PropertyResult::passed(1, 1, 0)
        };
        assert_eq!(
            text.single_line_description_of_smallest_value().as_deref(),
            Some("\"a\\nb\"")
        );
        assert!(result.single_line_description_of_smallest_value().is_none());
    }
}
