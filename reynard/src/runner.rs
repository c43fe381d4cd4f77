//! Property execution: trials on a size ramp, then a greedy shrink search.

use std::fmt;

use tracing::{debug, trace};

use crate::config::{GlobalConfig, TestConfig};
use crate::error::{PropertyError, PropertyResult};
use crate::generator::{Generator, Size};
use crate::property::{Property, PropertyStatus, TrialResult};
use crate::rng::RandomSource;
use crate::rose::RoseTree;

/// Runs properties under one configuration.
///
/// Running is deterministic: the same configuration and property always
/// produce the same trials, counterexample and shrink count.
#[derive(Debug, Clone)]
pub struct Runner {
    config: TestConfig,
}

impl Runner {
    pub fn new(config: TestConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TestConfig {
        &self.config
    }

    /// Run `property` and report the outcome.
    ///
    /// A false property is `Ok` with `succeeded == false`; `Err` means no
    /// verdict could be reached.
    pub fn run<T>(&self, property: &Property<T>) -> Result<PropertyResult<T>, PropertyError>
    where
        T: Clone + fmt::Debug + 'static,
    {
        self.config.validate()?;

        let seed = self.config.seed;
        let ceiling = self.config.discard_ceiling();
        let mut source = RandomSource::from_seed(seed);
        let mut passed = 0;
        let mut discarded = 0;

        while passed < self.config.number_of_tests {
            let size = self.config.size_for_trial(passed + 1);
            let (draw, rest) = source.split();
            source = rest;

            let tree = property.generate(size, draw)?;
            match &tree.value().status {
                PropertyStatus::Success => {
                    passed += 1;
                    trace!(trial = passed, size, value = ?tree.value().value, "trial passed");
                }
                PropertyStatus::Discard => {
                    discarded += 1;
                    trace!(discarded, size, "trial discarded");
                    if discarded > ceiling {
                        debug!(seed, passed, discarded, "too many discarded trials");
                        return Err(PropertyError::precondition_exhausted(passed, discarded));
                    }
                }
                PropertyStatus::Failure(reason) => {
                    passed += 1;
                    debug!(seed, trial = passed, size, %reason, "property failed, shrinking");
                    return Ok(self.shrink(tree, size, passed, discarded));
                }
            }
        }

        debug!(seed, passed, discarded, "property passed");
        Ok(PropertyResult::passed(seed, passed, discarded))
    }

    fn shrink<T>(
        &self,
        failing: RoseTree<TrialResult<T>>,
        size: Size,
        number_of_tests_run: usize,
        number_of_discards: usize,
    ) -> PropertyResult<T>
    where
        T: Clone + fmt::Debug + 'static,
    {
        let failing_value = failing.value().value.clone();
        let mut current = failing;
        let mut steps = 0;
        let mut completed = true;

        loop {
            if steps >= self.config.max_shrink_steps {
                completed = false;
                break;
            }
            match current
                .shrinks()
                .find(|candidate| candidate.value().status.is_failure())
            {
                Some(next) => {
                    current = next;
                    steps += 1;
                    trace!(step = steps, value = ?current.value().value, "shrunk");
                }
                None => break,
            }
        }

        debug!(steps, completed, value = ?current.value().value, "shrinking finished");

        let TrialResult { value, status } = current.into_value();
        let failure_reason = match status {
            PropertyStatus::Failure(reason) => Some(reason),
            _ => None,
        };

        PropertyResult {
            succeeded: false,
            seed: self.config.seed,
            number_of_tests_run,
            number_of_discards,
            failing_size: Some(size),
            failing_value: Some(failing_value),
            smallest_failing_value: Some(value),
            failure_reason,
            shrink_step_count: steps,
            shrink_completed: completed,
        }
    }
}

/// Run with defaults taken from the environment
pub fn check<T>(property: &Property<T>) -> Result<PropertyResult<T>, PropertyError>
where
    T: Clone + fmt::Debug + 'static,
{
    let global = GlobalConfig::from_env()?;
    let config = TestConfig::from_global_with_overrides(&global, None, None, None)?;
    check_with_config(property, config)
}

/// Run with an explicit configuration
pub fn check_with_config<T>(
    property: &Property<T>,
    config: TestConfig,
) -> Result<PropertyResult<T>, PropertyError>
where
    T: Clone + fmt::Debug + 'static,
{
    Runner::new(config).run(property)
}
