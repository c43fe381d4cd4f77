//! Properties: generators whose values carry a pass/fail/discard verdict.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::generator::Gen;

/// Verdict of a property on one value
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropertyStatus {
    Success,
    Failure(String),
    /// The value did not meet a precondition and does not count as a trial
    Discard,
}

impl PropertyStatus {
    /// Failure with a reason
    pub fn failure(reason: impl Into<String>) -> Self {
        PropertyStatus::Failure(reason.into())
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, PropertyStatus::Failure(_))
    }
}

impl From<bool> for PropertyStatus {
    fn from(passed: bool) -> Self {
        if passed {
            PropertyStatus::Success
        } else {
            PropertyStatus::Failure("predicate returned false".to_string())
        }
    }
}

/// A drawn value paired with the property's verdict on it
#[derive(Debug, Clone, PartialEq)]
pub struct TrialResult<T> {
    pub value: T,
    pub status: PropertyStatus,
}

/// A property is a generator of verdicts; shrinking it shrinks the input
pub type Property<T> = Gen<TrialResult<T>>;

/// Property that `predicate` holds for every value of `generator`
pub fn for_all<T, F>(generator: Gen<T>, predicate: F) -> Property<T>
where
    T: 'static,
    F: Fn(&T) -> bool + 'static,
{
    for_some(generator, move |value| PropertyStatus::from(predicate(value)))
}

/// Property whose verdict on each value is computed by `status`.
///
/// Returning [`PropertyStatus::Discard`] rejects the value as not meeting a
/// precondition.
pub fn for_some<T, F>(generator: Gen<T>, status: F) -> Property<T>
where
    T: 'static,
    F: Fn(&T) -> PropertyStatus + 'static,
{
    generator.map(move |value| {
        let status = evaluate(&status, &value);
        TrialResult { value, status }
    })
}

/// Run a verdict function, turning a panic into a failure
pub(crate) fn evaluate<T, F>(status: &F, value: &T) -> PropertyStatus
where
    F: Fn(&T) -> PropertyStatus,
{
    match panic::catch_unwind(AssertUnwindSafe(|| status(value))) {
        Ok(status) => status,
        Err(payload) => PropertyStatus::Failure(format!("panicked: {}", panic_message(&*payload))),
    }
}

/// Best-effort text of a panic payload
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
