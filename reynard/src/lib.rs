//! # Reynard - Property-Based Testing for Rust
//!
//! Reynard generates random inputs for a property, runs it on a ramp of
//! growing sizes, and when the property fails shrinks the input to a minimal
//! counterexample. Shrinking is integrated: every generated value carries a
//! lazy tree of smaller candidates, so shrinks of mapped, filtered and bound
//! generators stay valid by construction.
//!
//! ## Quick Start
//!
//! ```rust
//! use reynard::{AssertOptions, array, assert_property, choose, for_all};
//!
//! let reversed_twice = for_all(array(choose(-100i32, 100)), |values| {
//!     let mut copy = values.clone();
//!     copy.reverse();
//!     copy.reverse();
//!     copy == *values
//! });
//!
//! assert_property(&reversed_twice, AssertOptions::new().number_of_tests(50));
//! ```
//!
//! Runs are reproducible from their seed. Set `REYNARD_SEED`,
//! `REYNARD_NUMBER_OF_TESTS` or `REYNARD_MAXIMUM_SIZE` to change the
//! defaults for every property in a test binary.

pub mod any;
pub mod choice;
pub mod collections;
pub mod config;
pub mod error;
pub mod generator;
pub mod numeric;
pub mod property;
pub mod rng;
pub mod rose;
pub mod runner;
pub mod test_runner;
pub mod text;

// Re-export the main public API
pub use any::{AnyValue, any_printable_value, any_value, composite_type, printable_simple_type, simple_type};
pub use choice::{choose, elements, frequency, one_of};
pub use collections::{
    array, array_in_range, array_of_length, dictionary, dictionary_of, set, tuple, tuple2, tuple3,
};
pub use config::{ConfigError, GlobalConfig, TestConfig};
pub use error::{PropertyError, PropertyResult};
pub use generator::{Gen, GenResult, Generator, Size, pure, returns, sized};
pub use numeric::{
    boolean, double, float, integer, negative_integer, positive_integer, strict_negative_integer,
    strict_positive_integer,
};
pub use property::{Property, PropertyStatus, TrialResult, for_all, for_some};
pub use rng::RandomSource;
pub use rose::RoseTree;
pub use runner::{Runner, check, check_with_config};
pub use test_runner::{AssertOptions, assert_property, run_property};
pub use text::{
    alphabetical_character, alphabetical_string, alphabetical_string_in_range,
    alphabetical_string_of_length, alphanumeric_character, alphanumeric_string, ascii_character,
    ascii_string, ascii_string_in_range, ascii_string_of_length, character, numeric_character,
    numeric_string, string, string_in_range, string_of_length,
};
