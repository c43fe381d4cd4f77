//! Generators over a closed, dynamically typed value model.

use std::collections::BTreeMap;

use crate::choice::{frequency, one_of};
use crate::collections::{array, dictionary_of};
use crate::generator::{Gen, sized};
use crate::numeric::{boolean, double, integer};
use crate::text::{alphanumeric_string, ascii_character, ascii_string, character, string};

/// A dynamically typed value
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnyValue {
    Bool(bool),
    Integer(i64),
    Double(f64),
    Char(char),
    String(String),
    List(Vec<AnyValue>),
    Map(BTreeMap<String, AnyValue>),
}

impl AnyValue {
    /// Nesting depth; scalars are 0
    pub fn depth(&self) -> usize {
        match self {
            AnyValue::List(items) => 1 + items.iter().map(AnyValue::depth).max().unwrap_or(0),
            AnyValue::Map(entries) => 1 + entries.values().map(AnyValue::depth).max().unwrap_or(0),
            _ => 0,
        }
    }

    pub fn is_simple(&self) -> bool {
        !matches!(self, AnyValue::List(_) | AnyValue::Map(_))
    }
}

/// Boolean, integer, double, character or string
pub fn simple_type() -> Gen<AnyValue> {
    one_of(vec![
        boolean().map(AnyValue::Bool),
        integer().map(AnyValue::Integer),
        double().map(AnyValue::Double),
        character().map(AnyValue::Char),
        string().map(AnyValue::String),
    ])
}

/// Like [`simple_type`], restricted to printable characters
pub fn printable_simple_type() -> Gen<AnyValue> {
    one_of(vec![
        boolean().map(AnyValue::Bool),
        integer().map(AnyValue::Integer),
        double().map(AnyValue::Double),
        ascii_character().map(AnyValue::Char),
        ascii_string().map(AnyValue::String),
    ])
}

/// A list of, or an alphanumeric-keyed map of, `element` values
pub fn composite_type(element: Gen<AnyValue>) -> Gen<AnyValue> {
    one_of(vec![
        array(element.clone()).map(AnyValue::List),
        dictionary_of(alphanumeric_string(), element).map(AnyValue::Map),
    ])
}

/// Any value; nested containers halve the size at every level
pub fn any_value() -> Gen<AnyValue> {
    recursive(simple_type)
}

/// [`any_value`] built from printable scalars
pub fn any_printable_value() -> Gen<AnyValue> {
    recursive(printable_simple_type)
}

fn recursive(leaf: fn() -> Gen<AnyValue>) -> Gen<AnyValue> {
    sized(move |size| {
        if size == 0 {
            return leaf();
        }
        let nested = composite_type(recursive(leaf)).resize(size / 2);
        frequency(vec![(2, leaf()), (1, nested)])
    })
}
