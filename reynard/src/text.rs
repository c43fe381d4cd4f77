//! Character and string generators.

use std::rc::Rc;

use crate::choice::choose;
use crate::collections::{array, array_in_range, array_of_length};
use crate::generator::Gen;

const ALPHABETICAL: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const NUMERIC: &str = "0123456789";
const ALPHANUMERIC: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// How long a generated string may be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Length {
    Sized,
    Exactly(usize),
    Between(usize, usize),
}

fn from_alphabet(alphabet: &'static str) -> Gen<char> {
    let symbols: Rc<Vec<char>> = Rc::new(alphabet.chars().collect());
    choose(0usize, symbols.len() - 1).map(move |index| symbols[index])
}

fn string_with(characters: Gen<char>, length: Length) -> Gen<String> {
    let chars = match length {
        Length::Sized => array(characters),
        Length::Exactly(len) => array_of_length(characters, len),
        Length::Between(min, max) => array_in_range(characters, min, max),
    };
    chars.map(|chars| chars.into_iter().collect())
}

/// Any character in `0..=255`; shrinks toward `'\0'`
pub fn character() -> Gen<char> {
    choose(0u8, 255).map(char::from)
}

/// Printable ASCII character (`' '..='~'`); shrinks toward `' '`
pub fn ascii_character() -> Gen<char> {
    choose(32u8, 126).map(char::from)
}

/// `A-Z` or `a-z`; shrinks toward `'A'`
pub fn alphabetical_character() -> Gen<char> {
    from_alphabet(ALPHABETICAL)
}

/// `0-9`; shrinks toward `'0'`
pub fn numeric_character() -> Gen<char> {
    from_alphabet(NUMERIC)
}

/// `0-9`, `A-Z` or `a-z`; shrinks toward `'0'`
pub fn alphanumeric_character() -> Gen<char> {
    from_alphabet(ALPHANUMERIC)
}

pub fn string() -> Gen<String> {
    string_with(character(), Length::Sized)
}

pub fn string_of_length(len: usize) -> Gen<String> {
    string_with(character(), Length::Exactly(len))
}

pub fn string_in_range(min_len: usize, max_len: usize) -> Gen<String> {
    string_with(character(), Length::Between(min_len, max_len))
}

pub fn ascii_string() -> Gen<String> {
    string_with(ascii_character(), Length::Sized)
}

pub fn ascii_string_of_length(len: usize) -> Gen<String> {
    string_with(ascii_character(), Length::Exactly(len))
}

pub fn ascii_string_in_range(min_len: usize, max_len: usize) -> Gen<String> {
    string_with(ascii_character(), Length::Between(min_len, max_len))
}

pub fn alphabetical_string() -> Gen<String> {
    string_with(alphabetical_character(), Length::Sized)
}

pub fn alphabetical_string_of_length(len: usize) -> Gen<String> {
    string_with(alphabetical_character(), Length::Exactly(len))
}

pub fn alphabetical_string_in_range(min_len: usize, max_len: usize) -> Gen<String> {
    string_with(alphabetical_character(), Length::Between(min_len, max_len))
}

pub fn alphanumeric_string() -> Gen<String> {
    string_with(alphanumeric_character(), Length::Sized)
}

pub fn numeric_string() -> Gen<String> {
    string_with(numeric_character(), Length::Sized)
}
