//! Character classes and the keyword table

use crate::config::constants::lexical::{BRACKETS, KEYWORDS, OPERATORS};
use std::collections::HashSet;
use std::sync::OnceLock;

static KEYWORD_SET: OnceLock<HashSet<&'static str>> = OnceLock::new();

/// The process-wide keyword set, built on first use
pub fn keyword_set() -> &'static HashSet<&'static str> {
    KEYWORD_SET.get_or_init(|| KEYWORDS.iter().copied().collect())
}

/// Exact, case-sensitive keyword lookup
pub fn is_keyword(word: &str) -> bool {
    keyword_set().contains(word)
}

pub fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

pub fn is_identifier_continue(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

pub fn is_number_char(ch: char) -> bool {
    ch.is_ascii_digit()
}

pub fn is_bracket(ch: char) -> bool {
    BRACKETS.contains(ch)
}

pub fn is_operator(ch: char) -> bool {
    OPERATORS.contains(ch)
}
