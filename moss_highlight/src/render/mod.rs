//! Turning moss source text into annotated HTML
//!
//! [`highlight`] is the whole contract of the crate: a pure, total function
//! from source text to markup. It scans and emits in one left-to-right pass;
//! no token list is built. [`Highlighter`] is the same transform with
//! preferences and metrics attached, for callers that process many blocks.

pub mod highlighter;
pub mod markup;

use crate::config::runtime::HighlightPreferences;
use crate::lexical::Scanner;

pub use highlighter::{HighlightMetrics, Highlighter};

/// Highlight `source` with the default preferences
pub fn highlight(source: &str) -> String {
    highlight_with_preferences(source, &HighlightPreferences::default())
}

/// Highlight `source` with custom runtime preferences
pub fn highlight_with_preferences(source: &str, preferences: &HighlightPreferences) -> String {
    let mut out = String::with_capacity(source.len() * 2);
    for token in Scanner::with_preferences(source, preferences) {
        markup::write_token(&mut out, &token);
    }
    out
}
