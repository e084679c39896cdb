//! Markup emission for classified tokens
//!
//! Wrapped content is written as-is. Code blocks taken from an HTML page
//! already carry their markup-significant characters as entities (`&lt;`),
//! which the scanner classifies as entities and re-emits untouched; raw `<`
//! in the source is not escaped here either.

use crate::config::constants::markup::{WRAPPER_CLOSE, WRAPPER_OPEN_PREFIX, WRAPPER_OPEN_SUFFIX};
use crate::tokens::Token;

/// Append one token to `out`, wrapped when its category has a CSS class
pub fn write_token(out: &mut String, token: &Token<'_>) {
    match token.category.css_class() {
        Some(class) => {
            out.push_str(WRAPPER_OPEN_PREFIX);
            out.push_str(class);
            out.push_str(WRAPPER_OPEN_SUFFIX);
            write_text(out, token);
            out.push_str(WRAPPER_CLOSE);
        }
        None => write_text(out, token),
    }
}

fn write_text(out: &mut String, token: &Token<'_>) {
    out.push_str(token.text);
    if let Some(terminator) = token.terminator {
        out.push_str(terminator);
    }
}
