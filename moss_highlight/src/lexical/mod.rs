//! Lexical scanning of moss source text
//!
//! [`Scanner`] walks the source once, left to right, yielding classified
//! [`Token`](crate::tokens::Token)s. The character classes and the keyword
//! table it dispatches on live in [`classify`].

pub mod classify;
pub mod scanner;

use crate::config::runtime::HighlightPreferences;
use crate::tokens::Token;

pub use classify::{is_keyword, keyword_set};
pub use scanner::Scanner;

/// Collect every token of `source` using the default preferences
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    Scanner::new(source).collect()
}

/// Collect every token of `source` with custom runtime preferences
pub fn tokenize_with_preferences<'a>(
    source: &'a str,
    preferences: &HighlightPreferences,
) -> Vec<Token<'a>> {
    Scanner::with_preferences(source, preferences).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::runtime::BlockCommentScan;
    use crate::tokens::Category;

    #[test]
    fn test_tokenize_module_api() {
        let tokens = tokenize("while x do");
        let kinds: Vec<Category> = tokens.iter().map(|t| t.category).collect();
        assert_eq!(
            kinds,
            vec![
                Category::Keyword,
                Category::Other,
                Category::PlainIdentifier,
                Category::Other,
                Category::Keyword,
            ]
        );
    }

    #[test]
    fn test_tokenize_respects_scan_mode() {
        let prefs = HighlightPreferences::default().with_block_comment_scan(BlockCommentScan::Legacy);
        let contiguous = tokenize("/* a*b */");
        let legacy = tokenize_with_preferences("/* a*b */", &prefs);

        assert_eq!(contiguous.len(), 1);
        assert_eq!(legacy.len(), 4);
    }
}
