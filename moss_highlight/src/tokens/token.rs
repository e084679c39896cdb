//! Classified spans produced by the scanner
use crate::config::constants::markup;
use crate::utils::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lexical category of a token. Categories are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Identifier found in the keyword set
    Keyword,
    /// Any other identifier, emitted without markup
    PlainIdentifier,
    /// Run of ASCII digits
    Number,
    /// Single- or double-quoted string including its delimiters
    String,
    /// `#` line comment or `/* */` block comment
    Comment,
    /// `&...;` symbolic escape
    Entity,
    /// One of `()[]{}`
    Bracket,
    /// One of `+-*/|.=!:%^$`
    Operator,
    /// Any other single character, emitted without markup
    Other,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Keyword,
        Category::PlainIdentifier,
        Category::Number,
        Category::String,
        Category::Comment,
        Category::Entity,
        Category::Bracket,
        Category::Operator,
        Category::Other,
    ];

    /// CSS class of the wrapper, `None` for categories emitted verbatim
    pub const fn css_class(self) -> Option<&'static str> {
        match self {
            Self::Keyword => Some(markup::KEYWORD_CLASS),
            Self::Number => Some(markup::NUMBER_CLASS),
            Self::String => Some(markup::STRING_CLASS),
            Self::Comment => Some(markup::COMMENT_CLASS),
            Self::Bracket => Some(markup::BRACKET_CLASS),
            Self::Entity | Self::Operator => Some(markup::SYMBOL_CLASS),
            Self::PlainIdentifier | Self::Other => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::PlainIdentifier => "plain_identifier",
            Self::Number => "number",
            Self::String => "string",
            Self::Comment => "comment",
            Self::Entity => "entity",
            Self::Bracket => "bracket",
            Self::Operator => "operator",
            Self::Other => "other",
        }
    }

    /// Index into `ALL`, used by the metrics counters
    pub const fn index(self) -> usize {
        match self {
            Self::Keyword => 0,
            Self::PlainIdentifier => 1,
            Self::Number => 2,
            Self::String => 3,
            Self::Comment => 4,
            Self::Entity => 5,
            Self::Bracket => 6,
            Self::Operator => 7,
            Self::Other => 8,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One classified span of the source.
///
/// `text` is the slice of the source that is emitted; `terminator` is
/// emitted after it but does not occur in the source (unterminated strings,
/// comments and entities). `span` covers everything the scanner consumed,
/// which is `text` except in legacy block comment mode where the two
/// characters standing in for `*/` are consumed but not emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    pub category: Category,
    pub text: &'a str,
    pub terminator: Option<&'static str>,
    pub span: Span,
}

impl<'a> Token<'a> {
    pub fn new(category: Category, text: &'a str, span: Span) -> Self {
        Self {
            category,
            text,
            terminator: None,
            span,
        }
    }

    pub fn with_terminator(mut self, terminator: &'static str) -> Self {
        self.terminator = Some(terminator);
        self
    }

    /// Whether the emitted text contains something the source did not
    pub fn is_synthetic(&self) -> bool {
        self.terminator.is_some()
    }

    /// Text as it will appear inside the markup
    pub fn emitted_text(&self) -> String {
        match self.terminator {
            Some(terminator) => format!("{}{}", self.text, terminator),
            None => self.text.to_string(),
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} at {}", self.category, self.text, self.span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Position;

    #[test]
    fn test_css_classes() {
        assert_eq!(Category::Keyword.css_class(), Some("keyword"));
        assert_eq!(Category::Entity.css_class(), Some("symbol"));
        assert_eq!(Category::Operator.css_class(), Some("symbol"));
        assert_eq!(Category::Bracket.css_class(), Some("bracket"));
        assert_eq!(Category::PlainIdentifier.css_class(), None);
        assert_eq!(Category::Other.css_class(), None);
    }

    #[test]
    fn test_category_index_matches_all() {
        for (i, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }

    #[test]
    fn test_emitted_text_includes_terminator() {
        let span = Span::new(Position::start(), Position::new(4, 1, 5));
        let token = Token::new(Category::Entity, "&amp", span).with_terminator(";");

        assert!(token.is_synthetic());
        assert_eq!(token.emitted_text(), "&amp;");
    }
}
