//! Single-pass cursor scanner for moss source text
//!
//! The scanner looks at the character under the cursor, picks the first
//! matching rule (identifier, number, string, line comment, block comment,
//! entity, bracket, operator, other) and consumes the longest span that rule
//! accepts. Every rule consumes at least one character, so scanning always
//! terminates in time proportional to the input length. No input is
//! rejected: unterminated constructs run to the end of the input and get a
//! synthetic terminator.

use super::classify::{
    is_bracket, is_identifier_continue, is_identifier_start, is_keyword, is_number_char,
    is_operator,
};
use crate::config::constants::lexical::{
    BLOCK_COMMENT_CLOSE, BLOCK_COMMENT_OPEN, DOUBLE_QUOTE, ENTITY_CLOSE, ENTITY_OPEN,
    LINE_COMMENT, SINGLE_QUOTE,
};
use crate::config::runtime::{BlockCommentScan, HighlightPreferences};
use crate::tokens::{Category, Token};
use crate::utils::{Position, Span};

/// Iterator over the tokens of one source text
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    source: &'a str,
    position: Position,
    block_comment_scan: BlockCommentScan,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::with_block_comment_scan(source, BlockCommentScan::default())
    }

    pub fn with_preferences(source: &'a str, preferences: &HighlightPreferences) -> Self {
        Self::with_block_comment_scan(source, preferences.block_comment_scan)
    }

    pub fn with_block_comment_scan(source: &'a str, block_comment_scan: BlockCommentScan) -> Self {
        Self {
            source,
            position: Position::start(),
            block_comment_scan,
        }
    }

    /// Position of the cursor
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_at_end(&self) -> bool {
        self.position.offset >= self.source.len()
    }

    fn rest(&self) -> &'a str {
        &self.source[self.position.offset..]
    }

    fn next_token(&mut self) -> Option<Token<'a>> {
        let rest = self.rest();
        let ch = rest.chars().next()?;

        let token = if is_identifier_start(ch) {
            let len = run_length(rest, is_identifier_continue);
            let category = if is_keyword(&rest[..len]) {
                Category::Keyword
            } else {
                Category::PlainIdentifier
            };
            self.take(category, len, len, None)
        } else if is_number_char(ch) {
            let len = run_length(rest, is_number_char);
            self.take(Category::Number, len, len, None)
        } else if ch == DOUBLE_QUOTE || ch == SINGLE_QUOTE {
            self.scan_string(rest, ch)
        } else if ch == LINE_COMMENT {
            let len = rest.find('\n').unwrap_or(rest.len());
            self.take(Category::Comment, len, len, None)
        } else if rest.starts_with(BLOCK_COMMENT_OPEN) {
            match self.block_comment_scan {
                BlockCommentScan::Contiguous => self.scan_block_comment(rest),
                BlockCommentScan::Legacy => self.scan_block_comment_legacy(rest),
            }
        } else if ch == ENTITY_OPEN {
            self.scan_entity(rest)
        } else if is_bracket(ch) {
            self.take(Category::Bracket, 1, 1, None)
        } else if is_operator(ch) {
            self.take(Category::Operator, 1, 1, None)
        } else {
            let len = ch.len_utf8();
            self.take(Category::Other, len, len, None)
        };

        Some(token)
    }

    /// Consume `consumed` bytes, emitting the first `emitted` of them
    fn take(
        &mut self,
        category: Category,
        consumed: usize,
        emitted: usize,
        terminator: Option<&'static str>,
    ) -> Token<'a> {
        let rest = self.rest();
        let start = self.position;
        let end = start.advance_str(&rest[..consumed]);
        self.position = end;

        Token {
            category,
            text: &rest[..emitted],
            terminator,
            span: Span::new(start, end),
        }
    }

    fn scan_string(&mut self, rest: &'a str, quote: char) -> Token<'a> {
        let open = quote.len_utf8();
        match rest[open..].find(quote) {
            Some(index) => {
                let len = open + index + quote.len_utf8();
                self.take(Category::String, len, len, None)
            }
            None => {
                let terminator = if quote == DOUBLE_QUOTE { "\"" } else { "'" };
                self.take(Category::String, rest.len(), rest.len(), Some(terminator))
            }
        }
    }

    fn scan_entity(&mut self, rest: &'a str) -> Token<'a> {
        match rest.find(ENTITY_CLOSE) {
            Some(index) => {
                let len = index + ENTITY_CLOSE.len_utf8();
                self.take(Category::Entity, len, len, None)
            }
            None => self.take(Category::Entity, rest.len(), rest.len(), Some(";")),
        }
    }

    fn scan_block_comment(&mut self, rest: &'a str) -> Token<'a> {
        let open = BLOCK_COMMENT_OPEN.len();
        match rest[open..].find(BLOCK_COMMENT_CLOSE) {
            Some(index) => {
                let len = open + index + BLOCK_COMMENT_CLOSE.len();
                self.take(Category::Comment, len, len, None)
            }
            None => self.take(
                Category::Comment,
                rest.len(),
                rest.len(),
                Some(BLOCK_COMMENT_CLOSE),
            ),
        }
    }

    /// Advance while the current character is not `*` and the next one is
    /// not `/`; then drop the two characters at the stop point and emit `*/`
    /// in their place. A lone trailing character is also dropped.
    fn scan_block_comment_legacy(&mut self, rest: &'a str) -> Token<'a> {
        let open = BLOCK_COMMENT_OPEN.len();
        let body = &rest[open..];

        let mut stop = body.len();
        let mut chars = body.char_indices().peekable();
        while let Some((index, ch)) = chars.next() {
            let keep_going = match chars.peek() {
                Some(&(_, next)) => ch != '*' && next != '/',
                None => false,
            };
            if !keep_going {
                stop = index;
                break;
            }
        }

        let skipped: usize = body[stop..].chars().take(2).map(char::len_utf8).sum();
        self.take(
            Category::Comment,
            open + stop + skipped,
            open + stop,
            Some(BLOCK_COMMENT_CLOSE),
        )
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

impl std::iter::FusedIterator for Scanner<'_> {}

/// Byte length of the leading run of characters accepted by `accept`.
/// The first character is assumed to be accepted already.
fn run_length(text: &str, accept: fn(char) -> bool) -> usize {
    text.char_indices()
        .skip(1)
        .find(|&(_, ch)| !accept(ch))
        .map(|(index, _)| index)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories(source: &str) -> Vec<(Category, String)> {
        Scanner::new(source)
            .map(|token| (token.category, token.emitted_text()))
            .collect()
    }

    fn legacy(source: &str) -> Vec<(Category, String)> {
        Scanner::with_block_comment_scan(source, BlockCommentScan::Legacy)
            .map(|token| (token.category, token.emitted_text()))
            .collect()
    }

    fn tok(category: Category, text: &str) -> (Category, String) {
        (category, text.to_string())
    }

    #[test]
    fn test_empty_source() {
        let mut scanner = Scanner::new("");
        assert!(scanner.is_at_end());
        assert!(scanner.next().is_none());
        assert!(scanner.next().is_none());
    }

    #[test]
    fn test_identifiers_and_keywords() {
        assert_eq!(
            categories("if iffy _x1 end"),
            vec![
                tok(Category::Keyword, "if"),
                tok(Category::Other, " "),
                tok(Category::PlainIdentifier, "iffy"),
                tok(Category::Other, " "),
                tok(Category::PlainIdentifier, "_x1"),
                tok(Category::Other, " "),
                tok(Category::Keyword, "end"),
            ]
        );
    }

    #[test]
    fn test_numbers_are_digit_runs_only() {
        assert_eq!(
            categories("123abc 1.5"),
            vec![
                tok(Category::Number, "123"),
                tok(Category::PlainIdentifier, "abc"),
                tok(Category::Other, " "),
                tok(Category::Number, "1"),
                tok(Category::Operator, "."),
                tok(Category::Number, "5"),
            ]
        );
    }

    #[test]
    fn test_strings_include_delimiters() {
        assert_eq!(categories("'a'"), vec![tok(Category::String, "'a'")]);
        assert_eq!(
            categories(r#""x 'y'" z"#),
            vec![
                tok(Category::String, r#""x 'y'""#),
                tok(Category::Other, " "),
                tok(Category::PlainIdentifier, "z"),
            ]
        );
        // no backslash escapes
        assert_eq!(
            categories(r#""a\"b"#),
            vec![tok(Category::String, r#""a\""#), tok(Category::PlainIdentifier, "b")]
        );
    }

    #[test]
    fn test_unterminated_string_gets_synthetic_quote() {
        let tokens: Vec<_> = Scanner::new("\"abc").collect();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "\"abc");
        assert_eq!(tokens[0].terminator, Some("\""));
        assert_eq!(tokens[0].span.len(), 4);
    }

    #[test]
    fn test_line_comment_excludes_newline() {
        assert_eq!(
            categories("# c\nif"),
            vec![
                tok(Category::Comment, "# c"),
                tok(Category::Other, "\n"),
                tok(Category::Keyword, "if"),
            ]
        );
        assert_eq!(categories("#"), vec![tok(Category::Comment, "#")]);
    }

    #[test]
    fn test_block_comment_contiguous() {
        assert_eq!(
            categories("/* a*b / c */x"),
            vec![
                tok(Category::Comment, "/* a*b / c */"),
                tok(Category::PlainIdentifier, "x"),
            ]
        );
        assert_eq!(categories("/**/"), vec![tok(Category::Comment, "/**/")]);
        // the opening star cannot close the comment
        assert_eq!(categories("/*/"), vec![tok(Category::Comment, "/*/*/")]);
    }

    #[test]
    fn test_block_comment_unterminated() {
        let tokens: Vec<_> = Scanner::new("/* open").collect();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "/* open");
        assert_eq!(tokens[0].terminator, Some("*/"));
    }

    #[test]
    fn test_block_comment_legacy_scan() {
        // well-formed comments without '*' or '/' inside behave normally
        assert_eq!(legacy("/* a */"), vec![tok(Category::Comment, "/* a */")]);
        assert_eq!(legacy("/**/"), vec![tok(Category::Comment, "/**/")]);

        // a '*' inside the body ends the scan and two characters are dropped
        assert_eq!(
            legacy("/* a*b */"),
            vec![
                tok(Category::Comment, "/* a*/"),
                tok(Category::Other, " "),
                tok(Category::Operator, "*"),
                tok(Category::Operator, "/"),
            ]
        );

        // so does a character followed by '/'
        assert_eq!(
            legacy("/* a/b */"),
            vec![
                tok(Category::Comment, "/* */"),
                tok(Category::PlainIdentifier, "b"),
                tok(Category::Other, " "),
                tok(Category::Operator, "*"),
                tok(Category::Operator, "/"),
            ]
        );

        // the last character of an unterminated comment is lost
        assert_eq!(legacy("/* ab"), vec![tok(Category::Comment, "/* a*/")]);
        assert_eq!(legacy("/*"), vec![tok(Category::Comment, "/**/")]);
    }

    #[test]
    fn test_legacy_scan_consumes_skipped_characters() {
        let tokens: Vec<_> =
            Scanner::with_block_comment_scan("/* a*b", BlockCommentScan::Legacy).collect();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "/* a");
        assert_eq!(tokens[0].span.len(), 6);
    }

    #[test]
    fn test_entities() {
        assert_eq!(categories("&amp;"), vec![tok(Category::Entity, "&amp;")]);
        assert_eq!(categories("&amp"), vec![tok(Category::Entity, "&amp;")]);
        assert_eq!(
            categories("&amp;;"),
            vec![tok(Category::Entity, "&amp;"), tok(Category::Other, ";")]
        );
        assert_eq!(
            categories("a &lt; b"),
            vec![
                tok(Category::PlainIdentifier, "a"),
                tok(Category::Other, " "),
                tok(Category::Entity, "&lt;"),
                tok(Category::Other, " "),
                tok(Category::PlainIdentifier, "b"),
            ]
        );
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            categories("f(x)=y,"),
            vec![
                tok(Category::PlainIdentifier, "f"),
                tok(Category::Bracket, "("),
                tok(Category::PlainIdentifier, "x"),
                tok(Category::Bracket, ")"),
                tok(Category::Operator, "="),
                tok(Category::PlainIdentifier, "y"),
                tok(Category::Other, ","),
            ]
        );
        // a lone slash is an operator, not a comment
        assert_eq!(categories("/"), vec![tok(Category::Operator, "/")]);
    }

    #[test]
    fn test_non_ascii_passes_through() {
        assert_eq!(
            categories("é1"),
            vec![tok(Category::Other, "é"), tok(Category::Number, "1")]
        );
    }

    #[test]
    fn test_spans_are_contiguous_and_cover_input() {
        let source = "sub f(x)\n  return x+1 # done\nend";
        let tokens: Vec<_> = Scanner::new(source).collect();

        assert_eq!(tokens.first().map(|t| t.span.start.offset), Some(0));
        assert_eq!(tokens.last().map(|t| t.span.end.offset), Some(source.len()));
        for pair in tokens.windows(2) {
            assert!(pair[1].span.follows(&pair[0].span));
        }

        let rebuilt: String = tokens.iter().map(|t| &source[t.span.range()]).collect();
        assert_eq!(rebuilt, source);

        let end = tokens.last().map(|t| t.span.start);
        assert_eq!(end, Some(Position::new(29, 3, 1)));
    }
}
