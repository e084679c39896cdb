/// Fixed lexical tables of the moss language as seen by the highlighter
pub mod lexical {
    /// Reserved identifiers. Matching is exact and case-sensitive.
    pub const KEYWORDS: [&str; 33] = [
        "sub", "end", "begin", "if", "then", "elif", "else", "while", "do", "for", "in", "is",
        "break", "continue", "try", "catch", "global", "not", "and", "or", "table", "of", "raise",
        "yield", "return", "true", "false", "null", "goto", "label", "use", "assert", "function",
    ];

    /// Single-character bracket tokens
    pub const BRACKETS: &str = "()[]{}";

    /// Single-character operator tokens
    pub const OPERATORS: &str = "+-*/|.=!:%^$";

    pub const LINE_COMMENT: char = '#';
    pub const BLOCK_COMMENT_OPEN: &str = "/*";
    pub const BLOCK_COMMENT_CLOSE: &str = "*/";
    pub const ENTITY_OPEN: char = '&';
    pub const ENTITY_CLOSE: char = ';';
    pub const DOUBLE_QUOTE: char = '"';
    pub const SINGLE_QUOTE: char = '\'';
}

/// Markup emitted around classified spans
pub mod markup {
    pub const KEYWORD_CLASS: &str = "keyword";
    pub const NUMBER_CLASS: &str = "number";
    pub const STRING_CLASS: &str = "string";
    pub const COMMENT_CLASS: &str = "comment";
    pub const BRACKET_CLASS: &str = "bracket";
    /// Shared by entities and operators
    pub const SYMBOL_CLASS: &str = "symbol";

    pub const WRAPPER_OPEN_PREFIX: &str = "<span class='";
    pub const WRAPPER_OPEN_SUFFIX: &str = "'>";
    pub const WRAPPER_CLOSE: &str = "</span>";
}

/// Environment variable names read by the runtime preferences
pub mod env {
    pub const BLOCK_COMMENT_SCAN: &str = "MOSS_BLOCK_COMMENT_SCAN";
    pub const COLLECT_METRICS: &str = "MOSS_HIGHLIGHT_COLLECT_METRICS";
}
