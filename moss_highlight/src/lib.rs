// Internal modules
pub mod config;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod render;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use config::{BlockCommentScan, HighlightPreferences};
pub use lexical::{tokenize, tokenize_with_preferences, Scanner};
pub use render::{highlight, highlight_with_preferences, HighlightMetrics, Highlighter};
pub use tokens::{Category, Position, Span, Token};
