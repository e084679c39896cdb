//! Token types for the moss highlighter
//!
//! A [`Token`] is a classified slice of the source. Tokens are transient: the
//! scanner yields them one at a time and the renderer writes each one out
//! before asking for the next, so no token list is kept unless a caller
//! collects one itself (the CLI does, for its token dump).

pub mod token;

pub use token::{Category, Token};

// Re-export span types from utils
pub use crate::utils::{Position, Span};
