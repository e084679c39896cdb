//! Stateful highlighter that accumulates metrics across code blocks

use super::markup;
use crate::config::runtime::HighlightPreferences;
use crate::lexical::Scanner;
use crate::log_debug;
use crate::tokens::{Category, Token};
use serde::Serialize;

/// Counters over every block highlighted by one [`Highlighter`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HighlightMetrics {
    pub blocks: usize,
    pub source_bytes: usize,
    pub output_bytes: usize,
    /// Indexed by [`Category::index`]
    pub category_counts: [usize; 9],
    /// Strings, comments and entities closed with a terminator the source
    /// did not contain
    pub synthetic_terminators: usize,
}

impl HighlightMetrics {
    fn record_token(&mut self, token: &Token<'_>) {
        self.category_counts[token.category.index()] += 1;
        if token.is_synthetic() {
            self.synthetic_terminators += 1;
        }
    }

    pub fn count(&self, category: Category) -> usize {
        self.category_counts[category.index()]
    }

    pub fn total_tokens(&self) -> usize {
        self.category_counts.iter().sum()
    }

    pub fn merge(&mut self, other: &HighlightMetrics) {
        self.blocks += other.blocks;
        self.source_bytes += other.source_bytes;
        self.output_bytes += other.output_bytes;
        self.synthetic_terminators += other.synthetic_terminators;
        for (mine, theirs) in self.category_counts.iter_mut().zip(other.category_counts) {
            *mine += theirs;
        }
    }
}

/// Highlighter with runtime preferences and optional metrics collection
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    preferences: HighlightPreferences,
    metrics: HighlightMetrics,
}

impl Highlighter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preferences(preferences: HighlightPreferences) -> Self {
        Self {
            preferences,
            metrics: HighlightMetrics::default(),
        }
    }

    /// Highlight one code block. Output is identical to
    /// [`highlight_with_preferences`](super::highlight_with_preferences).
    pub fn highlight(&mut self, source: &str) -> String {
        let mut out = String::with_capacity(source.len() * 2);
        let mut block = HighlightMetrics::default();

        for token in Scanner::with_preferences(source, &self.preferences) {
            if token.is_synthetic() {
                log_debug!("Unterminated construct closed with synthetic terminator",
                    "category" => token.category,
                    "at" => token.span.start
                );
            }
            if self.preferences.collect_metrics {
                block.record_token(&token);
            }
            markup::write_token(&mut out, &token);
        }

        if self.preferences.collect_metrics {
            block.blocks = 1;
            block.source_bytes = source.len();
            block.output_bytes = out.len();
            self.metrics.merge(&block);
        }

        log_debug!("Highlighted code block",
            "source_bytes" => source.len(),
            "output_bytes" => out.len(),
            "tokens" => block.total_tokens()
        );

        out
    }

    pub fn metrics(&self) -> &HighlightMetrics {
        &self.metrics
    }

    /// Return the metrics gathered so far and start over
    pub fn take_metrics(&mut self) -> HighlightMetrics {
        std::mem::take(&mut self.metrics)
    }
}
