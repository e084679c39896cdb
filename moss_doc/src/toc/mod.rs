//! Dated table of contents
//!
//! Each dated heading becomes one list entry `[YYYY-MM-DD] text`, linked to
//! the heading's id when it has one, and the heading itself gets the same
//! date prefix. The builder only sees headings through [`HeadingHandle`], so
//! it works the same over parsed HTML pages and plain test records.

pub mod date;

use crate::config::TocConfig;
use moss_highlight::logging::{codes, Code};
use moss_highlight::{log_debug, log_success};

pub use date::{format_date_code, parse_date_code};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TocError {
    #[error("Heading {index} ('{text}') has no date code")]
    MissingDate { index: usize, text: String },

    #[error("Invalid date code '{code}' (expected YYYYMMDD)")]
    InvalidDateCode { code: String },
}

impl TocError {
    pub fn error_code(&self) -> Code {
        match self {
            TocError::MissingDate { .. } => codes::toc::MISSING_DATE,
            TocError::InvalidDateCode { .. } => codes::toc::INVALID_DATE_CODE,
        }
    }
}

/// Read/write access to one heading
pub trait HeadingHandle {
    /// Current inner markup of the heading
    fn text(&self) -> &str;

    fn id(&self) -> Option<&str>;

    /// Raw `YYYYMMDD` code, if the heading carries one
    fn date_code(&self) -> Option<&str>;

    fn set_text(&mut self, text: String);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocStyle {
    /// `<ol>` instead of `<ul>`
    pub ordered: bool,
    pub date_color: String,
}

impl Default for TocStyle {
    fn default() -> Self {
        Self::from(&TocConfig::default())
    }
}

impl From<&TocConfig> for TocStyle {
    fn from(config: &TocConfig) -> Self {
        Self {
            ordered: config.ordered,
            date_color: config.date_color.clone(),
        }
    }
}

impl TocStyle {
    fn list_tags(&self) -> (&'static str, &'static str) {
        if self.ordered {
            ("<ol>", "</ol>")
        } else {
            ("<ul>", "</ul>")
        }
    }

    /// `<span style='color: C'>[YYYY-MM-DD]</span> ` with its trailing space
    pub fn date_prefix(&self, display_date: &str) -> String {
        format!(
            "<span style='color: {}'>[{}]</span> ",
            self.date_color, display_date
        )
    }
}

/// Build the list markup and prefix every heading with its date.
///
/// All date codes are checked before any heading is touched, so on error the
/// headings are left as they were. A heading that already starts with its
/// own prefix is not prefixed again, which keeps reprocessing a page stable.
pub fn build_toc<H: HeadingHandle>(
    headings: &mut [H],
    style: &TocStyle,
) -> Result<String, TocError> {
    let mut prefixes = Vec::with_capacity(headings.len());
    for (index, heading) in headings.iter().enumerate() {
        let code = heading.date_code().ok_or_else(|| TocError::MissingDate {
            index,
            text: heading.text().to_string(),
        })?;
        let display = format_date_code(code)?;
        prefixes.push(style.date_prefix(&display));
    }

    let (open, close) = style.list_tags();
    let mut list = String::from(open);

    for (heading, prefix) in headings.iter_mut().zip(prefixes) {
        let (text, already_prefixed) = match heading.text().strip_prefix(prefix.as_str()) {
            Some(rest) => (rest.to_string(), true),
            None => (heading.text().to_string(), false),
        };

        list.push_str("<li>");
        list.push_str(&prefix);
        match heading.id().filter(|id| !id.is_empty()) {
            Some(id) => {
                list.push_str(" <a href='#");
                list.push_str(id);
                list.push_str("'>");
                list.push_str(&text);
                list.push_str("</a>");
            }
            None => {
                list.push(' ');
                list.push_str(&text);
            }
        }
        list.push_str("</li>");

        if already_prefixed {
            log_debug!("Heading already carries its date prefix", "id" => heading.id().unwrap_or(""));
        } else {
            heading.set_text(format!("{}{}", prefix, text));
        }
    }

    list.push_str(close);

    log_success!(codes::success::TOC_BUILT, "Table of contents built",
        "entries" => headings.len(),
        "ordered" => style.ordered
    );

    Ok(list)
}
