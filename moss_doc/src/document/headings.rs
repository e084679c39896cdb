//! Dated headings of an HTML page and the table-of-contents rewrite

use super::markup::{close_element, start_tags, Element};
use super::DocumentError;
use crate::config::TocConfig;
use crate::toc::{build_toc, HeadingHandle, TocStyle};
use moss_highlight::logging::codes;
use moss_highlight::{log_debug, log_warning};
use std::ops::Range;

/// Attribute holding the `YYYYMMDD` code
pub const DATE_ATTRIBUTE: &str = "data-date";

/// A heading element located in a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlHeading {
    id: Option<String>,
    date: Option<String>,
    text: String,
    /// Byte range of the original inner markup
    inner: Range<usize>,
    changed: bool,
}

impl HtmlHeading {
    fn from_element(html: &str, element: &Element) -> Self {
        Self {
            id: element.start.attribute("id").map(str::to_string),
            date: element.start.attribute(DATE_ATTRIBUTE).map(str::to_string),
            text: html[element.inner.clone()].to_string(),
            inner: element.inner.clone(),
            changed: false,
        }
    }

    pub fn inner_range(&self) -> Range<usize> {
        self.inner.clone()
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }
}

impl HeadingHandle for HtmlHeading {
    fn text(&self) -> &str {
        &self.text
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn date_code(&self) -> Option<&str> {
        self.date.as_deref()
    }

    fn set_text(&mut self, text: String) {
        self.changed = true;
        self.text = text;
    }
}

/// Every closed `<tag>` heading of the page, in document order
pub fn find_headings(html: &str, tag: &str) -> Result<Vec<HtmlHeading>, DocumentError> {
    let mut headings = Vec::new();
    for start in start_tags(html, 0)? {
        if !start.name.eq_ignore_ascii_case(tag) || start.self_closing {
            continue;
        }
        if let Some(element) = close_element(html, start)? {
            headings.push(HtmlHeading::from_element(html, &element));
        }
    }
    Ok(headings)
}

fn find_target(html: &str, target_id: &str) -> Result<Option<Element>, DocumentError> {
    for start in start_tags(html, 0)? {
        if start.attribute("id") == Some(target_id) && !start.self_closing {
            return close_element(html, start);
        }
    }
    Ok(None)
}

/// Outcome of [`apply_toc`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TocOutcome {
    pub html: String,
    /// Headings listed in the table of contents
    pub entries: usize,
    /// Whether the target element was found and filled
    pub target_found: bool,
}

/// Prefix every heading with its date and fill the target element with the
/// list. A page without the target element is returned unchanged, or
/// rejected when `require_target` is set and the page has headings.
pub fn apply_toc(html: &str, config: &TocConfig) -> Result<TocOutcome, DocumentError> {
    let mut headings = find_headings(html, &config.heading_tag)?;
    let target = find_target(html, &config.target_id)?;

    let Some(target) = target else {
        if !headings.is_empty() {
            if config.require_target {
                return Err(DocumentError::TocTargetMissing {
                    target_id: config.target_id.clone(),
                });
            }
            if headings.iter().any(|h| h.date_code().is_some()) {
                log_warning!(code = codes::document::TOC_TARGET_MISSING,
                    "Dated headings but no table-of-contents element, page left as is",
                    "target_id" => config.target_id,
                    "headings" => headings.len()
                );
            }
        }
        return Ok(TocOutcome {
            html: html.to_string(),
            entries: 0,
            target_found: false,
        });
    };

    let list = build_toc(&mut headings, &TocStyle::from(config))?;

    let mut edits: Vec<(Range<usize>, String)> = headings
        .iter()
        .filter(|h| h.is_changed())
        .map(|h| (h.inner_range(), h.text().to_string()))
        .collect();
    edits.push((target.inner.clone(), list));
    edits.sort_by_key(|(range, _)| range.start);

    let mut out = String::with_capacity(html.len() + edits.iter().map(|(_, t)| t.len()).sum::<usize>());
    let mut copied_to = 0;
    for (range, replacement) in edits {
        if range.start < copied_to {
            log_debug!("Skipping heading nested in the table-of-contents element",
                "offset" => range.start
            );
            continue;
        }
        out.push_str(&html[copied_to..range.start]);
        out.push_str(&replacement);
        copied_to = range.end;
    }
    out.push_str(&html[copied_to..]);

    Ok(TocOutcome {
        html: out,
        entries: headings.len(),
        target_found: true,
    })
}
