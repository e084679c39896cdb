//! Minimal tag scanning over HTML text
//!
//! Pages are not parsed into a tree. Start tags are located with a regex,
//! their attributes read with a second one, and the matching end tag found
//! by counting nested tags of the same name. Comments, scripts and
//! malformed markup get no special treatment.

use super::DocumentError;
use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

struct Patterns {
    tag: Regex,
    attribute: Regex,
}

impl Patterns {
    fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            tag: Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9]*)\b([^>]*)>")?,
            attribute: Regex::new(
                r#"([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#,
            )?,
        })
    }
}

static PATTERNS: OnceLock<Result<Patterns, regex::Error>> = OnceLock::new();

fn patterns() -> Result<&'static Patterns, DocumentError> {
    PATTERNS
        .get_or_init(Patterns::compile)
        .as_ref()
        .map_err(|e| DocumentError::Pattern {
            message: e.to_string(),
        })
}

/// One start tag in the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag {
    /// Lowercased tag name
    pub name: String,
    /// Byte range of the whole `<...>`
    pub range: Range<usize>,
    /// Attribute names lowercased, in source order
    pub attributes: Vec<(String, String)>,
    pub self_closing: bool,
}

impl StartTag {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether the whitespace-separated `class` list contains `class`
    pub fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .map(|list| list.split_ascii_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }
}

/// A start tag together with the extent of its content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub start: StartTag,
    /// Between the start tag and the end tag
    pub inner: Range<usize>,
    /// Through the end of the end tag
    pub outer: Range<usize>,
}

fn parse_attributes(patterns: &Patterns, text: &str) -> Vec<(String, String)> {
    patterns
        .attribute
        .captures_iter(text)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str().to_ascii_lowercase();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            Some((name, value))
        })
        .collect()
}

/// Every start tag at or after `from`, in document order
pub fn start_tags(html: &str, from: usize) -> Result<Vec<StartTag>, DocumentError> {
    let patterns = patterns()?;
    let tail = html.get(from..).unwrap_or("");

    Ok(patterns
        .tag
        .captures_iter(tail)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            if !caps.get(1)?.as_str().is_empty() {
                return None;
            }
            let attributes_text = caps.get(3).map_or("", |m| m.as_str());
            Some(StartTag {
                name: caps.get(2)?.as_str().to_ascii_lowercase(),
                range: from + whole.start()..from + whole.end(),
                attributes: parse_attributes(patterns, attributes_text),
                self_closing: attributes_text.trim_end().ends_with('/'),
            })
        })
        .collect())
}

/// Find the end tag matching `start`, honouring nested tags of the same
/// name. `None` when the element is never closed.
pub fn close_element(html: &str, start: StartTag) -> Result<Option<Element>, DocumentError> {
    let patterns = patterns()?;
    let body_start = start.range.end;
    let tail = html.get(body_start..).unwrap_or("");
    let mut depth = 0usize;

    for caps in patterns.tag.captures_iter(tail) {
        let (Some(whole), Some(slash), Some(name)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };
        if !name.as_str().eq_ignore_ascii_case(&start.name) {
            continue;
        }
        if slash.as_str().is_empty() {
            let self_closing = caps
                .get(3)
                .map_or(false, |m| m.as_str().trim_end().ends_with('/'));
            if !self_closing {
                depth += 1;
            }
        } else if depth == 0 {
            let inner = body_start..body_start + whole.start();
            let outer = start.range.start..body_start + whole.end();
            return Ok(Some(Element {
                start,
                inner,
                outer,
            }));
        } else {
            depth -= 1;
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_tags_and_attributes() {
        let html = r#"<p>x</p><pre class="code moss" id=main data-x='1'>y</pre><br/>"#;
        let tags = start_tags(html, 0).unwrap();

        assert_eq!(tags.len(), 3);
        assert_eq!(tags[0].name, "p");
        assert!(tags[1].has_class("moss"));
        assert!(!tags[1].has_class("mo"));
        assert_eq!(tags[1].attribute("id"), Some("main"));
        assert_eq!(tags[1].attribute("data-x"), Some("1"));
        assert_eq!(&html[tags[1].range.clone()], r#"<pre class="code moss" id=main data-x='1'>"#);
        assert!(tags[2].self_closing);
    }

    #[test]
    fn test_attribute_names_are_case_insensitive() {
        let tags = start_tags(r#"<H3 ID="a" Data-Date="20240101">t</H3>"#, 0).unwrap();
        assert_eq!(tags[0].name, "h3");
        assert_eq!(tags[0].attribute("id"), Some("a"));
        assert_eq!(tags[0].attribute("data-date"), Some("20240101"));
    }

    #[test]
    fn test_close_element_with_nesting() {
        let html = "<div id=t><div>inner</div>tail</div>after";
        let start = start_tags(html, 0).unwrap().remove(0);
        let element = close_element(html, start).unwrap().unwrap();

        assert_eq!(&html[element.inner.clone()], "<div>inner</div>tail");
        assert_eq!(&html[element.outer.end..], "after");
    }

    #[test]
    fn test_unclosed_element() {
        let html = "<pre class=moss>if x";
        let start = start_tags(html, 0).unwrap().remove(0);
        assert!(close_element(html, start).unwrap().is_none());
    }

    #[test]
    fn test_start_offset() {
        let html = "<b>a</b><i>b</i>";
        let tags = start_tags(html, 5).unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "i");
        assert_eq!(tags[0].range, 8..11);
    }
}
