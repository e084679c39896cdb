//! Highlighting of `class="moss"` regions

use super::markup::{close_element, start_tags};
use super::DocumentError;
use moss_highlight::logging::codes;
use moss_highlight::{log_debug, log_warning, HighlightMetrics, HighlightPreferences, Highlighter};

/// Class that marks an element's content as moss source
pub const MOSS_CLASS: &str = "moss";

/// Added to the start tag of every region this module has highlighted
pub const HIGHLIGHTED_ATTRIBUTE: &str = "data-highlighted";

/// Outcome of [`highlight_regions`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionReport {
    pub html: String,
    /// Regions whose content was replaced
    pub regions: usize,
    /// Regions left as they were because they have no end tag
    pub unclosed: usize,
    /// Regions already carrying [`HIGHLIGHTED_ATTRIBUTE`], copied unchanged
    pub already_highlighted: usize,
    pub metrics: HighlightMetrics,
}

/// Replace the content of every moss region with its highlighted form.
///
/// A region is any element whose class list contains `moss`. Text outside
/// regions is copied unchanged. A region nested inside another one is part of
/// the outer region's source text and is not visited again. Highlighted
/// regions get `data-highlighted='moss'` on their start tag and are copied
/// verbatim on later runs.
pub fn highlight_regions(
    html: &str,
    preferences: &HighlightPreferences,
) -> Result<RegionReport, DocumentError> {
    let mut highlighter = Highlighter::with_preferences(preferences.clone());
    let mut out = String::with_capacity(html.len() * 2);
    let mut copied_to = 0;
    let mut regions = 0;
    let mut unclosed = 0;
    let mut already_highlighted = 0;

    for tag in start_tags(html, 0)? {
        if tag.range.start < copied_to || tag.self_closing || !tag.has_class(MOSS_CLASS) {
            continue;
        }

        let opened_at = tag.range.start;
        // Every start tag match ends in '>'
        let tag_close = tag.range.end - 1;
        let highlighted = tag.attribute(HIGHLIGHTED_ATTRIBUTE).is_some();
        let name = tag.name.clone();
        let Some(element) = close_element(html, tag)? else {
            unclosed += 1;
            log_warning!(code = codes::document::UNCLOSED_REGION,
                "Code region has no end tag, left untouched",
                "tag" => name,
                "offset" => opened_at
            );
            continue;
        };

        if highlighted {
            out.push_str(&html[copied_to..element.outer.end]);
            copied_to = element.outer.end;
            already_highlighted += 1;
            continue;
        }

        out.push_str(&html[copied_to..tag_close]);
        out.push_str(&format!(" {}='{}'", HIGHLIGHTED_ATTRIBUTE, MOSS_CLASS));
        out.push_str(&html[tag_close..element.inner.start]);
        out.push_str(&highlighter.highlight(&html[element.inner.clone()]));
        copied_to = element.inner.end;
        regions += 1;
    }

    out.push_str(&html[copied_to..]);

    log_debug!("Code regions highlighted",
        "regions" => regions,
        "unclosed" => unclosed,
        "already_highlighted" => already_highlighted
    );

    Ok(RegionReport {
        html: out,
        regions,
        unclosed,
        already_highlighted,
        metrics: highlighter.take_metrics(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use moss_highlight::{highlight, BlockCommentScan};

    fn regions(html: &str) -> RegionReport {
        highlight_regions(html, &HighlightPreferences::default()).unwrap()
    }

    #[test]
    fn test_text_outside_regions_untouched() {
        let html = "<h1>if 1</h1>\n<pre class=\"moss\">if 1</pre>\n<p>end</p>";
        let report = regions(html);

        assert_eq!(report.regions, 1);
        assert_eq!(
            report.html,
            format!(
                "<h1>if 1</h1>\n<pre class=\"moss\" data-highlighted='moss'>{}</pre>\n<p>end</p>",
                highlight("if 1")
            )
        );
    }

    #[test]
    fn test_class_list_must_contain_moss() {
        let html = "<code class='x moss'>while</code>\
                    <div class=mossy>while</div>\
                    <section class=moss>while</section>";
        let report = regions(html);

        assert_eq!(report.regions, 2);
        assert!(report.html.starts_with(
            "<code class='x moss' data-highlighted='moss'><span class='keyword'>while</span></code>"
        ));
        assert!(report.html.contains("<div class=mossy>while</div>"));
        assert!(report
            .html
            .ends_with("<section class=moss data-highlighted='moss'><span class='keyword'>while</span></section>"));
    }

    #[test]
    fn test_any_element_can_be_a_region() {
        let html = "<table><tr><td class=moss>if x</td></tr></table><ul><li class=moss>while</li></ul>";
        let report = regions(html);

        assert_eq!(report.regions, 2);
        assert!(report
            .html
            .contains("<td class=moss data-highlighted='moss'><span class='keyword'>if</span> x</td>"));
        assert!(report
            .html
            .contains("<li class=moss data-highlighted='moss'><span class='keyword'>while</span></li>"));
    }

    #[test]
    fn test_rerun_leaves_highlighted_regions_alone() {
        let html = "<pre class=moss>if x end</pre><span class=moss>a &lt; b</span>";
        let once = regions(html);
        let twice = regions(&once.html);

        assert_eq!(once.regions, 2);
        assert_eq!(twice.regions, 0);
        assert_eq!(twice.already_highlighted, 2);
        assert_eq!(twice.html, once.html);
        assert_eq!(twice.metrics.blocks, 0);
    }

    #[test]
    fn test_page_without_regions_is_identical() {
        let html = "<html><body><p>plain &amp; simple</p></body></html>";
        let report = regions(html);
        assert_eq!(report.regions, 0);
        assert_eq!(report.html, html);
    }

    #[test]
    fn test_unclosed_region_left_as_is() {
        let html = "<pre class=moss>if x";
        let report = regions(html);
        assert_eq!(report.regions, 0);
        assert_eq!(report.unclosed, 1);
        assert_eq!(report.html, html);
    }

    #[test]
    fn test_nested_region_processed_once() {
        let html = "<div class=moss>a<span class=moss>if</span>b</div>";
        let report = regions(html);
        assert_eq!(report.regions, 1);
        assert_eq!(
            report.html,
            format!(
                "<div class=moss data-highlighted='moss'>{}</div>",
                highlight("a<span class=moss>if</span>b")
            )
        );
    }

    #[test]
    fn test_entities_in_region_survive() {
        let html = "<pre class=moss>x &lt; 10</pre>";
        let report = regions(html);
        assert_eq!(
            report.html,
            "<pre class=moss data-highlighted='moss'>x <span class='symbol'>&lt;</span> \
             <span class='number'>10</span></pre>"
        );
        assert_eq!(report.metrics.blocks, 1);
    }

    #[test]
    fn test_preferences_reach_the_highlighter() {
        let html = "<pre class=moss>/* ab</pre>";
        let prefs = HighlightPreferences::default().with_block_comment_scan(BlockCommentScan::Legacy);
        let report = highlight_regions(html, &prefs).unwrap();
        assert_eq!(
            report.html,
            "<pre class=moss data-highlighted='moss'><span class='comment'>/* a*/</span></pre>"
        );
    }
}
