//! Layout-overflow guards — density utilities and a print-time collapse for
//! asymmetric column layouts.
//!
//! The density classes are appended unconditionally; they take effect only
//! when the render-time layout pass measures the content as taller than the
//! page and adds `density-compact` / `density-tight` to the body. That
//! measurement happens downstream — this stage just guarantees the classes
//! exist in every document.
//!
//! When the template lays itself out on an asymmetric two-column grid, a
//! print-only override collapsing it to one column is appended as well:
//! narrow sidebars orphan their content under fixed-height clipping.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::template::transforms::{append_css, Transform};

pub struct OverflowGuards;

const DENSITY_CSS: &str = "\
.density-compact { font-size: 0.93em; line-height: 1.25; }
.density-compact p, .density-compact li { margin-top: 1px; margin-bottom: 1px; }
.density-compact h2 { margin-top: 0.1in; margin-bottom: 0.05in; }
.density-tight { font-size: 0.87em; line-height: 1.18; }
.density-tight p, .density-tight li { margin-top: 0; margin-bottom: 0; }
.density-tight h2 { margin-top: 0.07in; margin-bottom: 0.03in; }";

static STYLE_BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<style[^>]*>(.*?)</style>").unwrap());
/// A rule body declaring `grid-template-columns`, with its selector. Scanned
/// against style-block contents only, so the selector capture (everything
/// since the previous brace) is always CSS text.
static GRID_RULE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)([^{}]+)\{[^{}]*?grid-template-columns\s*:\s*([^;{}]+)").unwrap());

impl Transform for OverflowGuards {
    fn name(&self) -> &'static str {
        "overflow-guards"
    }

    fn apply(&self, html: &str) -> String {
        let mut css = String::from(DENSITY_CSS);

        let selectors = asymmetric_grid_selectors(html);
        if !selectors.is_empty() {
            css.push_str("\n@media print {\n");
            for selector in &selectors {
                css.push_str(&format!(
                    "  {selector} {{ grid-template-columns: 1fr !important; }}\n"
                ));
            }
            css.push('}');
        }

        append_css(html, &css)
    }
}

/// Selectors whose `grid-template-columns` declare exactly two unequal
/// tracks (`220px 1fr`, `1fr 2fr`, …). Symmetric grids are left alone.
fn asymmetric_grid_selectors(html: &str) -> Vec<String> {
    let mut selectors = Vec::new();
    for style in STYLE_BLOCK_RE.captures_iter(html) {
        let css = style.get(1).map(|m| m.as_str()).unwrap_or("");
        for caps in GRID_RULE_RE.captures_iter(css) {
            let tracks: Vec<&str> = caps[2].split_whitespace().collect();
            if tracks.len() != 2 || tracks[0].eq_ignore_ascii_case(tracks[1]) {
                continue;
            }
            let selector = caps[1].trim();
            if selector.is_empty() || selector.starts_with('@') {
                continue;
            }
            let selector = selector.to_string();
            if !selectors.contains(&selector) {
                selectors.push(selector);
            }
        }
    }
    selectors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density_classes_always_appended() {
        let html = "<html><head><style>body{}</style></head><body></body></html>";
        let out = OverflowGuards.apply(html);
        assert!(out.contains(".density-compact"));
        assert!(out.contains(".density-tight"));
    }

    #[test]
    fn test_asymmetric_grid_collapsed_for_print() {
        let html = "<html><head><style>.layout { display: grid; grid-template-columns: 220px 1fr; }</style></head><body></body></html>";
        let out = OverflowGuards.apply(html);
        assert!(out.contains(".layout { grid-template-columns: 1fr !important; }"));
        assert!(out.contains("@media print"));
    }

    #[test]
    fn test_fractional_asymmetry_detected() {
        let html = "<style>.cols { grid-template-columns: 1fr 2fr; }</style>";
        let out = OverflowGuards.apply(html);
        assert!(out.contains(".cols { grid-template-columns: 1fr !important; }"));
    }

    #[test]
    fn test_symmetric_grid_untouched() {
        let html = "<style>.cols { grid-template-columns: 1fr 1fr; }</style>";
        let out = OverflowGuards.apply(html);
        assert!(!out.contains("!important"));
    }

    #[test]
    fn test_three_column_grid_untouched() {
        let html = "<style>.cols { grid-template-columns: 1fr 2fr 1fr; }</style>";
        let out = OverflowGuards.apply(html);
        assert!(!out.contains("!important"));
    }

    #[test]
    fn test_selector_extraction_skips_preceding_rules() {
        let html = "<style>body { margin: 0 }\n.side-main { display: grid; grid-template-columns: 30% 70%; }</style>";
        let out = OverflowGuards.apply(html);
        assert!(out.contains(".side-main { grid-template-columns: 1fr !important; }"));
        assert!(!out.contains("body { grid-template-columns"));
    }
}
