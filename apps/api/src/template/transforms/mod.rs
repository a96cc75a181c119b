//! Post-Processing Transforms — a fixed, ordered pipeline of additive
//! string-level passes applied to every document that leaves the repair
//! pipeline, valid or freshly repaired.
//!
//! Each stage only ever inserts markup or CSS; nothing existing is removed
//! or altered (the icon stage strips *external* references, never document
//! structure). That makes the stages order-tolerant and safe to run
//! unconditionally. The default order matches the documented sequence:
//! icon delinking, print safety, overflow guards.

pub mod icons;
pub mod overflow;
pub mod print;

/// One named post-processing stage. The pipeline holds an ordered list of
/// these, so stage order is visible data rather than an implicit call
/// sequence.
pub trait Transform: Send + Sync {
    fn name(&self) -> &'static str;
    fn apply(&self, html: &str) -> String;
}

/// The production stage order.
pub fn default_transforms() -> Vec<Box<dyn Transform>> {
    vec![
        Box::new(icons::IconDelink),
        Box::new(print::PrintSafety),
        Box::new(overflow::OverflowGuards),
    ]
}

/// Inserts CSS rules at the end of the document's stylesheet.
///
/// Preferred anchor is just before the last `</style>`; without one, a new
/// style block is synthesized in the head (or before the body as a last
/// resort). Insertions only — existing rules are never touched, so later
/// calls stack in application order.
pub(crate) fn append_css(html: &str, css: &str) -> String {
    let lower = html.to_ascii_lowercase();

    if let Some(pos) = lower.rfind("</style>") {
        let mut out = String::with_capacity(html.len() + css.len() + 2);
        out.push_str(&html[..pos]);
        out.push('\n');
        out.push_str(css);
        out.push('\n');
        out.push_str(&html[pos..]);
        return out;
    }

    let block = format!("<style>\n{css}\n</style>\n");
    if let Some(pos) = lower.find("</head>") {
        let mut out = String::with_capacity(html.len() + block.len());
        out.push_str(&html[..pos]);
        out.push_str(&block);
        out.push_str(&html[pos..]);
        return out;
    }
    if let Some(pos) = lower.find("<body") {
        let mut out = String::with_capacity(html.len() + block.len());
        out.push_str(&html[..pos]);
        out.push_str(&block);
        out.push_str(&html[pos..]);
        return out;
    }
    format!("{html}\n{block}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_css_before_last_style_close() {
        let html = "<html><head><style>.a{}</style><style>.b{}</style></head><body></body></html>";
        let out = append_css(html, ".injected{}");
        let injected_pos = out.find(".injected").unwrap();
        let b_pos = out.find(".b{}").unwrap();
        assert!(injected_pos > b_pos, "must land in the last style block");
        assert_eq!(out.matches("</style>").count(), 2);
    }

    #[test]
    fn test_append_css_synthesizes_block_in_head() {
        let html = "<html><head><title>t</title></head><body></body></html>";
        let out = append_css(html, ".injected{}");
        let style_pos = out.find("<style>").unwrap();
        let head_close = out.find("</head>").unwrap();
        assert!(style_pos < head_close);
        assert!(out.contains(".injected{}"));
    }

    #[test]
    fn test_append_css_without_head_lands_before_body() {
        let html = "<body><p>x</p></body>";
        let out = append_css(html, ".injected{}");
        let style_pos = out.find("<style>").unwrap();
        let body_pos = out.find("<body>").unwrap();
        assert!(style_pos < body_pos);
    }

    #[test]
    fn test_append_css_bare_fragment_appends() {
        let out = append_css("plain text", ".injected{}");
        assert!(out.starts_with("plain text"));
        assert!(out.contains(".injected{}"));
    }

    #[test]
    fn test_default_transform_order() {
        let names: Vec<&str> = default_transforms().iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["icon-delink", "print-safety", "overflow-guards"]);
    }
}
