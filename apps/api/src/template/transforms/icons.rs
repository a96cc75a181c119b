//! Icon delinking — removes external icon-font dependencies and replaces
//! recognized icon markup with self-contained inline vector icons.
//!
//! Externally hosted icon fonts (Font Awesome CDNs, Google Material Icons)
//! routinely fail to load in sandboxed preview iframes and in headless
//! print/PDF rendering, leaving empty boxes where contact icons should be.
//! Inline SVG has no network dependency and renders identically in both
//! contexts.
//!
//! Three passes:
//! 1. Strip `<link>` / `<script>` tags and `@import` statements that
//!    reference an icon-font service.
//! 2. Replace empty icon elements (`<i class="fa fa-envelope"></i>`,
//!    `<span class="icon email"></span>`) with the equivalent inline SVG.
//! 3. Replace plain-text contact labels (`Email:`, `Phone:` …) at the start
//!    of a text node with the matching icon.
//!
//! If any icon was injected and the document does not already size the
//! `ri-icon` class, default sizing/alignment CSS is appended.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::template::transforms::{append_css, Transform};

pub struct IconDelink;

impl Transform for IconDelink {
    fn name(&self) -> &'static str {
        "icon-delink"
    }

    fn apply(&self, html: &str) -> String {
        let out = strip_icon_font_links(html);
        let out = strip_icon_font_scripts(&out);
        let out = strip_icon_font_imports(&out);
        let out = replace_icon_elements(&out);
        let out = replace_contact_labels(&out);
        ensure_icon_css(&out)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Inline vector icons
// ────────────────────────────────────────────────────────────────────────────

const EMAIL_SVG: &str = r#"<svg class="ri-icon" viewBox="0 0 24 24" aria-hidden="true"><path d="M4 5h16c.55 0 1 .45 1 1v12c0 .55-.45 1-1 1H4c-.55 0-1-.45-1-1V6c0-.55.45-1 1-1zm8 6.5L5.6 7v10.4h12.8V7L12 11.5zM6.3 6.6l5.7 3.4 5.7-3.4H6.3z"/></svg>"#;
const PHONE_SVG: &str = r#"<svg class="ri-icon" viewBox="0 0 24 24" aria-hidden="true"><path d="M6.62 10.79a15.05 15.05 0 0 0 6.59 6.59l2.2-2.2a1 1 0 0 1 1.02-.24c1.12.37 2.33.57 3.57.57a1 1 0 0 1 1 1V20a1 1 0 0 1-1 1C10.61 21 3 13.39 3 4a1 1 0 0 1 1-1h3.5a1 1 0 0 1 1 1c0 1.24.2 2.45.57 3.57a1 1 0 0 1-.25 1.02l-2.2 2.2z"/></svg>"#;
const LOCATION_SVG: &str = r#"<svg class="ri-icon" viewBox="0 0 24 24" aria-hidden="true"><path d="M12 2a7 7 0 0 0-7 7c0 5.25 7 13 7 13s7-7.75 7-13a7 7 0 0 0-7-7zm0 9.5A2.5 2.5 0 1 1 12 6.5a2.5 2.5 0 0 1 0 5z"/></svg>"#;
const LINKEDIN_SVG: &str = r#"<svg class="ri-icon" viewBox="0 0 24 24" aria-hidden="true"><path d="M6.94 8.5v12H3.56v-12h3.38zM5.25 3a1.97 1.97 0 1 1 0 3.94A1.97 1.97 0 0 1 5.25 3zm15.25 10.9v6.6h-3.37v-6.2c0-1.56-.56-2.62-1.96-2.62-1.07 0-1.7.72-1.98 1.41-.1.25-.13.6-.13.94v6.47H9.69v-12h3.37v1.64c.45-.7 1.26-1.69 3.05-1.69 2.22 0 3.89 1.45 3.89 4.45z"/></svg>"#;
const GLOBE_SVG: &str = r#"<svg class="ri-icon" viewBox="0 0 24 24" aria-hidden="true"><path d="M12 2a10 10 0 1 0 0 20 10 10 0 0 0 0-20zm7.75 9h-3.08a15.6 15.6 0 0 0-1.4-6.23A8.03 8.03 0 0 1 19.75 11zM12 4.04c.83 1.2 1.86 3.42 2.06 6.96H9.94c.2-3.54 1.23-5.76 2.06-6.96zM8.73 4.77A15.6 15.6 0 0 0 7.33 11H4.25a8.03 8.03 0 0 1 4.48-6.23zM4.25 13h3.08c.13 2.32.61 4.45 1.4 6.23A8.03 8.03 0 0 1 4.25 13zM12 19.96c-.83-1.2-1.86-3.42-2.06-6.96h4.12c-.2 3.54-1.23 5.76-2.06 6.96zm3.27-.73a15.6 15.6 0 0 0 1.4-6.23h3.08a8.03 8.03 0 0 1-4.48 6.23z"/></svg>"#;
const EXTERNAL_LINK_SVG: &str = r#"<svg class="ri-icon" viewBox="0 0 24 24" aria-hidden="true"><path d="M14 3h7v7h-2V6.41l-8.29 8.3-1.42-1.42L17.59 5H14V3zM5 5h6v2H7v10h10v-4h2v6H5V5z"/></svg>"#;

/// Default sizing/alignment for injected icons, appended only when the
/// document does not already style the class.
const ICON_CSS: &str = "svg.ri-icon { width: 1em; height: 1em; fill: currentColor; vertical-align: -0.125em; margin-right: 0.35em; }";

// ────────────────────────────────────────────────────────────────────────────
// Pass 1: external reference stripping
// ────────────────────────────────────────────────────────────────────────────

static LINK_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<link\b[^>]*>").unwrap());
static SCRIPT_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b[^>]*>\s*</script>").unwrap());
static IMPORT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)@import\s+[^;]+;").unwrap());

/// Hostname/keyword patterns that mark an icon-font service reference.
fn references_icon_font(fragment: &str) -> bool {
    let f = fragment.to_ascii_lowercase();
    f.contains("font-awesome")
        || f.contains("fontawesome")
        || (f.contains("googleapis") && f.contains("icon"))
        || (f.contains("cdnjs") && f.contains("font-awesome"))
}

fn strip_icon_font_links(html: &str) -> String {
    LINK_TAG_RE
        .replace_all(html, |caps: &Captures<'_>| {
            if references_icon_font(&caps[0]) {
                String::new()
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}

fn strip_icon_font_scripts(html: &str) -> String {
    SCRIPT_TAG_RE
        .replace_all(html, |caps: &Captures<'_>| {
            if references_icon_font(&caps[0]) {
                String::new()
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}

fn strip_icon_font_imports(html: &str) -> String {
    IMPORT_RE
        .replace_all(html, |caps: &Captures<'_>| {
            if references_icon_font(&caps[0]) {
                String::new()
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}

// ────────────────────────────────────────────────────────────────────────────
// Pass 2: icon element replacement
// ────────────────────────────────────────────────────────────────────────────

/// An empty `<i>`/`<span>`/`<em>` whose class list names a glyph, in either
/// icon-font class form (`fa-envelope`) or bare-word form (`email`).
static ICON_ELEMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<(?:i|span|em)\b[^>]*\bclass\s*=\s*["']([^"']*)["'][^>]*>\s*</(?:i|span|em)>"#)
        .unwrap()
});

/// Maps a class list to a vector icon. LinkedIn and external-link are
/// checked before the broader keywords so `linkedin` never falls through to
/// a generic match.
fn icon_for_classes(classes: &str) -> Option<&'static str> {
    let c = classes.to_ascii_lowercase();
    if c.contains("linkedin") {
        Some(LINKEDIN_SVG)
    } else if c.contains("external-link") || c.contains("external_link") {
        Some(EXTERNAL_LINK_SVG)
    } else if c.contains("envelope") || c.contains("email") || c.contains("fa-at") {
        Some(EMAIL_SVG)
    } else if c.contains("phone") || c.contains("mobile") {
        Some(PHONE_SVG)
    } else if c.contains("map-marker") || c.contains("location") || c.contains("pin") {
        Some(LOCATION_SVG)
    } else if c.contains("globe") || c.contains("website") || c.contains("portfolio") {
        Some(GLOBE_SVG)
    } else {
        None
    }
}

fn replace_icon_elements(html: &str) -> String {
    ICON_ELEMENT_RE
        .replace_all(html, |caps: &Captures<'_>| {
            match icon_for_classes(&caps[1]) {
                Some(svg) => svg.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

// ────────────────────────────────────────────────────────────────────────────
// Pass 3: plain-text label replacement
// ────────────────────────────────────────────────────────────────────────────

/// A contact label at the start of a text node (`>Email:`), so attribute
/// values like `href="tel:…"` are never touched.
static LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(>\s*)(e-?mail|phone|location|address|linkedin|portfolio|website)\s*:\s*")
        .unwrap()
});

fn icon_for_label(label: &str) -> &'static str {
    match label.to_ascii_lowercase().as_str() {
        "phone" => PHONE_SVG,
        "location" | "address" => LOCATION_SVG,
        "linkedin" => LINKEDIN_SVG,
        "portfolio" | "website" => GLOBE_SVG,
        // email / e-mail
        _ => EMAIL_SVG,
    }
}

fn replace_contact_labels(html: &str) -> String {
    LABEL_RE
        .replace_all(html, |caps: &Captures<'_>| {
            format!("{}{}", &caps[1], icon_for_label(&caps[2]))
        })
        .into_owned()
}

// ────────────────────────────────────────────────────────────────────────────
// Icon CSS
// ────────────────────────────────────────────────────────────────────────────

fn ensure_icon_css(html: &str) -> String {
    if html.contains("class=\"ri-icon\"") && !html.contains("svg.ri-icon") {
        append_css(html, ICON_CSS)
    } else {
        html.to_string()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
