//! Template Completer — rebuilds a severely broken document into a complete,
//! minimal skeleton.
//!
//! Triggered when the severity check fails: the document is missing skeleton
//! tags or is shorter than the truncation threshold. The completer never
//! rejects input. It salvages whatever survives in the raw string (embedded
//! CSS, body markup), synthesizes a default rendering of the fallback resume
//! text when nothing is salvageable, and reassembles a document that is
//! guaranteed to pass the structural checklist for the six required tokens.
//!
//! One cheap path: when the only damage is a missing `</body>`/`</html>`,
//! the literal closing tags are appended instead of rebuilding, preserving
//! the generated styling untouched.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::template::contact_block;
use crate::template::tokens::PlaceholderToken;
use crate::template::validator::{validate, ValidationResult, Violation};
use crate::template::RepairConfig;

// ────────────────────────────────────────────────────────────────────────────
// Baseline skeleton CSS
// ────────────────────────────────────────────────────────────────────────────

/// Layout baseline for a rebuilt document: fixed page proportions in print
/// units, typography, and header/contact styling. Salvaged rules are appended
/// after this block so they win the cascade.
const BASE_STYLE: &str = "\
* { margin: 0; padding: 0; box-sizing: border-box; }
html, body { width: 8.5in; min-height: 11in; background: #ffffff; }
body {
  font-family: 'Helvetica Neue', Arial, sans-serif;
  font-size: 10.5pt;
  line-height: 1.35;
  color: #1a1a1a;
  padding: 0.5in 0.6in;
}
.resume-header { border-bottom: 2px solid #2c3e50; padding-bottom: 0.12in; margin-bottom: 0.18in; }
.resume-header h1 { font-size: 22pt; font-weight: 700; letter-spacing: 0.5px; color: #2c3e50; }
.contact-info {
  display: flex;
  flex-wrap: wrap;
  gap: 0.06in 0.28in;
  margin-top: 0.08in;
  font-size: 9.5pt;
  color: #444444;
}
h2 {
  font-size: 12pt;
  text-transform: uppercase;
  letter-spacing: 1px;
  color: #2c3e50;
  border-bottom: 1px solid #d0d0d0;
  margin: 0.16in 0 0.08in;
  padding-bottom: 2px;
}
p { margin: 0.05in 0; }
ul { margin: 0.04in 0 0.1in; padding-left: 0.22in; }
li { margin-bottom: 0.03in; }
a { color: #2c5aa0; text-decoration: none; }
";

// ────────────────────────────────────────────────────────────────────────────
// Completion
// ────────────────────────────────────────────────────────────────────────────

/// Completes a severely incomplete HTML string into a structurally valid
/// document.
///
/// `fallback_content` is the plain-text resume body (loose markdown-like
/// format) used only when no body markup survives in the input. The returned
/// string always satisfies the validator's tag and required-placeholder
/// rules.
pub fn complete(html: &str, fallback_content: &str, config: &RepairConfig) -> String {
    let validation = validate(html, false, config);

    // Nearly complete: only the closing tags are gone. Append them and keep
    // the original document byte-for-byte.
    if validation.only_closing_tags_missing() {
        return append_missing_closing_tags(html, &validation);
    }

    let salvaged_css = salvage_styles(html);
    let content = match salvage_body(html) {
        Some(body) if !body.trim().is_empty() => body.trim().to_string(),
        _ => synthesize_content(fallback_content),
    };

    build_skeleton(&salvaged_css, &content)
}

/// Appends the literal missing closing tags, body before html.
fn append_missing_closing_tags(html: &str, validation: &ValidationResult) -> String {
    let mut out = html.to_string();
    if validation.violations.contains(&Violation::MissingBodyClose) {
        out.push_str("\n</body>");
    }
    if validation.violations.contains(&Violation::MissingHtmlClose) {
        out.push_str("\n</html>");
    }
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Salvage
// ────────────────────────────────────────────────────────────────────────────

static STYLE_BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<style[^>]*>(.*?)</style>").unwrap());
static STYLE_OPEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<style[^>]*>").unwrap());
/// Where an unclosed style block plausibly ends: the next structural or
/// content tag. Truncation usually cuts mid-rule at end of string, so this
/// rarely fires, but it keeps stray markup out of the salvaged CSS.
static STYLE_BOUNDARY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)</head>|<body[\s>]|<div[\s>]|<main[\s>]|<section[\s>]|<header[\s>]|<h1[\s>]")
        .unwrap()
});

static BODY_BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<body[^>]*>(.*?)</body>").unwrap());
static BODY_OPEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<body[^>]*>").unwrap());

/// Extracts the contents of every `<style>` block, including a trailing
/// unclosed one.
fn salvage_styles(html: &str) -> String {
    let mut css = String::new();
    let mut scan_from = 0;

    for caps in STYLE_BLOCK_RE.captures_iter(html) {
        css.push_str(caps.get(1).map(|m| m.as_str()).unwrap_or(""));
        css.push('\n');
        scan_from = caps.get(0).map(|m| m.end()).unwrap_or(scan_from);
    }

    // Any <style> opening after the last closed block is unclosed.
    if let Some(open) = STYLE_OPEN_RE.find_at(html, scan_from) {
        let rest = &html[open.end()..];
        let cut = STYLE_BOUNDARY_RE
            .find(rest)
            .map(|b| b.start())
            .unwrap_or(rest.len());
        css.push_str(&rest[..cut]);
    }

    css.trim().to_string()
}

/// Extracts the body markup: the `<body>…</body>` contents, or — when the
/// closing tag is gone — everything after the last opening body tag.
fn salvage_body(html: &str) -> Option<String> {
    if let Some(caps) = BODY_BLOCK_RE.captures(html) {
        return caps.get(1).map(|m| m.as_str().to_string());
    }
    BODY_OPEN_RE
        .find_iter(html)
        .last()
        .map(|open| html[open.end()..].to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Fallback content synthesis
// ────────────────────────────────────────────────────────────────────────────

/// Renders the plain-text fallback resume into minimal HTML.
///
/// Line rules: `**Section**` becomes a heading, `- ` / `* ` / `• ` lines
/// become list items (grouped into one list per run), everything else
/// non-empty becomes a paragraph.
fn synthesize_content(fallback: &str) -> String {
    let mut out = String::new();
    let mut in_list = false;

    for raw in fallback.lines() {
        let line = raw.trim();
        if line.is_empty() {
            close_list(&mut out, &mut in_list);
            continue;
        }

        if let Some(heading) = as_section_header(line) {
            close_list(&mut out, &mut in_list);
            out.push_str("<h2>");
            out.push_str(&escape_html(heading));
            out.push_str("</h2>\n");
        } else if let Some(item) = as_bullet(line) {
            if !in_list {
                out.push_str("<ul>\n");
                in_list = true;
            }
            out.push_str("<li>");
            out.push_str(&escape_html(item));
            out.push_str("</li>\n");
        } else {
            close_list(&mut out, &mut in_list);
            out.push_str("<p>");
            out.push_str(&escape_html(line));
            out.push_str("</p>\n");
        }
    }
    close_list(&mut out, &mut in_list);
    out
}

/// A line fully wrapped in `**…**` is a section header.
fn as_section_header(line: &str) -> Option<&str> {
    if line.len() > 4 && line.starts_with("**") && line.ends_with("**") {
        Some(line[2..line.len() - 2].trim())
    } else {
        None
    }
}

fn as_bullet(line: &str) -> Option<&str> {
    line.strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .or_else(|| line.strip_prefix("\u{2022} "))
        .or_else(|| line.strip_prefix("\u{2022}"))
        .map(str::trim)
}

fn close_list(out: &mut String, in_list: &mut bool) {
    if *in_list {
        out.push_str("</ul>\n");
        *in_list = false;
    }
}

/// Minimal text escape for synthesized content. The fallback is plain text,
/// not markup.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

// ────────────────────────────────────────────────────────────────────────────
// Skeleton assembly
// ────────────────────────────────────────────────────────────────────────────

/// Reassembles the full document: doctype, head with baseline + salvaged CSS,
/// and a body with the standard placeholder header followed by the content.
fn build_skeleton(salvaged_css: &str, content: &str) -> String {
    let mut doc = String::with_capacity(BASE_STYLE.len() + salvaged_css.len() + content.len() + 512);

    doc.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    doc.push_str("<meta charset=\"UTF-8\">\n");
    doc.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    doc.push_str("<title>");
    doc.push_str(PlaceholderToken::FullName.marker());
    doc.push_str(" - Resume</title>\n<style>\n");
    doc.push_str(BASE_STYLE);
    if !salvaged_css.is_empty() {
        doc.push_str("\n/* rules salvaged from the generated template */\n");
        doc.push_str(salvaged_css);
        doc.push('\n');
    }
    doc.push_str("</style>\n</head>\n<body>\n");
    doc.push_str("<div class=\"resume-header\">\n<h1>");
    doc.push_str(PlaceholderToken::FullName.marker());
    doc.push_str("</h1>\n");
    doc.push_str(&contact_block());
    doc.push_str("\n</div>\n");
    if !content.is_empty() {
        doc.push_str(content);
        if !content.ends_with('\n') {
            doc.push('\n');
        }
    }
    doc.push_str("</body>\n</html>\n");
    doc
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
