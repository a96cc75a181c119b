//! Placeholder Patcher — surgical token injection for structurally sound
//! documents.
//!
//! Invoked only when the skeleton tags are all present but one or more
//! placeholder tokens are missing. Each policy targets a preferred anchor
//! (`<h1>` text, after `</h1>`, before `</body>`) and falls back to an
//! unconditional insertion point rather than failing, so a required token is
//! never left un-inserted. Everything outside the insertion point is left
//! byte-identical.
//!
//! Contact tokens are handled as a batch: if any of the five is missing, one
//! contact block carrying all five is injected. See DESIGN.md for the
//! duplication trade-off.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::template::contact_block;
use crate::template::tokens::PlaceholderToken;

static H1_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)(<h1[^>]*>).*?(</h1>)").unwrap());
static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)(<title[^>]*>).*?(</title>)").unwrap());
static BODY_OPEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<body[^>]*>").unwrap());

/// Injects every missing placeholder token into the document.
///
/// The caller (the repair pipeline) determines `missing` from a validation
/// pass; re-validating the result reports all required tokens present.
pub fn patch_placeholders(html: &str, missing: &[PlaceholderToken]) -> String {
    let mut out = html.to_string();

    if missing.contains(&PlaceholderToken::FullName) {
        out = inject_full_name(&out);
    }
    if missing.iter().any(|token| token.is_contact()) {
        out = inject_contact_block(&out);
    }
    if missing.contains(&PlaceholderToken::ResumeContent) {
        out = inject_content_container(&out);
    }

    out
}

// ────────────────────────────────────────────────────────────────────────────
// Per-token policies
// ────────────────────────────────────────────────────────────────────────────

/// FULL_NAME: take over the first `<h1>`'s text. Without an `<h1>`, retitle
/// the document (if it has a `<title>`) and insert a fresh `<h1>` right after
/// the opening body tag.
fn inject_full_name(html: &str) -> String {
    let marker = PlaceholderToken::FullName.marker();

    if H1_RE.is_match(html) {
        return H1_RE
            .replace(html, |caps: &regex::Captures<'_>| {
                format!("{}{}{}", &caps[1], marker, &caps[2])
            })
            .into_owned();
    }

    let mut out = if TITLE_RE.is_match(html) {
        TITLE_RE
            .replace(html, |caps: &regex::Captures<'_>| {
                format!("{}{} - Resume{}", &caps[1], marker, &caps[2])
            })
            .into_owned()
    } else {
        html.to_string()
    };

    let heading = format!("\n<h1>{marker}</h1>");
    out = insert_after_body_open(&out, &heading);
    out
}

/// Contact tokens: one block with all five, after the first `</h1>` when
/// present, otherwise right after the opening body tag.
fn inject_contact_block(html: &str) -> String {
    let block = format!("\n{}", contact_block());
    if let Some(pos) = find_ci(html, "</h1>") {
        let insert_at = pos + "</h1>".len();
        let mut out = String::with_capacity(html.len() + block.len());
        out.push_str(&html[..insert_at]);
        out.push_str(&block);
        out.push_str(&html[insert_at..]);
        return out;
    }
    insert_after_body_open(html, &block)
}

/// RESUME_CONTENT: a content container immediately before the closing body
/// tag.
fn inject_content_container(html: &str) -> String {
    let container = format!(
        "<div class=\"resume-content\">\n{}\n</div>\n",
        PlaceholderToken::ResumeContent.marker()
    );
    if let Some(pos) = rfind_ci(html, "</body>") {
        let mut out = String::with_capacity(html.len() + container.len());
        out.push_str(&html[..pos]);
        out.push_str(&container);
        out.push_str(&html[pos..]);
        return out;
    }
    // No closing body tag at all — should not happen for a patchable
    // document, but never drop the token.
    format!("{html}\n{container}")
}

// ────────────────────────────────────────────────────────────────────────────
// Anchor helpers
// ────────────────────────────────────────────────────────────────────────────

/// Inserts `fragment` immediately after the opening body tag, or at the very
/// start of the string when no body tag exists.
fn insert_after_body_open(html: &str, fragment: &str) -> String {
    if let Some(open) = BODY_OPEN_RE.find(html) {
        let mut out = String::with_capacity(html.len() + fragment.len());
        out.push_str(&html[..open.end()]);
        out.push_str(fragment);
        out.push_str(&html[open.end()..]);
        out
    } else {
        format!("{}{html}", fragment.trim_start())
    }
}

/// Byte offset of the first case-insensitive occurrence of `needle`.
/// ASCII lowercasing preserves byte offsets.
fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .to_ascii_lowercase()
        .find(&needle.to_ascii_lowercase())
}

/// Byte offset of the last case-insensitive occurrence of `needle`.
fn rfind_ci(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .to_ascii_lowercase()
        .rfind(&needle.to_ascii_lowercase())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
