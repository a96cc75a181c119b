//! Structural Validator — checks an HTML string against the completeness
//! contract and returns an itemized violation list.
//!
//! "Structural validity" is a closed checklist, not HTML5 conformance: the
//! document must carry the skeleton tags, every required placeholder token,
//! some evidence of styling, and enough length to not be a truncated
//! fragment. The validator is a pure function of its input — no side
//! effects, same string in, same result out.
//!
//! Matching is deliberately conservative: `<head` is anchored so a `<header>`
//! element never satisfies the head check, and the doctype match tolerates
//! any casing and internal whitespace.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::template::tokens::PlaceholderToken;
use crate::template::RepairConfig;

// ────────────────────────────────────────────────────────────────────────────
// Violation taxonomy
// ────────────────────────────────────────────────────────────────────────────

/// One failed rule from the structural checklist.
///
/// The set is closed: callers dispatch on these variants to pick a repair
/// strategy, so new rules must be added here rather than as free-form text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Violation {
    MissingDoctype,
    MissingHtmlTag,
    MissingHead,
    MissingBodyOpen,
    MissingBodyClose,
    MissingHtmlClose,
    MissingPlaceholder(PlaceholderToken),
    NoStylingFound,
    TooShort { length: usize, minimum: usize },
}

impl Violation {
    /// True for the six skeleton-tag rules (everything the Template Completer
    /// can rebuild; placeholder and styling gaps are handled downstream).
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Violation::MissingDoctype
                | Violation::MissingHtmlTag
                | Violation::MissingHead
                | Violation::MissingBodyOpen
                | Violation::MissingBodyClose
                | Violation::MissingHtmlClose
        )
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::MissingDoctype => write!(f, "Missing <!DOCTYPE html> declaration"),
            Violation::MissingHtmlTag => write!(f, "Missing opening <html> tag"),
            Violation::MissingHead => write!(f, "Missing <head> section"),
            Violation::MissingBodyOpen => write!(f, "Missing opening <body> tag"),
            Violation::MissingBodyClose => write!(f, "Missing closing </body> tag"),
            Violation::MissingHtmlClose => write!(f, "Missing closing </html> tag"),
            Violation::MissingPlaceholder(token) => {
                write!(f, "Missing placeholder {}", token.marker())
            }
            Violation::NoStylingFound => write!(
                f,
                "No styling found: neither a <style> block nor inline style attributes"
            ),
            Violation::TooShort { length, minimum } => write!(
                f,
                "Document is {length} characters, below the minimum of {minimum}"
            ),
        }
    }
}

/// Outcome of a validation pass: overall verdict plus one entry per failed
/// rule, in fixed checklist order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub violations: Vec<Violation>,
}

impl ValidationResult {
    /// Human-readable description per violation, in checklist order.
    pub fn descriptions(&self) -> Vec<String> {
        self.violations.iter().map(|v| v.to_string()).collect()
    }

    /// The placeholder tokens the document is missing.
    pub fn missing_placeholders(&self) -> Vec<PlaceholderToken> {
        self.violations
            .iter()
            .filter_map(|v| match v {
                Violation::MissingPlaceholder(token) => Some(*token),
                _ => None,
            })
            .collect()
    }

    /// Severity check: a document with a broken skeleton or truncated length
    /// must be rebuilt by the Completer; anything milder is patchable.
    pub fn is_severely_incomplete(&self) -> bool {
        self.violations
            .iter()
            .any(|v| v.is_structural() || matches!(v, Violation::TooShort { .. }))
    }

    /// True when the only skeleton damage is one or both missing closing
    /// tags — the cheap append path, which preserves the original styling.
    pub fn only_closing_tags_missing(&self) -> bool {
        let mut any_close = false;
        for v in &self.violations {
            match v {
                Violation::MissingBodyClose | Violation::MissingHtmlClose => any_close = true,
                Violation::TooShort { .. } => return false,
                other if other.is_structural() => return false,
                _ => {}
            }
        }
        any_close
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Checklist rules
// ────────────────────────────────────────────────────────────────────────────

static DOCTYPE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<!doctype\s+html").unwrap());
static HTML_OPEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<html[\s>]").unwrap());
static HEAD_OPEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<head[\s>]").unwrap());
static BODY_OPEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<body[\s>]").unwrap());
static BODY_CLOSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</body>").unwrap());
static HTML_CLOSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</html>").unwrap());
/// Evidence of styling: an embedded style block or any inline style attribute.
static STYLING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)<style[\s>]|\bstyle\s*=\s*["']"#).unwrap());

/// Validates an HTML string against the structural checklist.
///
/// Rules run in a fixed order (skeleton tags, placeholders, styling, length),
/// so the violation list is deterministic and `validate` is idempotent.
/// `expect_content_placeholder` adds the optional `{{RESUME_CONTENT}}` token
/// to the required set for generation modes that leave a content slot.
pub fn validate(
    html: &str,
    expect_content_placeholder: bool,
    config: &RepairConfig,
) -> ValidationResult {
    let mut violations = Vec::new();

    if !DOCTYPE_RE.is_match(html) {
        violations.push(Violation::MissingDoctype);
    }
    if !HTML_OPEN_RE.is_match(html) {
        violations.push(Violation::MissingHtmlTag);
    }
    if !HEAD_OPEN_RE.is_match(html) {
        violations.push(Violation::MissingHead);
    }
    if !BODY_OPEN_RE.is_match(html) {
        violations.push(Violation::MissingBodyOpen);
    }
    if !BODY_CLOSE_RE.is_match(html) {
        violations.push(Violation::MissingBodyClose);
    }
    if !HTML_CLOSE_RE.is_match(html) {
        violations.push(Violation::MissingHtmlClose);
    }

    for token in PlaceholderToken::REQUIRED {
        if !html.contains(token.marker()) {
            violations.push(Violation::MissingPlaceholder(token));
        }
    }
    if expect_content_placeholder
        && !html.contains(PlaceholderToken::ResumeContent.marker())
    {
        violations.push(Violation::MissingPlaceholder(PlaceholderToken::ResumeContent));
    }

    if !STYLING_RE.is_match(html) {
        violations.push(Violation::NoStylingFound);
    }

    if html.len() < config.minimum_viable_len {
        violations.push(Violation::TooShort {
            length: html.len(),
            minimum: config.minimum_viable_len,
        });
    }

    ValidationResult {
        valid: violations.is_empty(),
        violations,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RepairConfig {
        RepairConfig::default()
    }

    /// A minimal document that satisfies every rule (padded past the length
    /// threshold).
    fn valid_document() -> String {
        let padding = "/* layout padding */\n".repeat(60);
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<title>{{{{FULL_NAME}}}} - Resume</title>\n\
             <style>\nbody {{ font-family: Arial; }}\n{padding}</style>\n</head>\n<body>\n\
             <h1>{{{{FULL_NAME}}}}</h1>\n\
             <div class=\"contact-info\"><span>{{{{EMAIL}}}}</span><span>{{{{PHONE}}}}</span>\
             <span>{{{{LOCATION}}}}</span><span>{{{{LINKEDIN}}}}</span><span>{{{{PORTFOLIO}}}}</span></div>\n\
             <p>Experience goes here.</p>\n</body>\n</html>\n"
        )
    }

    #[test]
    fn test_valid_document_passes() {
        let result = validate(&valid_document(), false, &config());
        assert!(result.valid, "violations: {:?}", result.violations);
        assert!(result.violations.is_empty());
    }

    #[test]
    fn test_validation_is_idempotent() {
        let doc = valid_document();
        let first = validate(&doc, false, &config());
        let second = validate(&doc, false, &config());
        assert_eq!(first, second);

        let broken = "<div>fragment</div>";
        assert_eq!(
            validate(broken, true, &config()),
            validate(broken, true, &config())
        );
    }

    #[test]
    fn test_empty_string_fails_every_rule_class() {
        let result = validate("", false, &config());
        assert!(!result.valid);
        assert!(result.violations.contains(&Violation::MissingDoctype));
        assert!(result.violations.contains(&Violation::MissingBodyOpen));
        assert!(result.violations.contains(&Violation::NoStylingFound));
        assert!(result
            .violations
            .iter()
            .any(|v| matches!(v, Violation::TooShort { length: 0, .. })));
        // One MissingPlaceholder per required token
        assert_eq!(result.missing_placeholders().len(), 6);
    }

    #[test]
    fn test_missing_doctype_only() {
        let doc = valid_document().replacen("<!DOCTYPE html>\n", "", 1);
        let result = validate(&doc, false, &config());
        assert_eq!(result.violations, vec![Violation::MissingDoctype]);
    }

    #[test]
    fn test_missing_each_closing_tag() {
        let doc = valid_document().replacen("</body>", "", 1);
        let result = validate(&doc, false, &config());
        assert_eq!(result.violations, vec![Violation::MissingBodyClose]);

        let doc = valid_document().replacen("</html>", "", 1);
        let result = validate(&doc, false, &config());
        assert_eq!(result.violations, vec![Violation::MissingHtmlClose]);
    }

    #[test]
    fn test_header_element_does_not_satisfy_head_check() {
        // <header> must not be mistaken for <head>
        let doc = valid_document()
            .replacen("<head>", "<div>", 1)
            .replacen("</head>", "</div>", 1)
            .replacen("<body>", "<body>\n<header>top</header>", 1);
        let result = validate(&doc, false, &config());
        assert!(result.violations.contains(&Violation::MissingHead));
    }

    #[test]
    fn test_case_insensitive_tags() {
        let doc = valid_document()
            .replacen("<!DOCTYPE html>", "<!doctype HTML>", 1)
            .replacen("</body>", "</BODY>", 1)
            .replacen("</html>", "</HTML>", 1);
        let result = validate(&doc, false, &config());
        assert!(result.valid, "violations: {:?}", result.violations);
    }

    #[test]
    fn test_each_missing_required_placeholder_is_reported() {
        for token in PlaceholderToken::REQUIRED {
            // Pad the removal so the length rule does not fire instead.
            let doc = format!(
                "{}<!-- {} -->",
                valid_document().replace(token.marker(), ""),
                "x".repeat(32)
            );
            let result = validate(&doc, false, &config());
            assert_eq!(
                result.missing_placeholders(),
                vec![token],
                "expected only {token:?} to be missing"
            );
        }
    }

    #[test]
    fn test_content_placeholder_only_required_on_request() {
        let doc = valid_document();
        assert!(validate(&doc, false, &config()).valid);

        let result = validate(&doc, true, &config());
        assert!(!result.valid);
        assert_eq!(
            result.missing_placeholders(),
            vec![PlaceholderToken::ResumeContent]
        );
    }

    #[test]
    fn test_inline_style_attribute_counts_as_styling() {
        let doc = valid_document()
            .replacen("<style>", "<!--", 1)
            .replacen("</style>", "-->", 1)
            .replacen("<p>", "<p style=\"margin: 0;\">", 1);
        let result = validate(&doc, false, &config());
        assert!(
            !result.violations.contains(&Violation::NoStylingFound),
            "inline style= should satisfy the styling rule"
        );
    }

    #[test]
    fn test_too_short_reports_lengths() {
        let result = validate("<div>Hello</div>", false, &config());
        let too_short = result
            .violations
            .iter()
            .find(|v| matches!(v, Violation::TooShort { .. }))
            .expect("short fragment must trip the length rule");
        assert_eq!(
            *too_short,
            Violation::TooShort {
                length: 16,
                minimum: config().minimum_viable_len
            }
        );
    }

    #[test]
    fn test_severity_check() {
        assert!(validate("<div>Hello</div>", false, &config()).is_severely_incomplete());
        assert!(!validate(&valid_document(), false, &config()).is_severely_incomplete());

        // Missing one placeholder with intact structure is NOT severe
        let doc = format!(
            "{}<!-- {} -->",
            valid_document().replace("{{PORTFOLIO}}", ""),
            "x".repeat(32)
        );
        let result = validate(&doc, false, &config());
        assert!(!result.is_severely_incomplete());
        assert!(!result.valid);
    }

    #[test]
    fn test_only_closing_tags_missing() {
        let doc = valid_document().replacen("</html>", "", 1);
        assert!(validate(&doc, false, &config()).only_closing_tags_missing());

        let doc = valid_document()
            .replacen("</body>", "", 1)
            .replacen("</html>", "", 1);
        assert!(validate(&doc, false, &config()).only_closing_tags_missing());

        // Anything else structural disqualifies the cheap path
        let doc = valid_document()
            .replacen("<!DOCTYPE html>\n", "", 1)
            .replacen("</html>", "", 1);
        assert!(!validate(&doc, false, &config()).only_closing_tags_missing());

        // A fully intact document has nothing to append
        assert!(!validate(&valid_document(), false, &config()).only_closing_tags_missing());
    }

    #[test]
    fn test_descriptions_are_human_readable() {
        let result = validate("<div>Hello</div>", false, &config());
        let descriptions = result.descriptions();
        assert_eq!(descriptions.len(), result.violations.len());
        assert!(descriptions[0].contains("DOCTYPE"));
        assert!(descriptions
            .iter()
            .any(|d| d.contains("{{FULL_NAME}}")));
    }
}
