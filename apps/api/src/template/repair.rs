//! Repair pipeline — severity check and stage composition.
//!
//! Flow: validate → (severely incomplete? Completer : Patcher for missing
//! tokens) → post-processing transforms.
//!
//! The pipeline never rejects input: every string, however malformed, comes
//! back as a renderable document that passes the structural checklist. The
//! caller-facing policy split (validate-then-reject vs validate-then-repair)
//! lives in the handlers; this module always repairs.

#![allow(dead_code)]

use serde::Serialize;
use tracing::{debug, info};

use crate::models::style_option::StyleOption;
use crate::template::completer::complete;
use crate::template::patcher::patch_placeholders;
use crate::template::transforms::{default_transforms, Transform};
use crate::template::validator::{validate, ValidationResult, Violation};
use crate::template::RepairConfig;

// ────────────────────────────────────────────────────────────────────────────
// Outcome types
// ────────────────────────────────────────────────────────────────────────────

/// Which structural route the document took through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairPath {
    /// Already structurally valid — only transforms were applied.
    Untouched,
    /// Nearly complete: the literal missing closing tags were appended.
    ClosingTagsAppended,
    /// Structure was sound; missing placeholder tokens were injected.
    Patched,
    /// Severely incomplete: rebuilt from salvage + fallback content.
    Rebuilt,
}

/// Result of a full repair pass.
#[derive(Debug, Clone, Serialize)]
pub struct RepairOutcome {
    pub html: String,
    pub path: RepairPath,
    /// What the validator reported on the raw input, for telemetry.
    pub violations_before: Vec<Violation>,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// The template repair pipeline: a severity check in front of the Completer
/// and Patcher, followed by an ordered list of post-processing transforms.
///
/// Pure and synchronous — safe to share behind an `Arc` across handlers.
pub struct RepairPipeline {
    config: RepairConfig,
    transforms: Vec<Box<dyn Transform>>,
}

impl RepairPipeline {
    pub fn new(config: RepairConfig) -> Self {
        Self {
            config,
            transforms: default_transforms(),
        }
    }

    /// Replaces the transform stages (test seam; production uses the default
    /// order).
    pub fn with_transforms(config: RepairConfig, transforms: Vec<Box<dyn Transform>>) -> Self {
        Self { config, transforms }
    }

    pub fn config(&self) -> &RepairConfig {
        &self.config
    }

    /// Validate-only entry point (validate-then-reject policy).
    pub fn validate(&self, html: &str, expect_content_placeholder: bool) -> ValidationResult {
        validate(html, expect_content_placeholder, &self.config)
    }

    /// Structural stages only: severity check, then Completer or Patcher.
    ///
    /// A structurally valid input is returned unchanged (minimal
    /// intervention). Returns the repaired string, the route taken, and the
    /// validation of the raw input.
    pub fn structural_repair(
        &self,
        html: &str,
        fallback_content: &str,
        expect_content_placeholder: bool,
    ) -> (String, RepairPath, ValidationResult) {
        let before = validate(html, expect_content_placeholder, &self.config);
        if before.valid {
            return (html.to_string(), RepairPath::Untouched, before);
        }

        let (mut repaired, mut path) = if before.is_severely_incomplete() {
            let route = if before.only_closing_tags_missing() {
                RepairPath::ClosingTagsAppended
            } else {
                RepairPath::Rebuilt
            };
            (complete(html, fallback_content, &self.config), route)
        } else {
            (html.to_string(), RepairPath::Untouched)
        };

        // Placeholder sweep. Covers the patch route and any token the
        // Completer does not emit (the optional content slot).
        let missing = validate(&repaired, expect_content_placeholder, &self.config)
            .missing_placeholders();
        if !missing.is_empty() {
            repaired = patch_placeholders(&repaired, &missing);
            if path == RepairPath::Untouched {
                path = RepairPath::Patched;
            }
        }

        (repaired, path, before)
    }

    /// Full pipeline: structural repair, then every transform stage in
    /// order. Transforms run even when the input was already valid.
    pub fn repair(
        &self,
        html: &str,
        fallback_content: &str,
        expect_content_placeholder: bool,
    ) -> RepairOutcome {
        let (mut out, path, before) =
            self.structural_repair(html, fallback_content, expect_content_placeholder);

        for transform in &self.transforms {
            debug!("Applying transform '{}'", transform.name());
            out = transform.apply(&out);
        }

        RepairOutcome {
            html: out,
            path,
            violations_before: before.violations,
        }
    }

    /// Repairs a batch of style options sequentially, in array order, so the
    /// per-option log lines are reproducible across runs.
    pub fn repair_options(
        &self,
        options: Vec<StyleOption>,
        fallback_content: &str,
        expect_content_placeholder: bool,
    ) -> Vec<StyleOption> {
        options
            .into_iter()
            .map(|mut option| {
                let outcome =
                    self.repair(&option.html, fallback_content, expect_content_placeholder);
                info!(
                    "Repaired style option '{}' ({}): {:?}, {} violation(s) before",
                    option.name,
                    option.id,
                    outcome.path,
                    outcome.violations_before.len()
                );
                option.html = outcome.html;
                option
            })
            .collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::style_option::LayoutKind;
    use crate::template::tokens::PlaceholderToken;
    use uuid::Uuid;

    fn pipeline() -> RepairPipeline {
        RepairPipeline::new(RepairConfig::default())
    }

    fn valid_document() -> String {
        complete("", "**Experience**\n- Shipped the thing", &RepairConfig::default())
    }

    /// The core correctness property: whatever goes in, a structurally valid
    /// document comes out.
    #[test]
    fn test_repair_closes_the_loop() {
        let pipeline = pipeline();

        let mut inputs: Vec<String> = vec![
            String::new(),
            "<a".to_string(),
            "<div>Hello</div>".to_string(),
            valid_document(),
            valid_document().replacen("<!DOCTYPE html>\n", "", 1),
            // truncated mid-attribute
            valid_document()[..valid_document().find("class=\"contact-info\"").unwrap() + 10]
                .to_string(),
        ];
        // A document missing exactly one placeholder, parameterized over all six
        for token in PlaceholderToken::REQUIRED {
            inputs.push(format!(
                "{}<!-- {} -->",
                valid_document().replace(token.marker(), ""),
                "x".repeat(32)
            ));
        }

        for input in inputs {
            let outcome = pipeline.repair(&input, "fallback resume text", false);
            let after = pipeline.validate(&outcome.html, false);
            assert!(
                after.valid,
                "input {:?}… left violations {:?} (path {:?})",
                &input[..input.len().min(60)],
                after.violations,
                outcome.path
            );
        }
    }

    #[test]
    fn test_repair_honors_content_placeholder_mode() {
        let pipeline = pipeline();
        let outcome = pipeline.repair("<div>Hello</div>", "", true);
        assert!(outcome.html.contains("{{RESUME_CONTENT}}"));
        assert!(pipeline.validate(&outcome.html, true).valid);

        // Not requested → the rebuilt skeleton does not plant the token
        let outcome = pipeline.repair("<div>Hello</div>", "", false);
        assert!(!outcome.html.contains("{{RESUME_CONTENT}}"));
    }

    #[test]
    fn test_structural_repair_is_identity_on_valid_input() {
        let pipeline = pipeline();
        let doc = valid_document();
        let (out, path, before) = pipeline.structural_repair(&doc, "", false);
        assert_eq!(out, doc);
        assert_eq!(path, RepairPath::Untouched);
        assert!(before.valid);
    }

    #[test]
    fn test_transforms_still_run_on_valid_input() {
        let pipeline = pipeline();
        let doc = valid_document();
        let outcome = pipeline.repair(&doc, "", false);
        assert_eq!(outcome.path, RepairPath::Untouched);
        assert_ne!(outcome.html, doc, "transform stages apply regardless");
        assert!(outcome.html.contains("@media print"));
        assert!(outcome.html.contains(".density-compact"));
    }

    #[test]
    fn test_transforms_preserve_validity() {
        let pipeline = pipeline();
        let outcome = pipeline.repair(&valid_document(), "", false);
        assert!(pipeline.validate(&outcome.html, false).valid);
    }

    // ── concrete scenarios ──────────────────────────────────────────────────

    #[test]
    fn test_scenario_tiny_fragment_takes_rebuild_path() {
        let pipeline = pipeline();
        let outcome = pipeline.repair("<div>Hello</div>", "", false);
        assert_eq!(outcome.path, RepairPath::Rebuilt);
        assert!(outcome.html.contains("<!DOCTYPE html>"));
        assert!(outcome.html.contains("<h1>{{FULL_NAME}}</h1>"));
        for token in PlaceholderToken::CONTACT {
            assert!(outcome.html.contains(token.marker()));
        }
    }

    #[test]
    fn test_scenario_one_missing_token_takes_patch_path() {
        let pipeline = pipeline();
        let input = format!(
            "{}<!-- {} -->",
            valid_document().replace("{{PORTFOLIO}}", ""),
            "x".repeat(32)
        );
        let outcome = pipeline.repair(&input, "", false);
        assert_eq!(outcome.path, RepairPath::Patched);
        assert_eq!(
            outcome.violations_before,
            vec![Violation::MissingPlaceholder(PlaceholderToken::Portfolio)]
        );
        // Batch policy: the whole contact block arrives
        for token in PlaceholderToken::CONTACT {
            assert!(outcome.html.contains(token.marker()));
        }
    }

    #[test]
    fn test_scenario_missing_html_close_takes_append_path() {
        let pipeline = pipeline();
        let input = valid_document()
            .trim_end()
            .trim_end_matches("</html>")
            .to_string();
        let (out, path, _) = pipeline.structural_repair(&input, "", false);
        assert_eq!(path, RepairPath::ClosingTagsAppended);
        assert_eq!(out, format!("{input}\n</html>"));
    }

    // ── batch repair ────────────────────────────────────────────────────────

    fn option(name: &str, html: &str) -> StyleOption {
        StyleOption {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: format!("{name} layout"),
            layout: LayoutKind::SingleColumn,
            font_size_pt: 10.5,
            line_spacing: 1.35,
            html: html.to_string(),
        }
    }

    #[test]
    fn test_repair_options_preserves_order_and_metadata() {
        let pipeline = pipeline();
        let doc = valid_document();
        let options = vec![
            option("compact", "<div>broken</div>"),
            option("standard", &doc),
            option("spacious", ""),
        ];
        let ids: Vec<Uuid> = options.iter().map(|o| o.id).collect();

        let repaired = pipeline.repair_options(options, "fallback", false);
        assert_eq!(repaired.len(), 3);
        assert_eq!(
            repaired.iter().map(|o| o.id).collect::<Vec<_>>(),
            ids,
            "array order is stable"
        );
        for opt in &repaired {
            assert!(pipeline.validate(&opt.html, false).valid, "option {}", opt.name);
        }
        assert_eq!(repaired[0].name, "compact");
        assert!((repaired[0].font_size_pt - 10.5).abs() < f32::EPSILON);
    }
}
