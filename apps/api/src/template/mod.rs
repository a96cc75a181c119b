// Template repair pipeline for AI-generated resume styles.
// Stages: structural validation → completion or patching → post-processing.
// Everything in this tree is pure string transformation — no I/O, no async.

pub mod completer;
pub mod handlers;
pub mod patcher;
pub mod render;
pub mod repair;
pub mod tokens;
pub mod transforms;
pub mod validator;

pub use repair::{RepairOutcome, RepairPath, RepairPipeline};

use tokens::PlaceholderToken;

/// Documents shorter than this are treated as truncated fragments and fully
/// rebuilt. Overridable via `MIN_TEMPLATE_LEN` (see `config.rs`).
pub const MINIMUM_VIABLE_DOCUMENT_LEN: usize = 1000;

/// Tunable knobs for the repair pipeline, injected at construction so tests
/// and callers are not tied to the production thresholds.
#[derive(Debug, Clone)]
pub struct RepairConfig {
    /// Severity threshold: inputs below this length are rebuilt outright.
    pub minimum_viable_len: usize,
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self {
            minimum_viable_len: MINIMUM_VIABLE_DOCUMENT_LEN,
        }
    }
}

/// The standard contact block markup shared by the Completer's skeleton and
/// the Patcher's batch injection: all five contact tokens, in canonical
/// order.
pub(crate) fn contact_block() -> String {
    let mut block = String::from("<div class=\"contact-info\">\n");
    for token in PlaceholderToken::CONTACT {
        block.push_str("  <span class=\"contact-item\">");
        block.push_str(token.marker());
        block.push_str("</span>\n");
    }
    block.push_str("</div>");
    block
}
