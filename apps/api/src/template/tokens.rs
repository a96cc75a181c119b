//! Placeholder Contract — the closed set of substitution tokens a finished
//! template must carry.
//!
//! Tokens are literal marker strings embedded verbatim in the HTML text and
//! replaced by exact string substitution at render time (see `render.rs`).
//! They are NOT a templating syntax: no escaping, no expressions, no nesting.
//!
//! A template is *complete* when all six required tokens appear at least
//! once. `ResumeContent` is optional — some style-generation modes inline the
//! resume body directly instead of leaving a slot for it.

#![allow(dead_code)]

use serde::{Deserialize, Serialize};

/// One substitution token in a resume template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderToken {
    FullName,
    Email,
    Phone,
    Location,
    Linkedin,
    Portfolio,
    /// Optional slot for the rendered resume body.
    ResumeContent,
}

impl PlaceholderToken {
    /// The six tokens every template must contain, in canonical order.
    pub const REQUIRED: [PlaceholderToken; 6] = [
        PlaceholderToken::FullName,
        PlaceholderToken::Email,
        PlaceholderToken::Phone,
        PlaceholderToken::Location,
        PlaceholderToken::Linkedin,
        PlaceholderToken::Portfolio,
    ];

    /// The five contact-field tokens, in the order they appear in an
    /// injected contact block.
    pub const CONTACT: [PlaceholderToken; 5] = [
        PlaceholderToken::Email,
        PlaceholderToken::Phone,
        PlaceholderToken::Location,
        PlaceholderToken::Linkedin,
        PlaceholderToken::Portfolio,
    ];

    /// The literal marker string substituted at render time.
    pub fn marker(&self) -> &'static str {
        match self {
            PlaceholderToken::FullName => "{{FULL_NAME}}",
            PlaceholderToken::Email => "{{EMAIL}}",
            PlaceholderToken::Phone => "{{PHONE}}",
            PlaceholderToken::Location => "{{LOCATION}}",
            PlaceholderToken::Linkedin => "{{LINKEDIN}}",
            PlaceholderToken::Portfolio => "{{PORTFOLIO}}",
            PlaceholderToken::ResumeContent => "{{RESUME_CONTENT}}",
        }
    }

    /// True for the six tokens a complete template must carry.
    pub fn is_required(&self) -> bool {
        !matches!(self, PlaceholderToken::ResumeContent)
    }

    /// True for the five contact-field tokens (everything except the name
    /// and the content slot).
    pub fn is_contact(&self) -> bool {
        matches!(
            self,
            PlaceholderToken::Email
                | PlaceholderToken::Phone
                | PlaceholderToken::Location
                | PlaceholderToken::Linkedin
                | PlaceholderToken::Portfolio
        )
    }
}
