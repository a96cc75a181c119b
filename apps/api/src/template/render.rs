//! Placeholder substitution — the downstream rendering step that turns a
//! repaired template into a personalized document.
//!
//! Exact string replacement of the literal markers, nothing more. The repair
//! pipeline guarantees the required tokens exist; this module fills them.

use crate::models::personal_info::PersonalInfo;
use crate::template::tokens::PlaceholderToken;

/// Substitutes the six required tokens with the user's real values.
pub fn render_personal_info(html: &str, info: &PersonalInfo) -> String {
    html.replace(PlaceholderToken::FullName.marker(), &info.full_name)
        .replace(PlaceholderToken::Email.marker(), &info.email)
        .replace(PlaceholderToken::Phone.marker(), &info.phone)
        .replace(PlaceholderToken::Location.marker(), &info.location)
        .replace(PlaceholderToken::Linkedin.marker(), &info.linkedin)
        .replace(PlaceholderToken::Portfolio.marker(), &info.portfolio)
}

/// Substitutes the optional content slot with pre-rendered resume body HTML.
pub fn render_content(html: &str, content_html: &str) -> String {
    html.replace(PlaceholderToken::ResumeContent.marker(), content_html)
}
