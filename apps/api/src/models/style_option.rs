use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Column arrangement of a generated template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    SingleColumn,
    TwoColumn,
}

/// One candidate template produced by the upstream style generator.
///
/// Several options are generated in parallel for the same resume content
/// ("compact", "standard", "spacious"), each carrying its own document. The
/// repair pipeline mutates `html` in place (each stage returns a new string)
/// and leaves the metadata alone; nothing is persisted — options live only
/// for the duration of a generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleOption {
    pub id: Uuid,
    /// Short label, e.g. "compact".
    pub name: String,
    pub description: String,
    pub layout: LayoutKind,
    pub font_size_pt: f32,
    pub line_spacing: f32,
    /// The template document. Expected, not guaranteed, to be complete HTML.
    pub html: String,
}
