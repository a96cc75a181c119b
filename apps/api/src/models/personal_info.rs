use serde::{Deserialize, Serialize};

/// The user's contact record, substituted into a repaired template by the
/// renderer. The repair pipeline itself never sees these values — it only
/// guarantees the placeholder tokens exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub portfolio: String,
}
