use std::sync::Arc;

use crate::config::Config;
use crate::template::RepairPipeline;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// The template repair pipeline. Pure and synchronous — shared read-only
    /// across handlers.
    pub repair: Arc<RepairPipeline>,
}
