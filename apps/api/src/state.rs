use std::sync::Arc;

use crate::analysis::engine::SkillEngine;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Read-only analysis engine. Holds the taxonomy; safe to share across requests.
    pub engine: Arc<SkillEngine>,
}
