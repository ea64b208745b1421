mod analysis;
mod config;
mod errors;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::engine::SkillEngine;
use crate::analysis::taxonomy::SkillTaxonomy;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillMatch API v{}", env!("CARGO_PKG_VERSION"));

    // Load the skill taxonomy once; it is read-only from here on
    let taxonomy = match &config.taxonomy_path {
        Some(path) => SkillTaxonomy::from_path(path)
            .with_context(|| format!("Failed to load skill taxonomy from {}", path.display()))?,
        None => SkillTaxonomy::builtin(),
    };
    info!(
        "Skill taxonomy loaded: {} roles, {} known skills",
        taxonomy.roles().len(),
        taxonomy.known_skills().len()
    );

    let engine = Arc::new(SkillEngine::new(
        Arc::new(taxonomy),
        config.scoring.clone(),
        config.inference_depth,
    ));
    info!(
        "Scoring: {:?}, inference depth: {:?}",
        config.scoring, config.inference_depth
    );

    let state = AppState {
        config: config.clone(),
        engine,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
