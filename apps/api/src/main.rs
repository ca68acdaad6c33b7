mod config;
mod errors;
mod jobs;
mod resume;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::jobs::client::{ApiCredentials, JobFetcher};
use crate::resume::catalog::SkillCatalog;
use crate::resume::document::ExtensionRouter;
use crate::resume::parser::ResumeParser;
use crate::resume::tokenizer::{HfTokenizerLoader, TokenizerLoader};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Scout v{}", env!("CARGO_PKG_VERSION"));

    // Skill vocabulary (built-in unless overridden)
    let catalog = match &config.skill_catalog {
        Some(skills) => SkillCatalog::new(skills)?,
        None => SkillCatalog::default(),
    };
    info!("Skill catalog loaded ({} skills)", catalog.len());
    debug!("Skills: {:?}", catalog.skills().collect::<Vec<_>>());

    // Optional tokenizer; load failures fall back to keyword search per call
    let tokenizer = config.tokenizer_path.as_ref().map(|path| {
        info!("Tokenizer model configured at {path}");
        Arc::new(HfTokenizerLoader::new(path)) as Arc<dyn TokenizerLoader>
    });

    let parser = ResumeParser::new(
        Arc::new(catalog),
        Arc::new(ExtensionRouter::default()),
        tokenizer,
    );
    info!(
        "Résumé parser initialized (tokenizer: {})",
        if parser.has_tokenizer() { "configured" } else { "none" }
    );

    let jobs = JobFetcher::new(
        ApiCredentials {
            app_id: config.adzuna_app_id.clone(),
            app_key: config.adzuna_app_key.clone(),
        },
        config.adzuna_search_url.clone(),
    );
    info!("Job fetcher initialized (transport: {})", jobs.transport_name());

    let state = AppState::new(&config, parser, jobs);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
