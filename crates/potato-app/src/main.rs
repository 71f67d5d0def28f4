//! Potato application binary - composition root.
//!
//! Ties the Potato crates into a single executable:
//! 1. Parse CLI arguments and load configuration from TOML
//! 2. Initialize tracing
//! 3. Read the generation API key (fatal if missing)
//! 4. Build the Gemini client, search client, trigger and session store
//! 5. Start the axum HTTP server

mod cli;

use std::sync::Arc;

use clap::Parser;

use potato_api::routes;
use potato_api::state::AppState;
use potato_chat::{ChatOrchestrator, InMemorySessionStore, KeywordTrigger};
use potato_core::config::PotatoConfig;
use potato_llm::GeminiClient;
use potato_search::DuckDuckGoClient;

use cli::CliArgs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config. Loaded before tracing so the configured log level applies;
    // the load outcome is logged once the subscriber is up.
    let config_file = args.resolve_config_path();
    let loaded = PotatoConfig::load(&config_file);
    let mut config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => PotatoConfig::default(),
    };
    let rejected_port = args.apply_overrides(&mut config);

    // Tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| tracing_subscriber::EnvFilter::try_new(&config.general.log_level))
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting Potato v{}", env!("CARGO_PKG_VERSION"));
    match loaded {
        Ok(_) => tracing::info!(path = %config_file.display(), "Configuration loaded"),
        Err(e) => tracing::warn!(
            path = %config_file.display(),
            error = %e,
            "Failed to load config, using defaults"
        ),
    }
    if let Some(value) = rejected_port {
        tracing::warn!(value = %value, "Ignoring invalid POTATO_PORT");
    }

    // Credentials.
    let api_key = match config.llm.api_key_from_env() {
        Ok(key) => key,
        Err(e) => {
            tracing::error!(error = %e, "Cannot start without a generation API key");
            return Err(e.into());
        }
    };

    // Collaborators.
    let model = Arc::new(GeminiClient::new(api_key, &config.llm)?);
    tracing::info!(model = %config.llm.model, "Gemini client ready");

    let search = Arc::new(DuckDuckGoClient::new(&config.search)?);
    tracing::info!(endpoint = %config.search.endpoint, "Search client ready");

    let trigger = Arc::new(KeywordTrigger::new(config.search.keywords.iter()));
    tracing::info!(keywords = trigger.keywords().len(), "Search trigger ready");
    let sessions = Arc::new(InMemorySessionStore::new(model));
    let orchestrator = ChatOrchestrator::new(trigger, search, sessions, &config.chat);

    // === HTTP server ===

    let state = AppState::new(config.clone(), orchestrator);
    tracing::info!(
        "Chat UI at http://{}:{}/",
        config.general.host,
        config.general.port
    );

    if let Err(e) = routes::start_server(&config, state).await {
        tracing::error!(error = %e, "Server stopped");
        return Err(e.into());
    }

    Ok(())
}
