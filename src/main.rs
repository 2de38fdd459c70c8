//! event-financials server
//!
//! Loads the money rules from `RULES_DIR` and serves the financials API on
//! `PORT`.

use event_financials::api::{AppState, create_router};
use event_financials::config::RulesLoader;
use tracing_subscriber::EnvFilter;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const DEFAULT_RULES_DIR: &str = "./config/default";
const DEFAULT_PORT: u16 = 8080;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let rules_dir = std::env::var("RULES_DIR").unwrap_or_else(|_| DEFAULT_RULES_DIR.to_string());
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);

    let loader = RulesLoader::load(&rules_dir)?;
    let app = create_router(AppState::new(loader.into_rules()));

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(rules_dir = %rules_dir, "event-financials listening on {addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
