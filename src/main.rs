use std::sync::Arc;

use burlometro::analysis::AnalysisService;
use burlometro::api::{ApiState, api_routes};
use burlometro::config::ServerConfig;
use burlometro::llm::{OpenRouterClassifier, RemoteClassifier};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = ServerConfig::from_env();

    let remote: Option<Arc<dyn RemoteClassifier>> = match &config.api_key {
        Some(key) => Some(Arc::new(OpenRouterClassifier::new(
            key.clone(),
            &config.model,
        ))),
        None => {
            tracing::info!("OPENROUTER_API_KEY not set, running in local-fallback mode");
            None
        }
    };

    eprintln!("🛡️  Burlómetro v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Analyze API: http://0.0.0.0:{}/api/analyze", config.port);
    eprintln!("   Health:      http://0.0.0.0:{}/api/health", config.port);
    eprintln!(
        "   Remote classifier: {}",
        if remote.is_some() {
            config.model.as_str()
        } else {
            "disabled (heuristic only)"
        }
    );

    let service = Arc::new(AnalysisService::new(remote));
    let app = api_routes(ApiState { service }, &config.allowed_origins);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!(port = config.port, "Burlómetro server started");
    axum::serve(listener, app).await?;

    Ok(())
}
