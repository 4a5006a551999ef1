//! Server configuration, built from environment variables.

use secrecy::SecretString;

use crate::llm::DEFAULT_MODEL;

/// Browser origins allowed by CORS: the production front end plus local
/// development servers.
const ALLOWED_ORIGINS: [&str; 4] = [
    "https://burlometro.pt",
    "https://www.burlometro.pt",
    "http://localhost:3000",
    "http://127.0.0.1:3000",
];

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// OpenRouter credential. `None` means permanent local-fallback mode —
    /// an expected operating mode, not an error.
    pub api_key: Option<SecretString>,
    pub model: String,
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Build config from environment variables.
    pub fn from_env() -> Self {
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let api_key = std::env::var("OPENROUTER_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(SecretString::from);

        let model =
            std::env::var("BURLOMETRO_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Self {
            port,
            api_key,
            model,
            allowed_origins: ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect(),
        }
    }
}
