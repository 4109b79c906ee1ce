//! Supplier configuration from environment variables

use std::env;

#[derive(Clone, Debug)]
pub struct SupplierConfig {
    pub chesscom_api_base: String,
    pub ollama_url: String,
    pub ollama_model: String,
    pub http_timeout_secs: u64,
    /// Local models can take minutes on a handful of games.
    pub analysis_timeout_secs: u64,
    /// Newest games sent for analysis.
    pub max_games: usize,
}

impl Default for SupplierConfig {
    fn default() -> Self {
        Self {
            chesscom_api_base: "https://api.chess.com/pub".to_string(),
            ollama_url: "http://localhost:11434".to_string(),
            ollama_model: "llama3".to_string(),
            http_timeout_secs: 30,
            analysis_timeout_secs: 600,
            max_games: 5,
        }
    }
}

impl SupplierConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            chesscom_api_base: env::var("CHESSCOM_API_BASE")
                .unwrap_or(defaults.chesscom_api_base),
            ollama_url: env::var("OLLAMA_URL").unwrap_or(defaults.ollama_url),
            ollama_model: env::var("OLLAMA_MODEL").unwrap_or(defaults.ollama_model),
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.http_timeout_secs),
            analysis_timeout_secs: env::var("ANALYSIS_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.analysis_timeout_secs),
            max_games: env::var("MAX_GAMES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_games),
        }
    }
}
