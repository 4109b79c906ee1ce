//! Supplier error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SupplierError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    InvalidInput(&'static str),

    #[error("Chess.com user '{0}' not found.")]
    UserNotFound(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("A network error occurred: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Received an empty response from the analysis server.")]
    EmptyResponse,

    #[error("Received an invalid JSON format from the AI: {0}")]
    MalformedReport(String),
}
