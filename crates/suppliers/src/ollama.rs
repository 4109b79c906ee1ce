//! Analysis supplier backed by a local Ollama server.

use std::time::Duration;

use chess_core::MultiGameAnalysisReport;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::SupplierConfig;
use crate::error::SupplierError;
use crate::prompt::analysis_prompt;
use crate::AnalysisSupplier;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    format: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,
}

pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(config: &SupplierConfig) -> Result<Self, SupplierError> {
        if config.ollama_model.trim().is_empty() {
            return Err(SupplierError::Config("OLLAMA_MODEL is empty".to_string()));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.analysis_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.ollama_url.trim_end_matches('/').to_string(),
            model: config.ollama_model.clone(),
        })
    }

    /// One non-streaming JSON-mode completion; returns the raw model text.
    pub async fn generate(&self, prompt: &str) -> Result<String, SupplierError> {
        let url = format!("{}/api/generate", self.base_url);
        info!(model = %self.model, %url, "Sending prompt to Ollama");

        let resp = self
            .client
            .post(&url)
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
                format: "json",
                stream: false,
            })
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            warn!(status, %body, "Ollama API error");
            return Err(SupplierError::Http { status, body });
        }

        let data: GenerateResponse = resp.json().await?;
        match data.response {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(SupplierError::EmptyResponse),
        }
    }
}

impl AnalysisSupplier for OllamaClient {
    async fn analyze(
        &self,
        pgns: &[String],
        username: &str,
    ) -> Result<MultiGameAnalysisReport, SupplierError> {
        if pgns.is_empty() {
            return Err(SupplierError::InvalidInput(
                "Please select at least one game to analyze.",
            ));
        }
        let prompt = analysis_prompt(pgns, username);
        let raw = self.generate(&prompt).await?;
        parse_report(&raw)
    }
}

/// Parse the model's text as a report. Tolerates a surrounding markdown code
/// fence.
pub fn parse_report(raw: &str) -> Result<MultiGameAnalysisReport, SupplierError> {
    let trimmed = raw.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .map(|rest| rest.trim_end().trim_end_matches("```"))
        .unwrap_or(trimmed);

    match MultiGameAnalysisReport::from_json(body) {
        Ok(report) => {
            debug!(examples = report.example_count(), "Parsed analysis report");
            Ok(report)
        }
        Err(e) => {
            warn!(raw = %raw, "Model output is not a valid report");
            Err(SupplierError::MalformedReport(e.to_string()))
        }
    }
}
