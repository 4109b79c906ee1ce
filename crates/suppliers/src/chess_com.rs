use std::time::Duration;

use chess_core::pgn::extract_headers;
use chess_core::ChesscomGame;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::config::SupplierConfig;
use crate::error::SupplierError;
use crate::GameSupplier;

pub struct ChessComClient {
    client: Client,
    base_url: String,
}

impl ChessComClient {
    pub fn new(config: &SupplierConfig) -> Result<Self, SupplierError> {
        let client = Client::builder()
            .user_agent("MistakeReview/1.0")
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.chesscom_api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Monthly archive URLs, oldest first as Chess.com lists them.
    pub async fn fetch_archives(&self, username: &str) -> Result<Vec<String>, SupplierError> {
        let url = format!("{}/player/{}/games/archives", self.base_url, username);
        debug!(%url, "Fetching archives");

        // Rate limit
        tokio::time::sleep(Duration::from_millis(100)).await;

        let resp = self.client.get(&url).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(SupplierError::UserNotFound(username.to_string()));
        }
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(SupplierError::Http { status, body });
        }

        let data: Value = resp.json().await?;
        let archives = data["archives"]
            .as_array()
            .map(|urls| {
                urls.iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();
        Ok(archives)
    }

    /// Games of one monthly archive, newest first.
    pub async fn fetch_archive_games(&self, archive_url: &str) -> Result<Vec<ChesscomGame>, SupplierError> {
        debug!(url = %archive_url, "Fetching archive games");
        tokio::time::sleep(Duration::from_millis(100)).await;

        let resp = self.client.get(archive_url).send().await?;
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(SupplierError::Http { status, body });
        }

        let data: Value = resp.json().await?;
        Ok(parse_archive_games(&data))
    }
}

impl GameSupplier for ChessComClient {
    /// Games of the most recent monthly archive, newest first.
    async fn fetch_games(&self, username: &str) -> Result<Vec<ChesscomGame>, SupplierError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(SupplierError::InvalidInput("Please enter a Chess.com username."));
        }

        let archives = self.fetch_archives(username).await?;
        let Some(latest) = archives.last() else {
            return Ok(Vec::new());
        };

        let games = self.fetch_archive_games(latest).await?;
        debug!(count = games.len(), "Games found in latest archive");
        Ok(games)
    }
}

/// Turn an archive JSON body into games. Headers come from the PGN; White,
/// Black and Result are filled from the player objects when the PGN lacks
/// them. Archives list games oldest first, so the result is reversed.
pub fn parse_archive_games(data: &Value) -> Vec<ChesscomGame> {
    let games = data["games"].as_array().cloned().unwrap_or_default();

    let mut results: Vec<ChesscomGame> = games
        .iter()
        .filter_map(|game| {
            let pgn = game.get("pgn").and_then(|v| v.as_str())?;
            let mut headers = extract_headers(pgn);

            let player = |side: &str, field: &str| {
                game.get(side)
                    .and_then(|p| p.get(field))
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
            };

            if !headers.contains_key("White") {
                if let Some(name) = player("white", "username") {
                    headers.insert("White".to_string(), name);
                }
            }
            if !headers.contains_key("Black") {
                if let Some(name) = player("black", "username") {
                    headers.insert("Black".to_string(), name);
                }
            }
            if !headers.contains_key("Result") {
                let result = if player("white", "result").as_deref() == Some("win") {
                    "1-0"
                } else if player("black", "result").as_deref() == Some("win") {
                    "0-1"
                } else {
                    "1/2-1/2"
                };
                headers.insert("Result".to_string(), result.to_string());
            }

            Some(ChesscomGame {
                pgn: pgn.to_string(),
                headers,
            })
        })
        .collect();

    results.reverse();
    results
}
