//! External collaborators of the review core: where games come from and who
//! analyzes them. The core only ever sees their output types.

use std::future::Future;

use chess_core::{ChesscomGame, MultiGameAnalysisReport};
use tracing::info;

pub mod chess_com;
pub mod config;
pub mod error;
pub mod ollama;
pub mod prompt;

pub use chess_com::ChessComClient;
pub use config::SupplierConfig;
pub use error::SupplierError;
pub use ollama::OllamaClient;

/// Source of a player's recent games, newest first.
pub trait GameSupplier {
    fn fetch_games(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Vec<ChesscomGame>, SupplierError>> + Send;
}

/// Turns a batch of PGNs into a structured mistake report.
pub trait AnalysisSupplier {
    fn analyze(
        &self,
        pgns: &[String],
        username: &str,
    ) -> impl Future<Output = Result<MultiGameAnalysisReport, SupplierError>> + Send;
}

/// Which fetched games go to the analysis supplier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameSelection {
    /// The newest `n` games (at least one).
    Newest(usize),
    /// Positions in the fetched list, newest first, as printed by `--list`.
    Indices(Vec<usize>),
}

impl GameSelection {
    /// Pick the selected games. Repeated indices count once; an empty or
    /// out-of-range selection is rejected.
    pub fn apply(&self, games: Vec<ChesscomGame>) -> Result<Vec<ChesscomGame>, SupplierError> {
        match self {
            GameSelection::Newest(n) => Ok(games.into_iter().take((*n).max(1)).collect()),
            GameSelection::Indices(indices) => {
                if indices.is_empty() || indices.iter().any(|&i| i >= games.len()) {
                    return Err(SupplierError::InvalidInput(
                        "Please select at least one game to analyze.",
                    ));
                }
                let mut seen = Vec::with_capacity(indices.len());
                for &i in indices {
                    if !seen.contains(&i) {
                        seen.push(i);
                    }
                }
                Ok(seen.into_iter().map(|i| games[i].clone()).collect())
            }
        }
    }
}

/// A player's recent games, newest first. No games is an error.
pub async fn recent_games<G: GameSupplier>(
    games: &G,
    username: &str,
) -> Result<Vec<ChesscomGame>, SupplierError> {
    let fetched = games.fetch_games(username).await?;
    if fetched.is_empty() {
        return Err(SupplierError::InvalidInput(
            "No recent games found. Make sure the username is correct and the user has played games recently.",
        ));
    }
    Ok(fetched)
}

/// Fetch a player's games and analyze the selected ones. Returns the
/// analyzed games alongside the report.
pub async fn build_report<G, A>(
    games: &G,
    analysis: &A,
    username: &str,
    selection: &GameSelection,
) -> Result<(Vec<ChesscomGame>, MultiGameAnalysisReport), SupplierError>
where
    G: GameSupplier,
    A: AnalysisSupplier,
{
    let fetched = recent_games(games, username).await?;
    let selected = selection.apply(fetched)?;

    info!(count = selected.len(), "Analyzing games");
    let pgns: Vec<String> = selected.iter().map(|g| g.pgn.clone()).collect();
    let report = analysis.analyze(&pgns, username).await?;
    Ok((selected, report))
}
