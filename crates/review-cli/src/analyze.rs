//! `analyze`: fetch recent games, have them analyzed, write the report.

use std::io::{self, Write};
use std::path::Path;

use anyhow::Context;
use chess_core::ChesscomGame;
use suppliers::{
    build_report, recent_games, ChessComClient, GameSelection, OllamaClient, SupplierConfig,
};
use tracing::info;

pub struct AnalyzeRequest<'a> {
    pub username: &'a str,
    pub out: Option<&'a Path>,
    pub games: Option<usize>,
    pub list: bool,
    pub select: Option<Vec<usize>>,
}

pub async fn run(request: AnalyzeRequest<'_>) -> anyhow::Result<()> {
    let config = SupplierConfig::from_env();
    let chess_com = ChessComClient::new(&config)?;

    if request.list {
        let games = recent_games(&chess_com, request.username).await?;
        write_game_list(&games, io::stdout().lock())?;
        return Ok(());
    }

    let selection = match request.select {
        Some(indices) => GameSelection::Indices(indices),
        None => GameSelection::Newest(request.games.unwrap_or(config.max_games)),
    };
    let ollama = OllamaClient::new(&config)?;

    let (analyzed, report) =
        build_report(&chess_com, &ollama, request.username, &selection).await?;
    for game in &analyzed {
        info!(game = %game.display_name(), "Analyzed");
    }
    info!(
        themes = report.recurring_themes.len(),
        examples = report.example_count(),
        "Report ready"
    );

    let json = serde_json::to_string_pretty(&report)?;
    match request.out {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("writing report to {}", path.display()))?;
            info!(path = %path.display(), "Report written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// One game per line, prefixed with the index `--select` expects.
pub fn write_game_list<W: Write>(games: &[ChesscomGame], mut out: W) -> io::Result<()> {
    for (index, game) in games.iter().enumerate() {
        writeln!(out, "{index:>3}  {}", game.display_name())?;
    }
    writeln!(out, "Pick games with --select, e.g. --select 0,2")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn game(date: &str, white: &str, black: &str) -> ChesscomGame {
        let headers = BTreeMap::from([
            ("Date".to_string(), date.to_string()),
            ("White".to_string(), white.to_string()),
            ("Black".to_string(), black.to_string()),
            ("Result".to_string(), "1-0".to_string()),
        ]);
        ChesscomGame { pgn: String::new(), headers }
    }

    #[test]
    fn test_game_list_is_indexed_newest_first() {
        let games = vec![
            game("2025.01.02", "alice", "bob"),
            game("2025.01.01", "carol", "alice"),
        ];
        let mut out = Vec::new();
        write_game_list(&games, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "  0  2025.01.02 - alice vs bob (1-0)");
        assert_eq!(lines[1], "  1  2025.01.01 - carol vs alice (1-0)");
        assert!(lines[2].contains("--select"));
    }
}
