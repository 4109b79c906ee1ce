use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A game as handed over by the game supplier: raw PGN plus its headers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChesscomGame {
    pub pgn: String,
    pub headers: BTreeMap<String, String>,
}

impl ChesscomGame {
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }

    /// "2024.05.15 - alice vs bob (1-0)"
    pub fn display_name(&self) -> String {
        format!(
            "{} - {} vs {} ({})",
            self.header("Date").unwrap_or("????.??.??"),
            self.header("White").unwrap_or("N/A"),
            self.header("Black").unwrap_or("N/A"),
            self.header("Result").unwrap_or("?"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_with_and_without_headers() {
        let mut game = ChesscomGame::default();
        assert_eq!(game.display_name(), "????.??.?? - N/A vs N/A (?)");

        game.headers.insert("White".into(), "alice".into());
        game.headers.insert("Black".into(), "bob".into());
        game.headers.insert("Result".into(), "0-1".into());
        game.headers.insert("Date".into(), "2024.05.15".into());
        assert_eq!(game.display_name(), "2024.05.15 - alice vs bob (0-1)");
    }
}
