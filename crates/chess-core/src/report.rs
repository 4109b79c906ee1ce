//! Analysis report as produced by the language model.
//!
//! Every field is untrusted. Deserialization is lenient about shape (missing
//! fields, string move numbers, spelled-out colours) so one sloppy example
//! does not take the whole report down; the positions and moves themselves
//! are validated later by the review layer.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use shakmaty::Color;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerColor {
    #[default]
    White,
    Black,
}

impl PlayerColor {
    pub fn color(self) -> Color {
        match self {
            PlayerColor::White => Color::White,
            PlayerColor::Black => Color::Black,
        }
    }
}

impl Serialize for PlayerColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(match self {
            PlayerColor::White => "w",
            PlayerColor::Black => "b",
        })
    }
}

impl<'de> Deserialize<'de> for PlayerColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Ok(match raw.trim().to_ascii_lowercase().as_str() {
            "b" | "black" => PlayerColor::Black,
            "" | "w" | "white" => PlayerColor::White,
            other => {
                warn!(player_color = other, "Unknown playerColor, showing the board from White");
                PlayerColor::White
            }
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MistakeExample {
    pub game_description: String,
    #[serde(
        deserialize_with = "lenient_move_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub move_number: Option<u32>,
    pub move_notation: String,
    pub fen_before_move: String,
    pub fen_after_move: String,
    pub suggested_move: String,
    pub explanation: String,
    pub player_color: PlayerColor,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecurringTheme {
    pub title: String,
    pub description: String,
    pub examples: Vec<MistakeExample>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MultiGameAnalysisReport {
    pub player_name: String,
    pub overall_summary: String,
    pub recurring_themes: Vec<RecurringTheme>,
}

impl MultiGameAnalysisReport {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn example_count(&self) -> usize {
        self.recurring_themes.iter().map(|t| t.examples.len()).sum()
    }
}

/// Accepts 12, "12", "12." or nothing.
fn lenient_move_number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
        Other(serde_json::Value),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => u32::try_from(n).ok(),
        Some(Raw::Text(s)) => s.trim().trim_end_matches('.').parse().ok(),
        Some(Raw::Other(_)) | None => None,
    })
}
