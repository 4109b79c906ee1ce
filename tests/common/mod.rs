//! Shared fixtures: a report as the analysis step writes it.

#![allow(dead_code)]

use chess_core::MultiGameAnalysisReport;
use review::{ReportReview, ReviewOptions};

/// Black to move after 1. e4 e5 2. Bc4 Nc6 3. Qh5
pub const BEFORE_NF6: &str =
    "r1bqkbnr/pppp1ppp/2n5/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 3 3";
/// ...Nf6?? walks into Qxf7#
pub const AFTER_NF6: &str =
    "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";

pub const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
pub const AFTER_E4: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";

pub fn report_json() -> String {
    serde_json::json!({
        "playerName": "alice",
        "overallSummary": "Loses track of f7.",
        "recurringThemes": [
            {
                "title": "King safety",
                "description": "Early queen attacks go unanswered.",
                "examples": [
                    {
                        "gameDescription": "bob vs alice, 2025.01.02",
                        "moveNumber": "3",
                        "moveNotation": "3... Nf6??",
                        "fenBeforeMove": BEFORE_NF6,
                        "fenAfterMove": AFTER_NF6,
                        "suggestedMove": "g6",
                        "explanation": "Nf6 ignores the threat on f7.",
                        "playerColor": "black"
                    },
                    {
                        "gameDescription": "alice vs carol, 2025.01.03",
                        "moveNumber": 1,
                        "moveNotation": "e4",
                        "fenBeforeMove": START,
                        "fenAfterMove": AFTER_E4,
                        "suggestedMove": "Ke2",
                        "explanation": "The model got confused.",
                        "playerColor": "w"
                    }
                ]
            },
            {
                "title": "Broken data",
                "description": "",
                "examples": [
                    {
                        "gameDescription": "bad after",
                        "moveNotation": "e4",
                        "fenBeforeMove": START,
                        "fenAfterMove": "not a fen",
                        "suggestedMove": "d4"
                    },
                    {
                        "gameDescription": "inconsistent",
                        "moveNotation": "d4",
                        "fenBeforeMove": START,
                        "fenAfterMove": AFTER_E4,
                        "suggestedMove": "c4"
                    }
                ]
            }
        ]
    })
    .to_string()
}

pub fn report() -> MultiGameAnalysisReport {
    MultiGameAnalysisReport::from_json(&report_json()).unwrap()
}

pub fn open_review(options: &ReviewOptions) -> ReportReview {
    ReportReview::open(report(), options)
}
