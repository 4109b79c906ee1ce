//! User-facing status line.

use std::fmt;

use chess_core::GameState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Ready,
    MistakeShown(String),
    BetterMoveShown(String),
    IllegalSuggestion(String),
    Reset,
    Unlocked,
    Played { san: String, state: GameState },
    IllegalMove,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ready => f.write_str("Board is ready."),
            Status::MistakeShown(notation) => {
                write!(f, "This is the move you played: {notation}.")
            }
            Status::BetterMoveShown(notation) => write!(f, "A better move was {notation}."),
            Status::IllegalSuggestion(notation) => {
                write!(f, "Error: AI suggested an illegal move: {notation}")
            }
            Status::Reset => f.write_str("Board has been reset."),
            Status::Unlocked => f.write_str("Board is unlocked. Play out the position!"),
            Status::Played { san, state } => {
                write!(f, "You played {san}.")?;
                match state {
                    GameState::Checkmate => f.write_str(" Checkmate!"),
                    GameState::Check => f.write_str(" Check!"),
                    GameState::Stalemate => f.write_str(" Stalemate!"),
                    GameState::Draw => f.write_str(" Draw!"),
                    GameState::Ongoing => Ok(()),
                }
            }
            Status::IllegalMove => f.write_str("That's an illegal move."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_played_status_text() {
        let played = |state| Status::Played { san: "Qxf7#".into(), state }.to_string();
        assert_eq!(played(GameState::Checkmate), "You played Qxf7#. Checkmate!");
        assert_eq!(played(GameState::Ongoing), "You played Qxf7#.");
        assert_eq!(played(GameState::Draw), "You played Qxf7#. Draw!");
    }

    #[test]
    fn test_error_statuses_mention_illegal_move() {
        assert!(Status::IllegalMove.to_string().contains("illegal move"));
        assert!(Status::IllegalSuggestion("Qxh7".into())
            .to_string()
            .contains("illegal move"));
    }
}
