//! Position engine error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid position '{fen}': {reason}")]
    InvalidPosition { fen: String, reason: String },

    #[error("Illegal move '{notation}': {reason}")]
    IllegalMove { notation: String, reason: String },
}

impl EngineError {
    pub(crate) fn invalid_position(fen: &str, reason: impl ToString) -> Self {
        EngineError::InvalidPosition {
            fen: fen.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn illegal_move(notation: impl ToString, reason: impl ToString) -> Self {
        EngineError::IllegalMove {
            notation: notation.to_string(),
            reason: reason.to_string(),
        }
    }
}
