//! Review error types

use std::fmt;

use chess_core::EngineError;
use thiserror::Error;

/// Which of an example's two positions a FEN error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenRole {
    BeforeMove,
    AfterMove,
}

impl fmt::Display for FenRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenRole::BeforeMove => f.write_str("before-move"),
            FenRole::AfterMove => f.write_str("after-move"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Invalid {role} position: {source}")]
    InvalidFen {
        role: FenRole,
        #[source]
        source: EngineError,
    },

    #[error("Inconsistent example: {0}")]
    UpstreamData(String),

    #[error("AI suggested an illegal move: {0}")]
    IllegalSuggestion(String),

    #[error("Board is locked")]
    NotInteractive,
}

impl ReviewError {
    pub(crate) fn invalid_fen(role: FenRole) -> impl FnOnce(EngineError) -> Self {
        move |source| ReviewError::InvalidFen { role, source }
    }
}
