//! Chess domain layer for mistake review: validated positions, move
//! resolution, report and game types.

pub mod engine;
pub mod error;
pub mod game_data;
pub mod pgn;
pub mod piece;
pub mod report;

pub use engine::{GameState, Move, Played, Position, STANDARD_START_FEN};
pub use error::EngineError;
pub use game_data::ChesscomGame;
pub use piece::{Piece, PieceKind};
pub use report::{MistakeExample, MultiGameAnalysisReport, PlayerColor, RecurringTheme};
pub use shakmaty::{Color, File, Rank, Square};
