//! Position engine: FEN loading, legal destinations, move application and
//! notation resolution, all backed by shakmaty.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Position as _, Role, Square};
use tracing::debug;

use crate::error::EngineError;
use crate::piece::{Piece, PieceKind};

pub const STANDARD_START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// A move as the user sees it: origin, destination and optional promotion.
/// Castling is the king's two-square step (e1g1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to, promotion: None }
    }

    pub fn with_promotion(self, kind: PieceKind) -> Self {
        Self { promotion: Some(kind), ..self }
    }

    fn from_legal(mv: &shakmaty::Move) -> Option<Self> {
        match mv.to_uci(CastlingMode::Standard) {
            UciMove::Normal { from, to, promotion } => Some(Self {
                from,
                to,
                promotion: promotion.map(PieceKind::from),
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.letter())?;
        }
        Ok(())
    }
}

/// Game-end classification of a position, derived on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
    Draw,
}

/// Result of applying a legal move.
#[derive(Debug, Clone)]
pub struct Played {
    pub position: Position,
    pub mv: Move,
    /// SAN including the check/mate suffix.
    pub san: String,
}

/// An immutable, validated board position. Equality is equality of the
/// canonical FEN.
#[derive(Clone)]
pub struct Position {
    chess: Chess,
    fen: String,
}

impl Position {
    /// Validate a FEN through shakmaty. Nothing is adopted on failure.
    pub fn load(text: &str) -> Result<Self, EngineError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(EngineError::invalid_position(text, "empty position"));
        }

        let fen: Fen = trimmed
            .parse()
            .map_err(|e| EngineError::invalid_position(trimmed, e))?;
        let chess: Chess = fen
            .into_position(CastlingMode::Standard)
            .map_err(|e| EngineError::invalid_position(trimmed, e))?;

        Ok(Self::from_chess(chess))
    }

    pub fn start() -> Self {
        Self::from_chess(Chess::default())
    }

    fn from_chess(chess: Chess) -> Self {
        let fen = Fen::from_position(&chess, EnPassantMode::Legal).to_string();
        Self { chess, fen }
    }

    pub fn fen(&self) -> &str {
        &self.fen
    }

    pub fn side_to_move(&self) -> Color {
        self.chess.turn()
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.chess.board().piece_at(square).map(Piece::from)
    }

    /// Placement, side to move, castling and en passant agree; move counters
    /// are ignored.
    pub fn same_board_state(&self, other: &Position) -> bool {
        let head = |fen: &str| fen.split_whitespace().take(4).collect::<Vec<_>>().join(" ");
        head(&self.fen) == head(&other.fen)
    }

    /// Squares the piece on `from` may legally move to. Empty when the
    /// square is empty or holds a piece of the side not to move.
    pub fn legal_destinations(&self, from: Square) -> Vec<Square> {
        match self.piece_at(from) {
            Some(piece) if piece.color == self.side_to_move() => {}
            _ => return Vec::new(),
        }

        let mut destinations: Vec<Square> = self
            .chess
            .legal_moves()
            .iter()
            .filter_map(Move::from_legal)
            .filter(|mv| mv.from == from)
            .map(|mv| mv.to)
            .collect();
        destinations.sort();
        destinations.dedup();
        destinations
    }

    /// Apply `mv` if legal, returning the successor position. `self` is never
    /// modified.
    ///
    /// A promotion piece on a non-promotion move is ignored; a promotion move
    /// without one promotes to a queen.
    pub fn apply(&self, mv: &Move) -> Result<Played, EngineError> {
        let legal = self
            .find_legal(mv)
            .ok_or_else(|| EngineError::illegal_move(mv, "not legal in this position"))?;

        let mut next = self.chess.clone();
        let played = Move::from_legal(&legal).unwrap_or(*mv);
        let san = SanPlus::from_move_and_play_unchecked(&mut next, legal);

        debug!(mv = %played, san = %san, "Move applied");

        Ok(Played {
            position: Position::from_chess(next),
            mv: played,
            san: san.to_string(),
        })
    }

    /// Turn SAN, UCI or a hyphenated square pair into a legal move.
    pub fn resolve_notation(&self, notation: &str) -> Result<Move, EngineError> {
        let cleaned = clean_notation(notation);
        if cleaned.is_empty() {
            return Err(EngineError::illegal_move(notation, "empty notation"));
        }

        if let Some(mv) = parse_square_pair(&cleaned) {
            return self
                .find_legal(&mv)
                .and_then(|legal| Move::from_legal(&legal))
                .ok_or_else(|| EngineError::illegal_move(notation, "not legal in this position"));
        }

        let san: SanPlus = cleaned
            .parse()
            .map_err(|e| EngineError::illegal_move(notation, e))?;
        let legal = san
            .san
            .to_move(&self.chess)
            .map_err(|e| EngineError::illegal_move(notation, e))?;

        Move::from_legal(&legal)
            .ok_or_else(|| EngineError::illegal_move(notation, "unsupported move kind"))
    }

    pub fn game_state(&self) -> GameState {
        if self.chess.is_checkmate() {
            GameState::Checkmate
        } else if self.chess.is_check() {
            GameState::Check
        } else if self.chess.is_stalemate() {
            GameState::Stalemate
        } else if self.chess.is_insufficient_material() || self.chess.halfmoves() >= 100 {
            GameState::Draw
        } else {
            GameState::Ongoing
        }
    }

    fn find_legal(&self, mv: &Move) -> Option<shakmaty::Move> {
        let wanted_promotion = mv.promotion.map(Role::from).unwrap_or(Role::Queen);

        self.chess
            .legal_moves()
            .iter()
            .find(|legal| {
                let Some(candidate) = Move::from_legal(legal) else {
                    return false;
                };
                candidate.from == mv.from
                    && candidate.to == mv.to
                    && legal.promotion().map_or(true, |role| role == wanted_promotion)
            })
            .cloned()
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.fen == other.fen
    }
}

impl Eq for Position {}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Position").field(&self.fen).finish()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fen)
    }
}

/// Strip move-number prefixes ("12.", "12..."), annotation glyphs and
/// zero-style castling.
fn clean_notation(notation: &str) -> String {
    static MOVE_NUMBER: OnceLock<Regex> = OnceLock::new();
    let move_number = MOVE_NUMBER.get_or_init(|| Regex::new(r"^\d+\s*\.+\s*").expect("static regex"));

    let stripped = move_number.replace(notation.trim(), "");
    stripped
        .trim_end_matches(['!', '?'])
        .trim()
        .replace('0', "O")
}

fn parse_square_pair(text: &str) -> Option<Move> {
    static SQUARE_PAIR: OnceLock<Regex> = OnceLock::new();
    let square_pair = SQUARE_PAIR.get_or_init(|| {
        Regex::new(r"^([a-h][1-8])\s*-?\s*([a-h][1-8])=?([qrbnQRBN])?$").expect("static regex")
    });

    let caps = square_pair.captures(text)?;
    let from: Square = caps[1].parse().ok()?;
    let to: Square = caps[2].parse().ok()?;
    let promotion = caps
        .get(3)
        .and_then(|m| m.as_str().chars().next())
        .and_then(PieceKind::from_letter);

    Some(Move { from, to, promotion })
}
