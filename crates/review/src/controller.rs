//! Per-example review state machine.
//!
//! An example is opened once: both positions are validated up front, so a
//! bad FEN makes the whole example a [`FailedExample`] and no board
//! interaction is ever offered for it. A ready example owns its
//! [`ReviewController`], which moves between the five views below. Failures
//! after that point (an illegal suggestion, an illegal user move) are
//! recoverable and only change the status line.

use chess_core::{MistakeExample, Move, Position, Square};
use tracing::{debug, warn};

use crate::config::{Consistency, ReviewOptions};
use crate::error::{FenRole, ReviewError};
use crate::status::Status;
use crate::view::{board_view, BoardView, Orientation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Initial,
    MistakeShown,
    BetterMoveShown,
    Interactive,
    Reset,
}

/// Everything the rendering layer reads.
#[derive(Debug, Clone)]
pub struct ReviewState {
    pub current: Position,
    pub selected: Option<Square>,
    pub last_move: Option<Move>,
    pub interactive: bool,
    pub status: Status,
}

#[derive(Debug, Clone)]
pub struct ReviewController {
    pub(crate) example: MistakeExample,
    pub(crate) before: Position,
    pub(crate) after: Position,
    /// The mistake replayed on `before`, used for highlighting.
    pub(crate) mistake: Option<Move>,
    pub(crate) state: ReviewState,
    pub(crate) view: View,
}

impl ReviewController {
    pub fn open(example: MistakeExample, options: &ReviewOptions) -> Result<Self, ReviewError> {
        let before = Position::load(&example.fen_before_move)
            .map_err(ReviewError::invalid_fen(FenRole::BeforeMove))?;
        let after = Position::load(&example.fen_after_move)
            .map_err(ReviewError::invalid_fen(FenRole::AfterMove))?;

        let replayed = before
            .resolve_notation(&example.move_notation)
            .and_then(|mv| before.apply(&mv));

        let mistake = match (options.consistency, replayed) {
            (Consistency::Strict, Ok(played)) => {
                if !played.position.same_board_state(&after) {
                    return Err(ReviewError::UpstreamData(format!(
                        "playing {} does not lead to the reported position",
                        example.move_notation
                    )));
                }
                Some(played.mv)
            }
            (Consistency::Strict, Err(e)) => {
                return Err(ReviewError::UpstreamData(format!(
                    "the reported move cannot be played: {e}"
                )));
            }
            (Consistency::Lenient, replayed) => replayed.ok().map(|played| played.mv),
        };

        debug!(game = %example.game_description, "Example opened");

        Ok(Self {
            state: ReviewState {
                current: before.clone(),
                selected: None,
                last_move: None,
                interactive: false,
                status: Status::Ready,
            },
            view: View::Initial,
            example,
            before,
            after,
            mistake,
        })
    }

    pub fn example(&self) -> &MistakeExample {
        &self.example
    }

    pub fn state(&self) -> &ReviewState {
        &self.state
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn current(&self) -> &Position {
        &self.state.current
    }

    pub fn before(&self) -> &Position {
        &self.before
    }

    pub fn status_text(&self) -> String {
        self.state.status.to_string()
    }

    pub fn is_interactive(&self) -> bool {
        self.state.interactive
    }

    /// Destinations of the selected piece, recomputed from the current
    /// position on every call.
    pub fn legal_destinations(&self) -> Vec<Square> {
        self.state
            .selected
            .map(|square| self.state.current.legal_destinations(square))
            .unwrap_or_default()
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::from(self.example.player_color)
    }

    pub fn board_view(&self) -> BoardView {
        board_view(
            &self.state.current,
            self.state.selected,
            self.state.last_move,
            &self.legal_destinations(),
            self.orientation(),
        )
    }

    pub fn show_mistake(&mut self) {
        debug!(notation = %self.example.move_notation, "Showing mistake");
        self.state.current = self.after.clone();
        self.state.last_move = self.mistake;
        self.state.selected = None;
        self.state.interactive = false;
        self.state.status = Status::MistakeShown(self.example.move_notation.clone());
        self.view = View::MistakeShown;
    }

    /// Recoverable: an illegal suggestion only changes the status line.
    pub fn show_better_move(&mut self) -> Result<(), ReviewError> {
        let suggested = self.example.suggested_move.clone();
        let played = self
            .before
            .resolve_notation(&suggested)
            .and_then(|mv| self.before.apply(&mv));

        match played {
            Ok(played) => {
                debug!(notation = %suggested, "Showing better move");
                self.state.current = played.position;
                self.state.last_move = Some(played.mv);
                self.state.selected = None;
                self.state.interactive = false;
                self.state.status = Status::BetterMoveShown(suggested);
                self.view = View::BetterMoveShown;
                Ok(())
            }
            Err(e) => {
                warn!(notation = %suggested, fen = %self.before, "AI suggested an illegal move: {e}");
                self.state.status = Status::IllegalSuggestion(suggested.clone());
                Err(ReviewError::IllegalSuggestion(suggested))
            }
        }
    }

    pub fn reset(&mut self) {
        self.state.current = self.before.clone();
        self.state.last_move = None;
        self.state.selected = None;
        self.state.interactive = false;
        self.state.status = Status::Reset;
        self.view = View::Reset;
    }

    pub fn enable_interactive(&mut self) {
        self.state.interactive = true;
        self.state.selected = None;
        self.state.status = Status::Unlocked;
        self.view = View::Interactive;
    }

    /// Play `mv` on the current position. Only allowed once the board is
    /// unlocked; an illegal move leaves the position as it was.
    pub fn attempt_move(&mut self, mv: &Move) -> Result<Move, ReviewError> {
        if !self.state.interactive {
            return Err(ReviewError::NotInteractive);
        }
        self.state.selected = None;

        match self.state.current.apply(mv) {
            Ok(played) => {
                let state = played.position.game_state();
                debug!(san = %played.san, ?state, "User move played");
                self.state.current = played.position;
                self.state.last_move = Some(played.mv);
                self.state.status = Status::Played { san: played.san, state };
                Ok(played.mv)
            }
            Err(e) => {
                debug!(%mv, "Rejected user move");
                self.state.status = Status::IllegalMove;
                Err(e.into())
            }
        }
    }

    /// Resolve notation against the current position, then play it.
    pub fn attempt_notation(&mut self, notation: &str) -> Result<Move, ReviewError> {
        if !self.state.interactive {
            return Err(ReviewError::NotInteractive);
        }
        match self.state.current.resolve_notation(notation) {
            Ok(mv) => self.attempt_move(&mv),
            Err(e) => {
                self.state.selected = None;
                self.state.status = Status::IllegalMove;
                Err(e.into())
            }
        }
    }
}

/// An example that could not be opened. Carries the message shown in place
/// of the board.
#[derive(Debug, Clone)]
pub struct FailedExample {
    pub example: MistakeExample,
    pub error: ReviewError,
    pub message: String,
}

#[derive(Debug, Clone)]
pub enum ExampleReview {
    Ready(Box<ReviewController>),
    Failed(FailedExample),
}

impl ExampleReview {
    pub fn open(example: MistakeExample, options: &ReviewOptions) -> Self {
        match ReviewController::open(example.clone(), options) {
            Ok(controller) => ExampleReview::Ready(Box::new(controller)),
            Err(error) => {
                let message = failure_message(&error);
                warn!(game = %example.game_description, "Example failed to open: {error}");
                ExampleReview::Failed(FailedExample { example, error, message })
            }
        }
    }

    pub fn example(&self) -> &MistakeExample {
        match self {
            ExampleReview::Ready(controller) => controller.example(),
            ExampleReview::Failed(failed) => &failed.example,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ExampleReview::Ready(_))
    }

    pub fn controller(&self) -> Option<&ReviewController> {
        match self {
            ExampleReview::Ready(controller) => Some(controller.as_ref()),
            ExampleReview::Failed(_) => None,
        }
    }

    pub fn controller_mut(&mut self) -> Option<&mut ReviewController> {
        match self {
            ExampleReview::Ready(controller) => Some(controller.as_mut()),
            ExampleReview::Failed(_) => None,
        }
    }
}

fn failure_message(error: &ReviewError) -> String {
    match error {
        ReviewError::InvalidFen { role: FenRole::BeforeMove, .. } => {
            "The AI provided an invalid board position (FEN) for this example.".to_string()
        }
        ReviewError::InvalidFen { role: FenRole::AfterMove, .. } => {
            "The AI provided an invalid FEN for the resulting position.".to_string()
        }
        other => format!("Error: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{Color, EngineError, PieceKind, PlayerColor, STANDARD_START_FEN};

    const AFTER_E4: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    fn e4_example() -> MistakeExample {
        MistakeExample {
            game_description: "vs bob, 2024.05.15".into(),
            move_number: Some(1),
            move_notation: "e4".into(),
            fen_before_move: STANDARD_START_FEN.into(),
            fen_after_move: AFTER_E4.into(),
            suggested_move: "d4".into(),
            explanation: "Both are fine.".into(),
            player_color: PlayerColor::White,
        }
    }

    fn open(example: MistakeExample) -> ReviewController {
        ReviewController::open(example, &ReviewOptions::default()).unwrap()
    }

    #[test]
    fn test_open_starts_in_initial_view() {
        let controller = open(e4_example());
        assert_eq!(controller.view(), View::Initial);
        assert_eq!(controller.current(), &Position::start());
        assert_eq!(controller.status_text(), "Board is ready.");
        assert!(!controller.is_interactive());
        assert!(controller.state().last_move.is_none());
    }

    #[test]
    fn test_show_mistake_from_start_position() {
        let mut controller = open(e4_example());
        controller.show_mistake();

        let current = controller.current();
        assert_eq!(current.side_to_move(), Color::Black);
        assert_eq!(current.piece_at(sq("e4")).map(|p| p.kind), Some(PieceKind::Pawn));
        assert_eq!(current.piece_at(sq("e2")), None);
        assert_eq!(controller.state().last_move, Some(Move::new(sq("e2"), sq("e4"))));
        assert_eq!(controller.view(), View::MistakeShown);
        assert_eq!(controller.status_text(), "This is the move you played: e4.");
    }

    #[test]
    fn test_show_mistake_then_reset_round_trips() {
        let mut controller = open(e4_example());
        let original = Position::load(STANDARD_START_FEN).unwrap();

        controller.show_mistake();
        controller.reset();
        assert_eq!(controller.current(), &original);
        assert_eq!(controller.state().last_move, None);
        assert_eq!(controller.view(), View::Reset);
        assert_eq!(controller.status_text(), "Board has been reset.");
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut controller = open(e4_example());
        controller.enable_interactive();
        controller.attempt_move(&Move::new(sq("g1"), sq("f3"))).unwrap();

        controller.reset();
        let once = controller.state().clone();
        controller.reset();
        let twice = controller.state();

        assert_eq!(once.current, twice.current);
        assert_eq!(once.last_move, twice.last_move);
        assert_eq!(once.selected, twice.selected);
        assert_eq!(once.interactive, twice.interactive);
        assert_eq!(once.status, twice.status);
    }

    #[test]
    fn test_show_better_move() {
        let mut controller = open(e4_example());
        controller.show_better_move().unwrap();
        assert_eq!(controller.view(), View::BetterMoveShown);
        assert_eq!(controller.state().last_move, Some(Move::new(sq("d2"), sq("d4"))));
        assert_eq!(controller.status_text(), "A better move was d4.");
        assert!(!controller.is_interactive());
    }

    #[test]
    fn test_illegal_suggestion_is_recoverable() {
        let mut example = e4_example();
        example.suggested_move = "Qxh7".into();
        let mut controller = open(example);
        controller.show_mistake();
        let before_attempt = controller.current().clone();

        let err = controller.show_better_move().unwrap_err();
        assert_eq!(err, ReviewError::IllegalSuggestion("Qxh7".into()));
        assert_eq!(controller.current(), &before_attempt);
        assert_eq!(controller.view(), View::MistakeShown);
        assert!(controller.status_text().contains("illegal move"));
    }

    #[test]
    fn test_interactive_play() {
        let mut controller = open(e4_example());
        controller.enable_interactive();
        assert_eq!(controller.view(), View::Interactive);
        assert_eq!(controller.status_text(), "Board is unlocked. Play out the position!");

        controller.attempt_move(&Move::new(sq("e2"), sq("e4"))).unwrap();
        assert!(controller.status_text().contains("You played e4"));

        // Black to move now; a black rook onto its own pawn fails
        let after_first = controller.current().clone();
        let err = controller.attempt_move(&Move::new(sq("a8"), sq("a7"))).unwrap_err();
        assert!(matches!(err, ReviewError::Engine(EngineError::IllegalMove { .. })));
        assert_eq!(controller.current(), &after_first);
        assert_eq!(controller.status_text(), "That's an illegal move.");
        assert_eq!(controller.view(), View::Interactive);
    }

    #[test]
    fn test_attempt_move_requires_unlocked_board() {
        let mut controller = open(e4_example());
        let err = controller.attempt_move(&Move::new(sq("e2"), sq("e4"))).unwrap_err();
        assert_eq!(err, ReviewError::NotInteractive);
        assert_eq!(controller.current(), &Position::start());
        assert_eq!(controller.status_text(), "Board is ready.");
    }

    #[test]
    fn test_showing_a_move_locks_the_board() {
        let mut controller = open(e4_example());
        controller.enable_interactive();
        controller.show_mistake();
        assert!(!controller.is_interactive());
        controller.enable_interactive();
        controller.show_better_move().unwrap();
        assert!(!controller.is_interactive());
    }

    #[test]
    fn test_attempt_notation_reports_checkmate() {
        let example = MistakeExample {
            move_notation: "Nf6".into(),
            fen_before_move: "r1bqkbnr/pppp1ppp/2n5/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 3 3".into(),
            fen_after_move: "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4".into(),
            suggested_move: "g6".into(),
            player_color: PlayerColor::Black,
            ..e4_example()
        };
        let mut controller = open(example);
        controller.show_mistake();
        controller.enable_interactive();
        controller.attempt_notation("Qxf7#").unwrap();
        assert_eq!(controller.status_text(), "You played Qxf7#. Checkmate!");

        assert!(controller.attempt_notation("nonsense").is_err());
        assert_eq!(controller.status_text(), "That's an illegal move.");
    }

    #[test]
    fn test_strict_rejects_inconsistent_after_position() {
        let mut example = e4_example();
        example.move_notation = "d4".into();
        let err = ReviewController::open(example.clone(), &ReviewOptions::default()).unwrap_err();
        assert!(matches!(err, ReviewError::UpstreamData(_)));

        // Lenient trusts the after-move position and still highlights d2-d4
        let mut controller = ReviewController::open(example, &ReviewOptions::lenient()).unwrap();
        controller.show_mistake();
        assert_eq!(controller.current(), &Position::load(AFTER_E4).unwrap());
        assert_eq!(controller.state().last_move, Some(Move::new(sq("d2"), sq("d4"))));
    }

    #[test]
    fn test_strict_ignores_counters_and_en_passant_noise() {
        let mut example = e4_example();
        example.fen_after_move = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1".into();
        assert!(ReviewController::open(example.clone(), &ReviewOptions::default()).is_ok());

        example.fen_after_move = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 3 9".into();
        assert!(ReviewController::open(example, &ReviewOptions::default()).is_ok());
    }

    #[test]
    fn test_lenient_unplayable_mistake_has_no_highlight() {
        let mut example = e4_example();
        example.move_notation = "Ke7".into();
        let mut controller = ReviewController::open(example, &ReviewOptions::lenient()).unwrap();
        controller.show_mistake();
        assert_eq!(controller.state().last_move, None);
        assert_eq!(controller.view(), View::MistakeShown);
    }

    #[test]
    fn test_invalid_positions_fail_the_example() {
        let mut bad_after = e4_example();
        bad_after.fen_after_move = "this is not a position".into();
        let review = ExampleReview::open(bad_after, &ReviewOptions::default());
        assert!(!review.is_ready());
        assert!(review.controller().is_none());
        match review {
            ExampleReview::Failed(failed) => {
                assert!(matches!(
                    failed.error,
                    ReviewError::InvalidFen {
                        role: FenRole::AfterMove,
                        source: EngineError::InvalidPosition { .. },
                    }
                ));
                assert_eq!(
                    failed.message,
                    "The AI provided an invalid FEN for the resulting position."
                );
            }
            ExampleReview::Ready(_) => panic!("expected a failed example"),
        }

        let mut bad_before = e4_example();
        bad_before.fen_before_move = "8/8/8/8/8/8/8/8 w - - 0 1".into();
        let review = ExampleReview::open(bad_before, &ReviewOptions::lenient());
        match review {
            ExampleReview::Failed(failed) => assert_eq!(
                failed.message,
                "The AI provided an invalid board position (FEN) for this example."
            ),
            ExampleReview::Ready(_) => panic!("expected a failed example"),
        }
    }

    #[test]
    fn test_blank_before_fen_blames_the_before_position() {
        let mut blank_before = e4_example();
        blank_before.fen_before_move = "   ".into();
        let review = ExampleReview::open(blank_before, &ReviewOptions::default());
        match review {
            ExampleReview::Failed(failed) => {
                assert!(matches!(
                    failed.error,
                    ReviewError::InvalidFen { role: FenRole::BeforeMove, .. }
                ));
                assert_eq!(
                    failed.message,
                    "The AI provided an invalid board position (FEN) for this example."
                );
            }
            ExampleReview::Ready(_) => panic!("expected a failed example"),
        }

        // Identical broken text in both fields still blames the before position
        let mut both = e4_example();
        both.fen_before_move = "garbage".into();
        both.fen_after_move = "garbage".into();
        let review = ExampleReview::open(both, &ReviewOptions::default());
        let ExampleReview::Failed(failed) = review else {
            panic!("expected a failed example");
        };
        assert!(failed.message.contains("invalid board position"));
    }
}
