//! Click-to-move: first click selects a piece of the side to move, second
//! click tries to move it there. The selection is cleared after every second
//! click, legal or not.

use chess_core::{Move, PieceKind, Square};

use crate::controller::ReviewController;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Board is locked.
    Ignored,
    /// First click on an empty square or an opponent piece.
    NothingSelected,
    Selected { square: Square, destinations: Vec<Square> },
    Moved(Move),
    Rejected,
}

impl ReviewController {
    pub fn selected(&self) -> Option<Square> {
        self.state.selected
    }

    pub fn click(&mut self, square: Square) -> ClickOutcome {
        if !self.state.interactive {
            return ClickOutcome::Ignored;
        }

        if let Some(from) = self.state.selected.take() {
            let mv = Move::new(from, square).with_promotion(PieceKind::Queen);
            return match self.attempt_move(&mv) {
                Ok(played) => ClickOutcome::Moved(played),
                Err(_) => ClickOutcome::Rejected,
            };
        }

        let current = &self.state.current;
        match current.piece_at(square) {
            Some(piece) if piece.color == current.side_to_move() => {
                let destinations = current.legal_destinations(square);
                self.state.selected = Some(square);
                ClickOutcome::Selected { square, destinations }
            }
            _ => ClickOutcome::NothingSelected,
        }
    }
}
