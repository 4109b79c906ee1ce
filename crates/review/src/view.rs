//! Derived board cells for whatever draws the board.

use chess_core::{File, Move, Piece, PlayerColor, Position, Rank, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    White,
    Black,
}

impl From<PlayerColor> for Orientation {
    fn from(color: PlayerColor) -> Self {
        match color {
            PlayerColor::White => Orientation::White,
            PlayerColor::Black => Orientation::Black,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub square: Square,
    pub piece: Option<Piece>,
    pub is_light: bool,
    pub is_selected: bool,
    pub is_last_move: bool,
    pub is_destination: bool,
}

#[derive(Debug, Clone)]
pub struct BoardView {
    pub orientation: Orientation,
    /// Top row first, as seen by the player.
    pub rows: Vec<Vec<Cell>>,
}

pub fn board_view(
    position: &Position,
    selected: Option<Square>,
    last_move: Option<Move>,
    destinations: &[Square],
    orientation: Orientation,
) -> BoardView {
    let (ranks, files): (Vec<u32>, Vec<u32>) = match orientation {
        Orientation::White => ((0..8).rev().collect(), (0..8).collect()),
        Orientation::Black => ((0..8).collect(), (0..8).rev().collect()),
    };

    let rows = ranks
        .iter()
        .map(|&rank| {
            files
                .iter()
                .map(|&file| {
                    let square = Square::from_coords(File::new(file), Rank::new(rank));
                    Cell {
                        square,
                        piece: position.piece_at(square),
                        is_light: (file + rank) % 2 == 1,
                        is_selected: selected == Some(square),
                        is_last_move: last_move.is_some_and(|mv| mv.from == square || mv.to == square),
                        is_destination: destinations.contains(&square),
                    }
                })
                .collect()
        })
        .collect();

    BoardView { orientation, rows }
}

impl BoardView {
    pub fn cell(&self, square: Square) -> Option<&Cell> {
        self.rows.iter().flatten().find(|cell| cell.square == square)
    }

    /// Plain-text board: piece letters, `.` for empty squares, `*` for
    /// destinations, brackets around the selected square and the last move.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            if let Some(first) = row.first() {
                out.push_str(&format!("{} ", first.square.rank().char()));
            }
            for cell in row {
                let glyph = match cell.piece {
                    Some(piece) => piece.letter(),
                    None if cell.is_destination => '*',
                    None => '.',
                };
                if cell.is_selected || cell.is_last_move {
                    out.push_str(&format!("[{glyph}]"));
                } else if cell.is_destination {
                    out.push_str(&format!("({glyph})"));
                } else {
                    out.push_str(&format!(" {glyph} "));
                }
            }
            out.push('\n');
        }

        out.push_str("  ");
        if let Some(row) = self.rows.first() {
            for cell in row {
                out.push_str(&format!(" {} ", cell.square.file().char()));
            }
        }
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{Color, PieceKind};

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn test_white_orientation_layout() {
        let view = board_view(&Position::start(), None, None, &[], Orientation::White);
        assert_eq!(view.rows.len(), 8);
        assert_eq!(view.rows[0][0].square, sq("a8"));
        assert_eq!(view.rows[7][7].square, sq("h1"));
        assert!(!view.rows[7][0].is_light); // a1 is dark
        assert!(view.rows[7][7].is_light); // h1 is light
        assert_eq!(
            view.rows[0][4].piece,
            Some(Piece { kind: PieceKind::King, color: Color::Black })
        );
    }

    #[test]
    fn test_black_orientation_layout() {
        let view = board_view(&Position::start(), None, None, &[], Orientation::Black);
        assert_eq!(view.rows[0][0].square, sq("h1"));
        assert_eq!(view.rows[7][7].square, sq("a8"));
    }

    #[test]
    fn test_highlights() {
        let last = Move::new(sq("e2"), sq("e4"));
        let view = board_view(
            &Position::start(),
            Some(sq("g1")),
            Some(last),
            &[sq("f3"), sq("h3")],
            Orientation::White,
        );
        assert!(view.cell(sq("g1")).unwrap().is_selected);
        assert!(view.cell(sq("e2")).unwrap().is_last_move);
        assert!(view.cell(sq("e4")).unwrap().is_last_move);
        assert!(view.cell(sq("f3")).unwrap().is_destination);
        assert!(!view.cell(sq("f4")).unwrap().is_destination);
    }

    #[test]
    fn test_text_rendering() {
        let view = board_view(&Position::start(), None, None, &[], Orientation::White);
        let text = view.to_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert!(lines[0].starts_with("8  r  n  b  q  k  b  n  r"));
        assert!(lines[7].starts_with("1  R  N  B  Q  K  B  N  R"));
        assert!(lines[8].contains("a  b  c"));
    }
}
