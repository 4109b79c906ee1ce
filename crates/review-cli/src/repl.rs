//! Terminal review loop: one example on screen at a time, commands map onto
//! controller transitions.

use std::io::{self, BufRead, Write};

use chess_core::Square;
use review::{ClickOutcome, ExampleIndex, ExampleReview, ReportReview};

const HELP: &str = "\
Commands:
  mistake        show the move you played
  better         show the suggested move
  reset          back to the position before the mistake
  play           unlock the board and play from here
  click <sq>     select a piece, then click its destination
  move <move>    play a move in SAN or UCI (board must be unlocked)
  board          print the board again
  next / prev    switch example
  help           this text
  quit           leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Mistake,
    Better,
    Reset,
    Play,
    Click(Square),
    Move(String),
    Board,
    Next,
    Prev,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<ReplCommand, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err("empty command".to_string());
    };
    let rest: Vec<&str> = words.collect();

    let command = match head.to_ascii_lowercase().as_str() {
        "mistake" | "m" => ReplCommand::Mistake,
        "better" | "b" => ReplCommand::Better,
        "reset" | "r" => ReplCommand::Reset,
        "play" | "p" => ReplCommand::Play,
        "board" => ReplCommand::Board,
        "next" | "n" => ReplCommand::Next,
        "prev" => ReplCommand::Prev,
        "help" | "?" => ReplCommand::Help,
        "quit" | "q" | "exit" => ReplCommand::Quit,
        "click" | "c" => {
            let square = rest.first().ok_or("click needs a square, e.g. click e2")?;
            let square: Square = square
                .parse()
                .map_err(|_| format!("'{square}' is not a square"))?;
            ReplCommand::Click(square)
        }
        "move" => {
            if rest.is_empty() {
                return Err("move needs a move, e.g. move Nf3".to_string());
            }
            ReplCommand::Move(rest.join(" "))
        }
        other => return Err(format!("unknown command '{other}', try help")),
    };
    Ok(command)
}

pub struct Session {
    review: ReportReview,
    indices: Vec<ExampleIndex>,
    cursor: usize,
}

impl Session {
    pub fn new(review: ReportReview) -> Self {
        let indices = review.indices();
        Self { review, indices, cursor: 0 }
    }

    fn current_index(&self) -> Option<ExampleIndex> {
        self.indices.get(self.cursor).copied()
    }

    pub fn print_summary<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Player: {}", self.review.player_name)?;
        if !self.review.overall_summary.is_empty() {
            writeln!(out, "{}", self.review.overall_summary)?;
        }
        writeln!(
            out,
            "{} theme(s), {} example(s), {} could not be loaded",
            self.review.themes.len(),
            self.review.example_count(),
            self.review.failed_count()
        )
    }

    pub fn print_example<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(index) = self.current_index() else {
            return writeln!(out, "This report has no examples.");
        };
        let (Some(theme), Some(example)) = (self.review.theme(index), self.review.example(index))
        else {
            return Ok(());
        };

        writeln!(out)?;
        writeln!(out, "[{}/{}] Theme: {}", self.cursor + 1, self.indices.len(), theme.title)?;
        writeln!(out, "{}", example.example().game_description)?;

        match example {
            ExampleReview::Failed(failed) => {
                writeln!(out, "Error Loading Example")?;
                writeln!(out, "{}", failed.message)?;
            }
            ExampleReview::Ready(controller) => {
                let data = controller.example();
                writeln!(out, "{}", data.explanation)?;
                writeln!(
                    out,
                    "Your move: {}   Better: {}",
                    data.move_notation, data.suggested_move
                )?;
                writeln!(out, "{}", controller.status_text())?;
                write!(out, "{}", controller.board_view().to_text())?;
            }
        }
        Ok(())
    }

    /// Returns false once the user quits.
    pub fn execute<W: Write>(&mut self, command: ReplCommand, out: &mut W) -> io::Result<bool> {
        match command {
            ReplCommand::Quit => return Ok(false),
            ReplCommand::Help => {
                writeln!(out, "{HELP}")?;
                return Ok(true);
            }
            ReplCommand::Next => {
                if self.cursor + 1 < self.indices.len() {
                    self.cursor += 1;
                }
                self.print_example(out)?;
                return Ok(true);
            }
            ReplCommand::Prev => {
                self.cursor = self.cursor.saturating_sub(1);
                self.print_example(out)?;
                return Ok(true);
            }
            ReplCommand::Board => {
                self.print_example(out)?;
                return Ok(true);
            }
            _ => {}
        }

        let Some(index) = self.current_index() else {
            writeln!(out, "This report has no examples.")?;
            return Ok(true);
        };
        let Some(controller) = self
            .review
            .example_mut(index)
            .and_then(ExampleReview::controller_mut)
        else {
            writeln!(out, "This example could not be loaded; only next/prev/quit are available.")?;
            return Ok(true);
        };

        match command {
            ReplCommand::Mistake => controller.show_mistake(),
            ReplCommand::Better => {
                // Status line carries the outcome
                let _ = controller.show_better_move();
            }
            ReplCommand::Reset => controller.reset(),
            ReplCommand::Play => controller.enable_interactive(),
            ReplCommand::Click(square) => match controller.click(square) {
                ClickOutcome::Ignored => {
                    writeln!(out, "The board is locked. Type 'play' to unlock it.")?;
                    return Ok(true);
                }
                ClickOutcome::NothingSelected => {
                    writeln!(out, "No piece of the side to move on {square}.")?;
                    return Ok(true);
                }
                ClickOutcome::Selected { square, destinations } => {
                    let list: Vec<String> = destinations.iter().map(|s| s.to_string()).collect();
                    writeln!(out, "Selected {square}: {}", list.join(" "))?;
                }
                ClickOutcome::Moved(_) | ClickOutcome::Rejected => {}
            },
            ReplCommand::Move(notation) => {
                if !controller.is_interactive() {
                    writeln!(out, "The board is locked. Type 'play' to unlock it.")?;
                    return Ok(true);
                }
                let _ = controller.attempt_notation(&notation);
            }
            _ => {}
        }

        self.print_example(out)?;
        Ok(true)
    }
}

pub fn run<R: BufRead, W: Write>(review: ReportReview, input: R, mut out: W) -> io::Result<()> {
    let mut session = Session::new(review);
    session.print_summary(&mut out)?;
    session.print_example(&mut out)?;
    writeln!(out, "Type 'help' for commands.")?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Ok(command) => {
                if !session.execute(command, &mut out)? {
                    break;
                }
            }
            Err(e) => writeln!(out, "{e}")?,
        }
        out.flush()?;
    }
    Ok(())
}
