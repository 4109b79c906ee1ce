//! Review of AI-flagged mistakes: one state machine per example, driven by
//! the position engine in `chess-core`.

pub mod config;
pub mod controller;
pub mod error;
pub mod selection;
pub mod session;
pub mod status;
pub mod view;

pub use config::{Consistency, ReviewOptions};
pub use controller::{ExampleReview, FailedExample, ReviewController, ReviewState, View};
pub use error::{FenRole, ReviewError};
pub use selection::ClickOutcome;
pub use session::{ExampleIndex, ReportReview, ThemeReview};
pub use status::Status;
pub use view::{board_view, BoardView, Cell, Orientation};
