//! A whole analysis report opened for review. Every example is opened on its
//! own; a failed example never affects its neighbours.

use chess_core::MultiGameAnalysisReport;
use tracing::info;

use crate::config::ReviewOptions;
use crate::controller::ExampleReview;

#[derive(Debug, Clone)]
pub struct ThemeReview {
    pub title: String,
    pub description: String,
    pub examples: Vec<ExampleReview>,
}

#[derive(Debug, Clone)]
pub struct ReportReview {
    pub player_name: String,
    pub overall_summary: String,
    pub themes: Vec<ThemeReview>,
}

/// Position of one example inside a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExampleIndex {
    pub theme: usize,
    pub example: usize,
}

impl ReportReview {
    pub fn open(report: MultiGameAnalysisReport, options: &ReviewOptions) -> Self {
        let themes: Vec<ThemeReview> = report
            .recurring_themes
            .into_iter()
            .map(|theme| ThemeReview {
                title: theme.title,
                description: theme.description,
                examples: theme
                    .examples
                    .into_iter()
                    .map(|example| ExampleReview::open(example, options))
                    .collect(),
            })
            .collect();

        let review = Self {
            player_name: report.player_name,
            overall_summary: report.overall_summary,
            themes,
        };
        info!(
            themes = review.themes.len(),
            ready = review.ready_count(),
            failed = review.failed_count(),
            "Report opened"
        );
        review
    }

    /// Every example in theme order.
    pub fn indices(&self) -> Vec<ExampleIndex> {
        self.themes
            .iter()
            .enumerate()
            .flat_map(|(theme, t)| {
                (0..t.examples.len()).map(move |example| ExampleIndex { theme, example })
            })
            .collect()
    }

    pub fn example_count(&self) -> usize {
        self.themes.iter().map(|t| t.examples.len()).sum()
    }

    pub fn ready_count(&self) -> usize {
        self.themes
            .iter()
            .flat_map(|t| &t.examples)
            .filter(|e| e.is_ready())
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.example_count() - self.ready_count()
    }

    pub fn theme(&self, index: ExampleIndex) -> Option<&ThemeReview> {
        self.themes.get(index.theme)
    }

    pub fn example(&self, index: ExampleIndex) -> Option<&ExampleReview> {
        self.themes.get(index.theme)?.examples.get(index.example)
    }

    pub fn example_mut(&mut self, index: ExampleIndex) -> Option<&mut ExampleReview> {
        self.themes.get_mut(index.theme)?.examples.get_mut(index.example)
    }
}
