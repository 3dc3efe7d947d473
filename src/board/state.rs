use chrono::{DateTime, Local};
use egui::Color32;
use itertools::Itertools;

use crate::status::{Line, StatusOutput};

use super::palette;

/// One rendered card on the board.
///
/// `expanded` is pure presentation state: it lives only in the view-model
/// and is discarded whenever a snapshot replaces the card list.
#[derive(Clone, Debug, PartialEq)]
pub struct LineCard {
    pub name: String,
    pub status: String,
    pub reason: Option<String>,
    pub color: Color32,
    pub expanded: bool,
}

impl LineCard {
    /// Flip the status-detail visibility for this card.
    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }

    /// Header label matching the current toggle state.
    pub fn toggle_label(&self) -> &'static str {
        if self.expanded { "collapse" } else { "expand" }
    }
}

/// Build the card list for a snapshot: exactly one card per line, sorted
/// alphabetically by name, all collapsed.
pub fn cards_from_lines(lines: &[Line]) -> Vec<LineCard> {
    lines
        .iter()
        .sorted_by(|a, b| a.name.cmp(&b.name))
        .map(|line| LineCard {
            name: line.name.clone(),
            status: line.severity_description().to_string(),
            reason: line.disruption_reason().map(str::to_string),
            color: palette::line_color(&line.name),
            expanded: false,
        })
        .collect()
}

/// What the central panel is currently showing.
#[derive(Clone, Debug, PartialEq)]
pub enum BoardView {
    /// Nothing has arrived yet; the initial fetch is underway.
    Loading,
    /// The card list from the latest snapshot.
    Lines(Vec<LineCard>),
    /// The error paragraph that replaces the list after a failed fetch.
    Failed(String),
}

/// Explicit board state, fed by [`StatusOutput`] messages.
///
/// Transitions: `Loading` on startup, then `Lines` or `Failed` per
/// incoming output. A refresh keeps the current view on screen and only
/// raises `refresh_in_flight` (button disabled, spinner shown) until the
/// next output replaces the view wholesale.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardState {
    pub view: BoardView,
    pub last_updated: Option<DateTime<Local>>,
    pub refresh_in_flight: bool,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardState {
    /// State at window open: the collector's first fetch is already running.
    pub fn new() -> Self {
        Self {
            view: BoardView::Loading,
            last_updated: None,
            refresh_in_flight: true,
        }
    }

    /// Apply one collector message, replacing the rendered view.
    ///
    /// The last-updated stamp only moves on successful snapshots, matching
    /// the board's promise that the stamp always refers to data on screen.
    pub fn apply(&mut self, output: StatusOutput) {
        self.refresh_in_flight = false;
        match output {
            StatusOutput::Snapshot { lines, fetched_at } => {
                self.view = BoardView::Lines(cards_from_lines(&lines));
                self.last_updated = Some(fetched_at);
            }
            StatusOutput::Failure { message } => {
                self.view = BoardView::Failed(message);
            }
        }
    }

    /// Record that a refresh was requested; the view stays as-is until the
    /// matching output arrives.
    pub fn begin_refresh(&mut self) {
        self.refresh_in_flight = true;
    }

    pub fn is_loading(&self) -> bool {
        self.refresh_in_flight || matches!(self.view, BoardView::Loading)
    }

    /// The rendered cards, if the board is showing any.
    pub fn cards(&self) -> Option<&[LineCard]> {
        match &self.view {
            BoardView::Lines(cards) => Some(cards),
            _ => None,
        }
    }
}
