pub mod collector;
pub mod producer;

pub use collector::{RefreshTrigger, collect_status};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::errors::RoundelError;

/// Status text shown for a line that reported no status entries at all.
pub const UNKNOWN_STATUS: &str = "Unknown";

/// One status entry for a line, e.g. "Good Service" or "Minor Delays".
///
/// The TfL payload carries many more fields per entry (`$type`, `created`,
/// `validityPeriods`, ...); the board only ever reads the severity and the
/// optional disruption reason, so only those are decoded.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct LineStatus {
    pub status_severity: i32,
    pub status_severity_description: String,
    pub reason: Option<String>,
}

/// A named Underground line together with its current status entries.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Line {
    pub id: String,
    pub name: String,
    pub mode_name: String,
    pub line_statuses: Vec<LineStatus>,
}

impl Line {
    /// Human-readable description of the line's first status entry.
    ///
    /// A line usually reports exactly one entry; during disruptions TfL may
    /// report several, in which case the first is the headline one. Lines
    /// with no entries report [`UNKNOWN_STATUS`].
    pub fn severity_description(&self) -> &str {
        self.line_statuses
            .first()
            .map(|s| s.status_severity_description.as_str())
            .unwrap_or(UNKNOWN_STATUS)
    }

    /// First non-empty disruption reason, shown in the expanded card detail.
    pub fn disruption_reason(&self) -> Option<&str> {
        self.line_statuses
            .iter()
            .filter_map(|s| s.reason.as_deref())
            .find(|r| !r.trim().is_empty())
    }
}

/// Decode the body of a line-status response into typed [`Line`] records.
///
/// Unknown fields are ignored; a body that is not a JSON array of line
/// objects fails with a distinct malformed-response error kind so the log
/// can tell a bad payload apart from a transport failure.
pub fn decode_lines(body: &str) -> Result<Vec<Line>, RoundelError> {
    serde_json::from_str(body).map_err(|e| RoundelError::MalformedStatusError { source: e })
}

/// Message sent from the collector thread to the board.
///
/// Every message wholesale replaces whatever the board currently shows:
/// there is exactly one rendered view at a time and no merging between
/// refresh cycles.
#[derive(Clone, Debug)]
pub enum StatusOutput {
    Snapshot {
        lines: Vec<Line>,
        fetched_at: DateTime<Local>,
    },
    Failure {
        message: String,
    },
}
