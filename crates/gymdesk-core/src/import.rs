// ── CSV import results ──
//
// The backend answers an upload with free text. These helpers turn that
// text into an outcome and a list of per-row problems.

use serde::Serialize;
use strum::Display;

/// How many row errors to show before summarizing the rest.
pub const MAX_ROW_ERRORS_SHOWN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ImportOutcome {
    /// Every row went in.
    Imported,
    /// The backend refused the file or its rows.
    Rejected,
    /// Some rows went in; the message says which did not.
    Partial,
}

/// Outcome plus the backend's own words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub outcome: ImportOutcome,
    pub message: String,
}

impl ImportReport {
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            outcome: classify_import_message(&message),
            message,
        }
    }

    /// A failed upload whose error text came from the backend.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            outcome: ImportOutcome::Rejected,
            message: message.into(),
        }
    }

    pub fn row_errors(&self) -> Vec<&str> {
        row_errors(&self.message)
    }
}

pub fn classify_import_message(message: &str) -> ImportOutcome {
    if message.contains("successfully imported") {
        ImportOutcome::Imported
    } else if message.contains("Error") || message.contains("Missing") {
        ImportOutcome::Rejected
    } else {
        ImportOutcome::Partial
    }
}

/// Per-row lines from a message that mentions rows; empty otherwise.
pub fn row_errors(message: &str) -> Vec<&str> {
    if !message.contains("Row") {
        return Vec::new();
    }
    message
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// The first [`MAX_ROW_ERRORS_SHOWN`] lines and how many were left out.
pub fn truncate_row_errors<'a>(lines: &'a [&'a str]) -> (&'a [&'a str], usize) {
    let shown = lines.len().min(MAX_ROW_ERRORS_SHOWN);
    (&lines[..shown], lines.len() - shown)
}
