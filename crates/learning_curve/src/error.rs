use std::path::PathBuf;

use thiserror::Error;

use crate::parser::{CYCLE_MARKER, UTILITY_MARKER, WINS_MARKER};

/// Fatal conditions reported to the user.
#[derive(Debug, Error)]
pub enum CurveError {
    /// Checked before any parsing is attempted.
    #[error("logfile [{}] does not exist", .path.display())]
    FileNotFound { path: PathBuf },

    /// Parsing finished without a single sample.
    #[error(
        "no parsable lines found in logfile [{}]{}. Ensure lines contain '{}', '{}', and '{}'",
        .path.display(),
        read_failure(.read_error),
        CYCLE_MARKER,
        UTILITY_MARKER,
        WINS_MARKER
    )]
    EmptyResult {
        path: PathBuf,
        read_error: Option<String>,
    },

    #[error("cannot render an empty metric series")]
    EmptySeries,
}

fn read_failure(read_error: &Option<String>) -> String {
    match read_error {
        Some(e) => format!(" (read failed: {})", e),
        None => String::new(),
    }
}
