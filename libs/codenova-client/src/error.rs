use std::fmt;

use reqwest::StatusCode;

/// Backend call that produced a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Judge,
    Result,
    Share,
    LoadShare,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Endpoint::Judge => "judge",
            Endpoint::Result => "result",
            Endpoint::Share => "share",
            Endpoint::LoadShare => "load share",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PlaygroundError {
    #[error("test case #{} is missing its input or expected output", .index + 1)]
    IncompleteTestCases { index: usize },

    #[error("{endpoint} request failed with status {status}")]
    Status { endpoint: Endpoint, status: StatusCode },

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("task {task_id} produced no result after {attempts} polls")]
    PollTimeout { task_id: String, attempts: u32 },

    #[error("sharing requires a run where every test case passed")]
    ShareUnavailable,

    #[error("submission was superseded by a newer one")]
    Superseded,

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("clipboard unavailable: {0}")]
pub struct ClipboardError(pub String);

impl PlaygroundError {
    /// Text shown to the user for this failure.
    ///
    /// Bare status failures carry nothing worth showing, so they fall back to
    /// the caller's generic wording.
    pub fn notice_message(&self, fallback: &str) -> String {
        match self {
            PlaygroundError::Status { .. } => fallback.to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlaygroundError>;
