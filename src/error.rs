use thiserror::Error;

/// Capture hardware failure.
///
/// Every variant is recoverable: the session controller falls back to a
/// text-only response and the session continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    /// The user denied camera/microphone access.
    #[error("camera/microphone permission denied")]
    PermissionDenied,

    /// No usable capture device, or the device is busy.
    #[error("capture device unavailable: {0}")]
    Unavailable(String),

    /// The device dropped out while a recording was in progress.
    #[error("capture device disconnected while recording")]
    Disconnected,

    /// Recording stopped with zero captured chunks. Treated as if the user
    /// had chosen a text response; no artifact with empty media is submitted.
    #[error("recording stopped with no captured data")]
    Empty,
}

/// Artifact submission failure, surfaced verbatim to the user.
///
/// The in-progress response stays buffered so the user can retry manually.
/// Submissions are never retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct PersistenceError {
    pub message: String,
}

impl PersistenceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Top-level error for session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// The caller invoked an operation that is not legal in the current
    /// session state.
    #[error("`{action}` is not valid in the {state} state")]
    InvalidAction {
        action: &'static str,
        state: &'static str,
    },

    /// Neither text nor media was entered before saving.
    #[error("nothing to submit: add text or record a response first")]
    EmptySubmission,
}
