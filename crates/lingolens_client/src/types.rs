use lingolens_core::{LanguageCatalog, SubmissionId, TranslationOutcome};
use thiserror::Error;

/// Failures of the upload/translate client. `Display` is the user-facing text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("Network error occurred")]
    Network,
    #[error("Request timed out")]
    Timeout,
    #[error("Invalid response format: {0}")]
    ResponseFormat(String),
    #[error("{0}")]
    Backend(String),
    #[error("Failed to load languages: {0}")]
    CatalogFetch(String),
    /// The background runtime is not running, so no request was made.
    #[error("Translation client unavailable")]
    Unavailable,
}

/// Events reported by a [`crate::ClientHandle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    CatalogLoaded(Result<LanguageCatalog, ClientError>),
    HealthChecked(bool),
    Progress {
        submission_id: SubmissionId,
        percent: u8,
    },
    SubmissionCompleted {
        submission_id: SubmissionId,
        result: Result<TranslationOutcome, ClientError>,
    },
}
