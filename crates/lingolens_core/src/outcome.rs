/// Identifies one submission. Issued in increasing order by the state machine.
pub type SubmissionId = u64;

/// Successful result of one submission, as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationOutcome {
    pub original_text: String,
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
    pub target_language_name: String,
    /// Informational note from the backend, e.g. "No text detected".
    pub message: Option<String>,
}
