#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The UI is up; load the catalog and probe the backend.
    Mounted,
    /// Result of the catalog fetch. `Err` carries the reason for the log.
    CatalogLoaded(Result<crate::LanguageCatalog, String>),
    /// Advisory backend status.
    HealthChecked(bool),
    /// User picked a target language.
    LanguageSelected(String),
    /// User selected files with the file picker.
    FilesPicked(Vec<crate::ImageCandidate>),
    DragEnter,
    DragOver,
    DragLeave,
    /// User dropped files onto the drop zone.
    Dropped(Vec<crate::ImageCandidate>),
    /// A paste event anywhere in the UI.
    Pasted(Vec<crate::ClipboardItem>),
    /// Upload progress for a submission.
    SubmissionProgress {
        submission_id: crate::SubmissionId,
        percent: u8,
    },
    /// Terminal result of a submission. `Err` is the user-facing reason.
    SubmissionCompleted {
        submission_id: crate::SubmissionId,
        result: Result<crate::TranslationOutcome, String>,
    },
    /// User asked to copy the translated text.
    CopyClicked,
    CopySucceeded,
    CopyFailed(String),
    CopiedExpired { token: u64 },
}
