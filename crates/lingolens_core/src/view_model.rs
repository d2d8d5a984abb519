use crate::TranslationOutcome;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    /// (code, display name), ordered by code.
    pub languages: Vec<(String, String)>,
    pub target_language: String,
    pub drag_active: bool,
    /// A submission is in flight.
    pub busy: bool,
    pub progress: u8,
    pub result: Option<ResultView>,
    pub error: Option<String>,
    /// Changes every time the result area is replaced, so a repeated error
    /// still counts as new output.
    pub result_revision: u64,
    pub copied: bool,
    pub backend_online: Option<bool>,
    pub dirty: bool,
}

/// Result sections. Optional sections are `None` rather than empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub source_language: String,
    pub original_text: Option<String>,
    pub target_language_name: String,
    pub translated_text: Option<String>,
    pub message: Option<String>,
}

impl ResultView {
    pub(crate) fn from_outcome(outcome: &TranslationOutcome) -> Self {
        Self {
            source_language: outcome.source_language.clone(),
            original_text: non_empty(&outcome.original_text),
            target_language_name: outcome.target_language_name.clone(),
            translated_text: non_empty(&outcome.translated_text),
            message: outcome.message.as_deref().and_then(non_empty),
        }
    }
}

fn non_empty(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
