use crate::catalog::DEFAULT_LANGUAGE;
use crate::effect::COPIED_INDICATOR;
use crate::view_model::{AppViewModel, ResultView};
use crate::{Effect, ImageCandidate, LanguageCatalog, SubmissionId, TranslationOutcome};

/// What the result area currently shows. Exactly one of result or error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum ResultArea {
    #[default]
    Empty,
    Result(TranslationOutcome),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    catalog: LanguageCatalog,
    target_language: String,
    drag_active: bool,
    next_submission_id: SubmissionId,
    /// Most recently issued submission; only its updates reach the view.
    latest_submission: Option<SubmissionId>,
    pending: bool,
    progress: u8,
    display: ResultArea,
    /// Bumped whenever the result area is replaced, even by an equal value.
    display_revision: u64,
    copied: bool,
    copy_token: u64,
    backend_online: Option<bool>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            catalog: LanguageCatalog::fallback(),
            target_language: DEFAULT_LANGUAGE.to_string(),
            drag_active: false,
            next_submission_id: 1,
            latest_submission: None,
            pending: false,
            progress: 0,
            display: ResultArea::Empty,
            display_revision: 0,
            copied: false,
            copy_token: 0,
            backend_online: None,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let (result, error) = match &self.display {
            ResultArea::Empty => (None, None),
            ResultArea::Result(outcome) => (Some(ResultView::from_outcome(outcome)), None),
            ResultArea::Error(message) => (None, Some(message.clone())),
        };
        AppViewModel {
            languages: self
                .catalog
                .iter()
                .map(|(code, name)| (code.to_string(), name.to_string()))
                .collect(),
            target_language: self.target_language.clone(),
            drag_active: self.drag_active,
            busy: self.pending,
            progress: self.progress,
            result,
            error,
            result_revision: self.display_revision,
            copied: self.copied,
            backend_online: self.backend_online,
            dirty: self.dirty,
        }
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    pub fn latest_submission(&self) -> Option<SubmissionId> {
        self.latest_submission
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_drag_active(&mut self, active: bool) {
        if self.drag_active != active {
            self.drag_active = active;
            self.mark_dirty();
        }
    }

    fn show(&mut self, area: ResultArea) {
        self.display = area;
        self.display_revision += 1;
        self.mark_dirty();
    }

    pub(crate) fn set_error(&mut self, message: impl Into<String>) {
        self.show(ResultArea::Error(message.into()));
        self.copied = false;
    }

    pub(crate) fn set_backend_online(&mut self, online: bool) {
        self.backend_online = Some(online);
        self.mark_dirty();
    }

    pub(crate) fn apply_catalog(&mut self, catalog: LanguageCatalog) {
        self.target_language = catalog.reconcile_selection(&self.target_language);
        self.catalog = catalog;
        self.mark_dirty();
    }

    pub(crate) fn select_language(&mut self, code: &str) -> bool {
        if !self.catalog.contains(code) {
            return false;
        }
        if self.target_language != code {
            self.target_language = code.to_string();
            self.mark_dirty();
        }
        true
    }

    /// Starts a new submission: clears the previous outcome and returns the effect
    /// that sends the image.
    pub(crate) fn begin_submission(&mut self, image: ImageCandidate) -> Effect {
        let submission_id = self.next_submission_id;
        self.next_submission_id += 1;
        self.latest_submission = Some(submission_id);
        self.pending = true;
        self.progress = 0;
        self.copied = false;
        self.show(ResultArea::Empty);
        Effect::Submit {
            submission_id,
            image,
            target_language: self.target_language.clone(),
        }
    }

    fn is_current(&self, submission_id: SubmissionId) -> bool {
        self.pending && self.latest_submission == Some(submission_id)
    }

    /// Returns false when the update belongs to a superseded submission.
    pub(crate) fn apply_progress(&mut self, submission_id: SubmissionId, percent: u8) -> bool {
        if !self.is_current(submission_id) {
            return false;
        }
        let percent = percent.min(100);
        if percent > self.progress {
            self.progress = percent;
            self.mark_dirty();
        }
        true
    }

    /// Returns false when the result belongs to a superseded submission.
    pub(crate) fn apply_completion(
        &mut self,
        submission_id: SubmissionId,
        result: Result<TranslationOutcome, String>,
    ) -> bool {
        if !self.is_current(submission_id) {
            return false;
        }
        self.pending = false;
        self.progress = 0;
        self.show(match result {
            Ok(outcome) => ResultArea::Result(outcome),
            Err(reason) => ResultArea::Error(reason),
        });
        true
    }

    /// Text the copy action would place on the clipboard, if any.
    pub(crate) fn copyable_text(&self) -> Option<String> {
        match &self.display {
            ResultArea::Result(outcome) if !outcome.translated_text.is_empty() => {
                Some(outcome.translated_text.clone())
            }
            _ => None,
        }
    }

    pub(crate) fn mark_copied(&mut self) -> Effect {
        self.copy_token += 1;
        self.copied = true;
        self.mark_dirty();
        Effect::ScheduleCopiedReset {
            token: self.copy_token,
            after: COPIED_INDICATOR,
        }
    }

    pub(crate) fn expire_copied(&mut self, token: u64) {
        if self.copied && token == self.copy_token {
            self.copied = false;
            self.mark_dirty();
        }
    }
}
