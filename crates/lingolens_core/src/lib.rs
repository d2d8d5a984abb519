//! LingoLens core: pure state machine for image submission and result display.
mod candidate;
mod catalog;
mod effect;
mod msg;
mod outcome;
mod state;
mod update;
mod view_model;

pub use candidate::{is_image_media_type, ClipboardItem, ImageCandidate, InputChannel, ValidationError};
pub use catalog::{LanguageCatalog, DEFAULT_LANGUAGE};
pub use effect::{Effect, COPIED_INDICATOR};
pub use msg::Msg;
pub use outcome::{SubmissionId, TranslationOutcome};
pub use state::AppState;
pub use update::update;
pub use view_model::{AppViewModel, ResultView};
