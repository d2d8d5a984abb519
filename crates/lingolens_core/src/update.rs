use lingolens_logging::{lens_debug, lens_info, lens_warn};

use crate::{AppState, Effect, ImageCandidate, InputChannel, LanguageCatalog, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Mounted => vec![Effect::FetchCatalog, Effect::CheckHealth],
        Msg::CatalogLoaded(Ok(catalog)) if !catalog.is_empty() => {
            lens_info!("Loaded {} target languages", catalog.len());
            state.apply_catalog(catalog);
            Vec::new()
        }
        Msg::CatalogLoaded(result) => {
            let reason = result.err().unwrap_or_else(|| "empty catalog".to_string());
            lens_warn!("Language catalog unavailable, using built-in list: {}", reason);
            state.apply_catalog(LanguageCatalog::fallback());
            Vec::new()
        }
        Msg::HealthChecked(online) => {
            state.set_backend_online(online);
            Vec::new()
        }
        Msg::LanguageSelected(code) => {
            if !state.select_language(&code) {
                lens_warn!("Ignoring unknown target language {:?}", code);
            }
            Vec::new()
        }
        Msg::FilesPicked(files) => accept_first(&mut state, files, InputChannel::FilePicker),
        Msg::DragEnter | Msg::DragOver => {
            state.set_drag_active(true);
            Vec::new()
        }
        Msg::DragLeave => {
            state.set_drag_active(false);
            Vec::new()
        }
        Msg::Dropped(files) => {
            state.set_drag_active(false);
            accept_first(&mut state, files, InputChannel::DragAndDrop)
        }
        Msg::Pasted(items) => {
            let image = items
                .into_iter()
                .filter(|item| item.declares_image())
                .find_map(|item| item.candidate);
            match image {
                Some(image) => {
                    lens_info!(
                        "Pasted image {:?} ({}, {} bytes)",
                        image.name,
                        image.media_type,
                        image.bytes.len()
                    );
                    vec![Effect::SuppressDefaultPaste, state.begin_submission(image)]
                }
                None => Vec::new(),
            }
        }
        Msg::SubmissionProgress {
            submission_id,
            percent,
        } => {
            if !state.apply_progress(submission_id, percent) {
                lens_debug!("Dropping progress for superseded submission {}", submission_id);
            }
            Vec::new()
        }
        Msg::SubmissionCompleted {
            submission_id,
            result,
        } => {
            if let Err(reason) = &result {
                lens_warn!("Submission {} failed: {}", submission_id, reason);
            }
            if !state.apply_completion(submission_id, result) {
                lens_debug!("Dropping result for superseded submission {}", submission_id);
            }
            Vec::new()
        }
        Msg::CopyClicked => match state.copyable_text() {
            Some(text) => vec![Effect::CopyToClipboard { text }],
            None => Vec::new(),
        },
        Msg::CopySucceeded => vec![state.mark_copied()],
        Msg::CopyFailed(reason) => {
            lens_warn!("Copy to clipboard failed: {}", reason);
            state.set_error(format!("Failed to copy text: {reason}"));
            Vec::new()
        }
        Msg::CopiedExpired { token } => {
            state.expire_copied(token);
            Vec::new()
        }
    };

    (state, effects)
}

/// Takes the first file of a picker/drop event, validates it and starts a submission.
fn accept_first(
    state: &mut AppState,
    files: Vec<ImageCandidate>,
    channel: InputChannel,
) -> Vec<Effect> {
    let Some(image) = files.into_iter().next() else {
        return Vec::new();
    };
    match image.validate(channel) {
        Ok(()) => {
            lens_info!(
                "Accepted {:?} via {:?} ({}, {} bytes)",
                image.name,
                channel,
                image.media_type,
                image.bytes.len()
            );
            vec![state.begin_submission(image)]
        }
        Err(err) => {
            lens_info!("Rejected {:?} via {:?}: {:?}", image.name, channel, err);
            state.set_error(err.to_string());
            Vec::new()
        }
    }
}
