use bytes::Bytes;
use thiserror::Error;

/// Channels whose candidates are validated before submission. Pastes are
/// filtered by declared type instead and never reach validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputChannel {
    FilePicker,
    DragAndDrop,
}

/// A binary image payload proposed for submission, prior to validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCandidate {
    pub name: String,
    pub media_type: String,
    pub bytes: Bytes,
}

impl ImageCandidate {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn is_image(&self) -> bool {
        is_image_media_type(&self.media_type)
    }

    /// Checks the declared media type for the given channel.
    pub fn validate(&self, channel: InputChannel) -> Result<(), ValidationError> {
        if self.is_image() {
            Ok(())
        } else {
            Err(ValidationError::NotAnImage {
                channel,
                media_type: self.media_type.clone(),
            })
        }
    }
}

/// One entry of a paste event. `candidate` is `None` when the entry could not
/// be read as a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardItem {
    pub media_type: String,
    pub candidate: Option<ImageCandidate>,
}

impl ClipboardItem {
    pub fn text() -> Self {
        Self {
            media_type: "text/plain".to_string(),
            candidate: None,
        }
    }

    pub fn image(candidate: ImageCandidate) -> Self {
        Self {
            media_type: candidate.media_type.clone(),
            candidate: Some(candidate),
        }
    }

    pub(crate) fn declares_image(&self) -> bool {
        self.media_type.contains("image")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{}", not_an_image_message(.channel))]
    NotAnImage {
        channel: InputChannel,
        media_type: String,
    },
}

fn not_an_image_message(channel: &InputChannel) -> &'static str {
    match channel {
        InputChannel::FilePicker => "Please select an image file",
        InputChannel::DragAndDrop => "Please upload an image file",
    }
}

pub fn is_image_media_type(media_type: &str) -> bool {
    media_type.starts_with("image/")
}
