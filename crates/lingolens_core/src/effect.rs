use std::time::Duration;

use crate::{ImageCandidate, SubmissionId};

/// How long the "copied" indicator stays on after a successful copy.
pub const COPIED_INDICATOR: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchCatalog,
    CheckHealth,
    /// Keep the platform from applying its own paste handling.
    SuppressDefaultPaste,
    Submit {
        submission_id: SubmissionId,
        image: ImageCandidate,
        target_language: String,
    },
    CopyToClipboard { text: String },
    /// Deliver `Msg::CopiedExpired { token }` after `after` has elapsed.
    ScheduleCopiedReset { token: u64, after: Duration },
}
