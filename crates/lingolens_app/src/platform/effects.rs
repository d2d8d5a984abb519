use std::sync::mpsc;
use std::thread;

use arboard::Clipboard;
use lingolens_client::{ClientEvent, ClientHandle};
use lingolens_core::{Effect, Msg};
use lingolens_logging::{lens_debug, lens_info};

/// Executes effects returned by `update` and turns client events back into messages.
pub struct EffectRunner {
    client: ClientHandle,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(client: ClientHandle, msg_tx: mpsc::Sender<Msg>) -> Self {
        Self { client, msg_tx }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchCatalog => self.client.fetch_languages(),
                Effect::CheckHealth => self.client.check_health(),
                Effect::SuppressDefaultPaste => {
                    // The listener only observes the clipboard; nothing else consumes the paste.
                    lens_debug!("Paste handled as image submission");
                }
                Effect::Submit {
                    submission_id,
                    image,
                    target_language,
                } => {
                    lens_info!(
                        "Submit submission_id={} name={:?} bytes={} target={}",
                        submission_id,
                        image.name,
                        image.bytes.len(),
                        target_language
                    );
                    self.client.submit(submission_id, image, target_language);
                }
                Effect::CopyToClipboard { text } => {
                    let msg = match copy_text(&text) {
                        Ok(()) => Msg::CopySucceeded,
                        Err(err) => Msg::CopyFailed(err.to_string()),
                    };
                    let _ = self.msg_tx.send(msg);
                }
                Effect::ScheduleCopiedReset { token, after } => {
                    let msg_tx = self.msg_tx.clone();
                    thread::spawn(move || {
                        thread::sleep(after);
                        let _ = msg_tx.send(Msg::CopiedExpired { token });
                    });
                }
            }
        }
    }

    /// Drains pending client events as messages, in arrival order.
    pub fn drain_client_events(&self) -> Vec<Msg> {
        std::iter::from_fn(|| self.client.try_recv())
            .map(client_event_to_msg)
            .collect()
    }
}

fn copy_text(text: &str) -> Result<(), arboard::Error> {
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text.to_string())
}

pub fn client_event_to_msg(event: ClientEvent) -> Msg {
    match event {
        ClientEvent::CatalogLoaded(result) => {
            Msg::CatalogLoaded(result.map_err(|err| err.to_string()))
        }
        ClientEvent::HealthChecked(online) => Msg::HealthChecked(online),
        ClientEvent::Progress {
            submission_id,
            percent,
        } => Msg::SubmissionProgress {
            submission_id,
            percent,
        },
        ClientEvent::SubmissionCompleted {
            submission_id,
            result,
        } => Msg::SubmissionCompleted {
            submission_id,
            result: result.map_err(|err| err.to_string()),
        },
    }
}
