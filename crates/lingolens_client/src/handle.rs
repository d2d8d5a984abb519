use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use lingolens_core::{ImageCandidate, SubmissionId};
use lingolens_logging::{lens_error, lens_info};
use tokio::runtime::Runtime;

use crate::client::{ClientSettings, ProgressSink, ReqwestTranslateClient, TranslateClient};
use crate::{ClientError, ClientEvent};

enum ClientCommand {
    FetchLanguages,
    CheckHealth,
    Submit {
        submission_id: SubmissionId,
        image: ImageCandidate,
        target_language: String,
    },
}

/// Runs client calls on a background tokio runtime and reports them as events.
///
/// Each command becomes its own task, so overlapping submissions proceed
/// independently; the receiver decides which results still matter. Every
/// command yields exactly one terminal event, even when the runtime is down.
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
    event_tx: mpsc::Sender<ClientEvent>,
    event_rx: mpsc::Receiver<ClientEvent>,
}

impl ClientHandle {
    pub fn new(settings: ClientSettings) -> Self {
        Self::with_client(Arc::new(ReqwestTranslateClient::new(settings)))
    }

    pub fn with_client(client: Arc<dyn TranslateClient>) -> Self {
        Self::spawn(client, tokio::runtime::Runtime::new)
    }

    fn spawn<F>(client: Arc<dyn TranslateClient>, build_runtime: F) -> Self
    where
        F: FnOnce() -> io::Result<Runtime> + Send + 'static,
    {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        let worker_tx = event_tx.clone();
        thread::spawn(move || {
            let runtime = match build_runtime() {
                Ok(runtime) => runtime,
                Err(err) => {
                    lens_error!("Failed to start client runtime: {}", err);
                    while let Ok(command) = cmd_rx.recv() {
                        let _ = worker_tx.send(unavailable(command));
                    }
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let event_tx = worker_tx.clone();
                runtime.spawn(async move {
                    handle_command(client.as_ref(), command, event_tx).await;
                });
            }
            lens_info!("Client handle closed, shutting down runtime");
        });

        Self {
            cmd_tx,
            event_tx,
            event_rx,
        }
    }

    pub fn fetch_languages(&self) {
        self.send(ClientCommand::FetchLanguages);
    }

    pub fn check_health(&self) {
        self.send(ClientCommand::CheckHealth);
    }

    pub fn submit(
        &self,
        submission_id: SubmissionId,
        image: ImageCandidate,
        target_language: impl Into<String>,
    ) {
        self.send(ClientCommand::Submit {
            submission_id,
            image,
            target_language: target_language.into(),
        });
    }

    fn send(&self, command: ClientCommand) {
        if let Err(mpsc::SendError(command)) = self.cmd_tx.send(command) {
            lens_error!("Client worker is gone, failing command immediately");
            let _ = self.event_tx.send(unavailable(command));
        }
    }

    pub fn try_recv(&self) -> Option<ClientEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<ClientEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

/// Terminal event for a command that never reached the runtime.
fn unavailable(command: ClientCommand) -> ClientEvent {
    match command {
        ClientCommand::FetchLanguages => ClientEvent::CatalogLoaded(Err(
            ClientError::CatalogFetch(ClientError::Unavailable.to_string()),
        )),
        ClientCommand::CheckHealth => ClientEvent::HealthChecked(false),
        ClientCommand::Submit { submission_id, .. } => ClientEvent::SubmissionCompleted {
            submission_id,
            result: Err(ClientError::Unavailable),
        },
    }
}

struct ChannelProgressSink {
    submission_id: SubmissionId,
    tx: mpsc::Sender<ClientEvent>,
}

impl ProgressSink for ChannelProgressSink {
    fn report(&self, percent: u8) {
        let _ = self.tx.send(ClientEvent::Progress {
            submission_id: self.submission_id,
            percent,
        });
    }
}

async fn handle_command(
    client: &dyn TranslateClient,
    command: ClientCommand,
    event_tx: mpsc::Sender<ClientEvent>,
) {
    let event = match command {
        ClientCommand::FetchLanguages => ClientEvent::CatalogLoaded(client.fetch_languages().await),
        ClientCommand::CheckHealth => ClientEvent::HealthChecked(client.health_check().await),
        ClientCommand::Submit {
            submission_id,
            image,
            target_language,
        } => {
            let sink = Arc::new(ChannelProgressSink {
                submission_id,
                tx: event_tx.clone(),
            });
            let result = client.translate_image(&image, &target_language, sink).await;
            ClientEvent::SubmissionCompleted {
                submission_id,
                result,
            }
        }
    };
    let _ = event_tx.send(event);
}

#[cfg(test)]
mod tests {
    use lingolens_core::{LanguageCatalog, TranslationOutcome};
    use pretty_assertions::assert_eq;

    use super::*;

    struct UnreachableClient;

    #[async_trait::async_trait]
    impl TranslateClient for UnreachableClient {
        async fn fetch_languages(&self) -> Result<LanguageCatalog, ClientError> {
            unreachable!("no runtime to run on")
        }

        async fn translate_image(
            &self,
            _image: &ImageCandidate,
            _target_language: &str,
            _sink: Arc<dyn ProgressSink>,
        ) -> Result<TranslationOutcome, ClientError> {
            unreachable!("no runtime to run on")
        }

        async fn health_check(&self) -> bool {
            unreachable!("no runtime to run on")
        }
    }

    fn handle_without_runtime() -> ClientHandle {
        ClientHandle::spawn(Arc::new(UnreachableClient), || {
            Err(io::Error::other("no threads left"))
        })
    }

    #[test]
    fn submission_fails_at_once_when_runtime_cannot_start() {
        let handle = handle_without_runtime();
        handle.submit(7, ImageCandidate::new("a.png", "image/png", vec![1, 2, 3]), "es");

        assert_eq!(
            handle.recv_timeout(Duration::from_secs(5)),
            Some(ClientEvent::SubmissionCompleted {
                submission_id: 7,
                result: Err(ClientError::Unavailable),
            })
        );
    }

    #[test]
    fn catalog_and_health_fail_when_runtime_cannot_start() {
        let handle = handle_without_runtime();
        handle.fetch_languages();
        handle.check_health();

        assert_eq!(
            handle.recv_timeout(Duration::from_secs(5)),
            Some(ClientEvent::CatalogLoaded(Err(ClientError::CatalogFetch(
                "Translation client unavailable".to_string()
            ))))
        );
        assert_eq!(
            handle.recv_timeout(Duration::from_secs(5)),
            Some(ClientEvent::HealthChecked(false))
        );
    }

    #[test]
    fn commands_after_worker_exit_fail_immediately() {
        let (event_tx, event_rx) = mpsc::channel();
        let (cmd_tx, cmd_rx) = mpsc::channel();
        drop(cmd_rx);
        let handle = ClientHandle {
            cmd_tx,
            event_tx,
            event_rx,
        };

        handle.submit(3, ImageCandidate::new("a.png", "image/png", vec![0]), "fr");
        assert_eq!(
            handle.try_recv(),
            Some(ClientEvent::SubmissionCompleted {
                submission_id: 3,
                result: Err(ClientError::Unavailable),
            })
        );
    }
}
