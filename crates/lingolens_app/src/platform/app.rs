use std::collections::VecDeque;
use std::io::BufRead;
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use lingolens_client::ClientHandle;
use lingolens_core::{update, AppState, AppViewModel, Msg};
use lingolens_logging::{lens_info, lens_warn};

use super::clipboard::{PasteListener, POLL_INTERVAL};
use super::effects::EffectRunner;
use super::files::load_candidate;
use super::input::{parse_line, InputCommand, HELP};
use super::ui::console::Console;
use super::ui::render::{language_lines, status_line};

const TICK: Duration = Duration::from_millis(20);

/// Single message loop: every state change happens here, one message at a time.
pub struct App {
    state: AppState,
    msg_tx: mpsc::Sender<Msg>,
    msg_rx: mpsc::Receiver<Msg>,
    /// Messages received but not yet dispatched when `run_until` returned early.
    backlog: VecDeque<Msg>,
    effects: EffectRunner,
    console: Console,
}

impl App {
    pub fn new(client: ClientHandle) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        let effects = EffectRunner::new(client, msg_tx.clone());
        Self {
            state: AppState::new(),
            msg_tx,
            msg_rx,
            backlog: VecDeque::new(),
            effects,
            console: Console::new(),
        }
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.effects.run(effects);
        if was_dirty {
            self.console.render(&self.state.view());
        }
    }

    /// Processes messages until `done` accepts one, or `timeout` elapses.
    pub fn run_until(
        &mut self,
        timeout: Duration,
        mut done: impl FnMut(&Msg, &AppViewModel) -> bool,
    ) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            let mut inbox = self.pending_messages().into_iter();
            while let Some(msg) = inbox.next() {
                let probe = msg.clone();
                self.dispatch(msg);
                if done(&probe, &self.state.view()) {
                    self.backlog.extend(inbox);
                    return Ok(());
                }
            }
            if Instant::now() >= deadline {
                bail!("Timed out waiting for the translation service");
            }
            thread::sleep(TICK);
        }
    }

    /// Mounts the UI and waits for the catalog, then applies `language` if given.
    pub fn mount(&mut self, language: Option<&str>) -> Result<()> {
        self.dispatch(Msg::Mounted);
        self.run_until(Duration::from_secs(75), |msg, _| {
            matches!(msg, Msg::CatalogLoaded(_))
        })?;
        if let Some(code) = language {
            self.select_language(code)?;
        }
        Ok(())
    }

    pub fn select_language(&mut self, code: &str) -> Result<()> {
        self.dispatch(Msg::LanguageSelected(code.to_string()));
        let view = self.view();
        if view.target_language != code {
            let codes: Vec<_> = view.languages.iter().map(|(code, _)| code.as_str()).collect();
            bail!("Unknown language '{}'. Available: {}", code, codes.join(", "));
        }
        Ok(())
    }

    /// File-picker channel: one file, then wait for the outcome.
    pub fn translate_file(&mut self, path: &Path) -> Result<AppViewModel> {
        let candidate = load_candidate(path)?;
        self.dispatch(Msg::FilesPicked(vec![candidate]));
        if self.view().busy {
            // Bounded by the client's request timeout; the margin covers connection setup.
            self.run_until(Duration::from_secs(75), |msg, view| {
                matches!(msg, Msg::SubmissionCompleted { .. }) && !view.busy
            })?;
        }
        Ok(self.view())
    }

    /// Copies the translated text and keeps running until the indicator resets.
    pub fn copy_result(&mut self) -> Result<()> {
        let has_text = self
            .view()
            .result
            .is_some_and(|result| result.translated_text.is_some());
        if !has_text {
            bail!("Nothing to copy");
        }
        self.dispatch(Msg::CopyClicked);
        self.run_until(Duration::from_secs(5), |msg, _| {
            matches!(msg, Msg::CopiedExpired { .. } | Msg::CopyFailed(_))
        })
    }

    pub fn wait_for_health(&mut self) -> Result<bool> {
        if let Some(online) = self.view().backend_online {
            return Ok(online);
        }
        self.run_until(Duration::from_secs(75), |msg, _| {
            matches!(msg, Msg::HealthChecked(_))
        })?;
        Ok(self.view().backend_online.unwrap_or(false))
    }

    /// Interactive session: stdin commands plus clipboard pastes until `quit` or EOF.
    pub fn run_interactive(&mut self) -> Result<()> {
        let _paste_listener = match PasteListener::subscribe(self.msg_tx.clone(), POLL_INTERVAL) {
            Ok(listener) => Some(listener),
            Err(err) => {
                lens_warn!("Continuing without paste support: {:#}", err);
                self.console.println(format!("Clipboard paste disabled: {err:#}"));
                None
            }
        };

        let input_rx = spawn_stdin_reader();
        self.console.println(HELP);
        self.console.println(status_line(&self.view()));

        loop {
            loop {
                match input_rx.try_recv() {
                    Ok(InputCommand::Quit) | Err(mpsc::TryRecvError::Disconnected) => {
                        lens_info!("Interactive session finished");
                        return Ok(());
                    }
                    Ok(command) => self.handle_command(command),
                    Err(mpsc::TryRecvError::Empty) => break,
                }
            }
            for msg in self.pending_messages() {
                self.dispatch(msg);
            }
            thread::sleep(TICK);
        }
    }

    fn handle_command(&mut self, command: InputCommand) {
        match command {
            InputCommand::Quit | InputCommand::Empty => {}
            InputCommand::Help => self.console.println(HELP),
            InputCommand::Copy => self.dispatch(Msg::CopyClicked),
            InputCommand::ListLanguages => {
                for line in language_lines(&self.view()) {
                    self.console.println(line);
                }
            }
            InputCommand::Status => self.console.println(status_line(&self.view())),
            InputCommand::SelectLanguage(code) => {
                if let Err(err) = self.select_language(&code) {
                    self.console.println(err.to_string());
                } else {
                    self.console.println(status_line(&self.view()));
                }
            }
            InputCommand::Pick(path) => match load_candidate(&path) {
                Ok(candidate) => self.dispatch(Msg::FilesPicked(vec![candidate])),
                Err(err) => self.console.println(format!("{err:#}")),
            },
            InputCommand::Drop(path) => {
                self.dispatch(Msg::DragEnter);
                match load_candidate(&path) {
                    Ok(candidate) => self.dispatch(Msg::Dropped(vec![candidate])),
                    Err(err) => {
                        self.dispatch(Msg::DragLeave);
                        self.console.println(format!("{err:#}"));
                    }
                }
            }
            InputCommand::Unknown(line) => {
                self.console
                    .println(format!("Not a file or command: {line} (type 'help')"));
            }
        }
    }

    /// Backlog first, then local messages, then client events, each in arrival order.
    fn pending_messages(&mut self) -> Vec<Msg> {
        let mut inbox: Vec<Msg> = self.backlog.drain(..).collect();
        inbox.extend(self.msg_rx.try_iter());
        inbox.extend(self.effects.drain_client_events());
        inbox
    }
}

fn spawn_stdin_reader() -> mpsc::Receiver<InputCommand> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let command = parse_line(&line, Path::exists);
            if tx.send(command).is_err() {
                break;
            }
        }
    });
    rx
}
