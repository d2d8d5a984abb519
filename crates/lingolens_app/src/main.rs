mod platform;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use lingolens_client::{ClientHandle, ClientSettings};
use lingolens_logging::LogDestination;
use log::LevelFilter;

use crate::platform::app::App;
use crate::platform::ui::render::{language_lines, status_line};

#[derive(Parser)]
#[command(name = "lingolens", about = "Translate the text found in an image", version)]
struct Cli {
    /// Target language code (e.g. "es"); must be in the service's catalog.
    #[arg(short, long, global = true)]
    language: Option<String>,

    /// Where log output goes.
    #[arg(long, value_enum, default_value_t = LogTarget::File, global = true)]
    log: LogTarget,

    /// Log debug details.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Translate one image file.
    Translate {
        /// Image file to upload.
        path: PathBuf,

        /// Copy the translated text to the clipboard.
        #[arg(long)]
        copy: bool,
    },
    /// Open files, drop paths or paste images in a session (default).
    Interactive,
    /// List the available target languages.
    Languages,
    /// Check whether the translation service answers.
    Health,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogTarget {
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    lingolens_logging::initialize(cli.log.into(), level);

    let mut app = App::new(ClientHandle::new(ClientSettings::default()));
    app.mount(cli.language.as_deref())?;

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Translate { path, copy } => {
            let view = app.translate_file(&path)?;
            if view.error.is_some() {
                return Ok(ExitCode::FAILURE);
            }
            if copy {
                app.copy_result()?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Interactive => {
            app.run_interactive()?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Languages => {
            for line in language_lines(&app.view()) {
                println!("{line}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Health => {
            let online = app.wait_for_health()?;
            println!("{}", status_line(&app.view()));
            Ok(if online {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}
