//! Log Stream Viewer: follow a log server's event stream,
//! clear its logs and run scripts on it, from the terminal.
//!
//! - `watch` (default): interactive terminal UI
//! - `tail`: print the live stream to stdout
//! - `clear`: clear the server logs
//! - `run <SCRIPT>`: run a script and print its output for a while

use std::{process::ExitCode, sync::Arc, time::Duration};

use clap::{Parser, Subcommand};
use lsv_client::{HttpBackend, LogStreamViewer, ViewerOptions};
use lsv_core::{VIEWER_VERSION_NAME, err, info};
use tokio::sync::mpsc;

use crate::{cli::TerminalPrompt, config::ViewerConfig, tui::AppResult};

mod cli;
mod config;
mod tui;

#[derive(Parser, Debug)]
#[command(
    name = "log_stream_viewer",
    version,
    about = "Follow, clear and run scripts on a log server"
)]
struct Cli {
    /// Base url of the log server (overrides the config file)
    #[arg(long, global = true, value_name = "URL")]
    server: Option<String>,

    /// Don't write the viewer's own logs to disk
    #[arg(long, global = true)]
    no_log: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive terminal UI (default)
    Watch,
    /// Print the live log stream to stdout
    Tail,
    /// Clear all server logs
    Clear {
        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Run a script on the server and print its output
    Run {
        script: String,
        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
        /// How long to follow the output, in seconds
        #[arg(long, value_name = "SECONDS")]
        window: Option<u64>,
    },
}

fn main() -> ExitCode {
    let args = Cli::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            err!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Cli) -> AppResult<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let mut config = ViewerConfig::load_s(args.no_log);
    if config.version.as_deref() != Some(VIEWER_VERSION_NAME) {
        config.version = Some(VIEWER_VERSION_NAME.to_owned());
        if let Err(error) = runtime.block_on(config.save()) {
            err!("Couldn't save config: {error}");
        }
    }

    let server = args.server.unwrap_or_else(|| config.server.clone());
    let mut options = ViewerOptions {
        script_run_window: config.c_script_run_window(),
    };
    if let Some(Command::Run {
        window: Some(secs), ..
    }) = &args.command
    {
        options.script_run_window = Duration::from_secs(*secs);
    }

    let backend = HttpBackend::new(&server)?;
    let (view_sender, view_events) = mpsc::unbounded_channel();
    let viewer = Arc::new(LogStreamViewer::new(
        Arc::new(backend),
        view_sender,
        options,
    ));
    info!("Log Stream Viewer {VIEWER_VERSION_NAME}, server: {server}");

    let result = match args.command.unwrap_or(Command::Watch) {
        Command::Watch => {
            let _guard = runtime.enter();
            tui::run_tui(viewer.clone(), view_events, &server)
        }
        Command::Tail => runtime.block_on(cli::tail(viewer.clone(), view_events)),
        Command::Clear { yes } => runtime.block_on(cli::clear(
            viewer.clone(),
            view_events,
            TerminalPrompt { assume_yes: yes },
        )),
        Command::Run { script, yes, .. } => runtime.block_on(cli::run(
            viewer.clone(),
            view_events,
            TerminalPrompt { assume_yes: yes },
            &script,
        )),
    };
    viewer.close();
    result
}
