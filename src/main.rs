//! `moodlens` command-line host.
//!
//! Runs the popup pipeline against text taken from a flag, a file, or stdin
//! and prints the rendered markup to stdout. `render` skips the network and
//! renders a saved response instead.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use moodlens::api::http::ReqwestTransport;
use moodlens::api::{EnvKey, TransportError};
use moodlens::config::ConfigError;
use moodlens::host::TextDocument;
use moodlens::{
    AnalysisClient, ClientConfig, Controller, Extractor, Markup, PopupView, UiState, Visibility, present, render,
};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
    #[error("transport setup failed: {0}")]
    Transport(#[from] TransportError),
}

#[derive(Parser, Debug)]
#[command(name = "moodlens", about = "Emotion analysis for selected text")]
struct Cli {
    /// Analysis endpoint; overrides `MOODLENS_ENDPOINT`.
    #[arg(long)]
    endpoint: Option<String>,

    /// Environment variable holding the API key; overrides `MOODLENS_API_KEY_ENV`.
    #[arg(long)]
    api_key_env: Option<String>,

    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    request_timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze text and print the rendered result.
    Analyze(AnalyzeArgs),
    /// Render a saved analysis response without calling the service.
    Render {
        #[arg(default_value = "-", help = "Response JSON file, or - for stdin")]
        input: String,
    },
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    #[arg(long, conflicts_with = "file")]
    text: Option<String>,

    #[arg(long, help = "Read the text from a file instead of stdin")]
    file: Option<PathBuf>,
}

/// Loading notice and errors on stderr, markup on stdout.
struct TerminalView;

impl PopupView for TerminalView {
    fn show(&mut self, visibility: Visibility) {
        if visibility.loading {
            eprintln!("Analyzing...");
        }
    }

    fn set_result(&mut self, markup: Markup) {
        println!("{markup}");
    }

    fn set_error(&mut self, message: String) {
        eprintln!("Error: {message}");
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    if let Err(error) = dotenvy::dotenv() {
        if !error.not_found() {
            tracing::warn!(%error, "failed to load .env");
        }
    }

    let cli = Cli::parse();
    match run(cli).await {
        Ok(UiState::Result) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("moodlens: {error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<UiState, CliError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(endpoint) = cli.endpoint.as_deref() {
        config = config.with_endpoint(endpoint)?;
    }
    if let Some(var) = cli.api_key_env {
        config.api_key_env = var;
    }
    if let Some(secs) = cli.request_timeout_secs {
        config.timeouts.request_secs = secs;
    }

    match cli.command {
        Command::Analyze(args) => analyze(&config, args).await,
        Command::Render { input } => render_saved(&input),
    }
}

async fn analyze(config: &ClientConfig, args: AnalyzeArgs) -> Result<UiState, CliError> {
    let text = match (args.text, args.file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => read_stdin()?,
    };

    let transport = ReqwestTransport::new(config.timeouts)?;
    let client = AnalysisClient::new(transport, EnvKey::new(&config.api_key_env), &config.endpoint);
    let mut controller = Controller::new(TerminalView, Extractor::from_config(config));
    Ok(controller.run(&TextDocument::new(text), &client).await)
}

fn render_saved(input: &str) -> Result<UiState, CliError> {
    let raw = if input == "-" { read_stdin()? } else { std::fs::read_to_string(input)? };
    let payload = match serde_json::from_str::<Value>(&raw) {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::warn!(%error, "saved response is not JSON");
            None
        }
    };

    let mut view = TerminalView;
    match render(payload.as_ref()) {
        Ok(markup) => {
            view.set_result(markup);
            Ok(UiState::Result)
        }
        Err(failure) => {
            view.set_error(present(&failure));
            Ok(UiState::Error)
        }
    }
}

fn read_stdin() -> io::Result<String> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
