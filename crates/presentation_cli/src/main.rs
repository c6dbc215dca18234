//! VoxShell CLI
//!
//! Terminal shell for the voice assistant: mic toggle, transcript panel,
//! theme and font controls, with typed or scripted utterances standing in
//! for the platform microphone.

#![allow(clippy::print_stdout)]

mod shell;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use application::IntentDispatcher;
use application::session::SessionService;
use clap::Parser;
use infrastructure::{
    AppConfig, RecognizerAdapter, SynthesizerAdapter, bridge_recognizer_events, init_telemetry,
};
use speech::{ConsoleSynthesizer, ScriptedRecognizer, TypedRecognizer};

use crate::shell::{Shell, VoiceInput};

/// VoxShell CLI
#[derive(Parser)]
#[command(name = "voxshell")]
#[command(author, version, about = "VoxShell voice assistant shell", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (defaults to ./config.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Play back scripted utterances from this file, one per line
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Override the thinking delay in milliseconds
    #[arg(long)]
    thinking_delay_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config =
        AppConfig::load_with(cli.config.as_deref()).context("loading configuration")?;
    if let Some(delay) = cli.thinking_delay_ms {
        config.session.thinking_delay_ms = delay;
    }

    init_telemetry(&config.log_format, cli.verbose)?;

    let prefs = config.ui.to_preferences()?;
    let settings = config.session.to_settings();

    let (input, provider_events) = match &cli.script {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("reading script {}", path.display()))?;
            let script: Vec<String> = contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect();
            let (recognizer, events) = ScriptedRecognizer::new(config.speech.clone(), script)?;
            (VoiceInput::Scripted(recognizer), events)
        },
        None => {
            let (recognizer, events) = TypedRecognizer::new(config.speech.clone())?;
            (VoiceInput::Typed(recognizer), events)
        },
    };

    let synthesizer = Arc::new(ConsoleSynthesizer::new(&config.speech));
    let (service, event_rx) = SessionService::new(
        Arc::new(RecognizerAdapter::new(input.recognizer())),
        Arc::new(SynthesizerAdapter::new(synthesizer)),
        IntentDispatcher::new(),
        prefs,
        settings,
    );
    service.spawn_recognition_forwarder(bridge_recognizer_events(provider_events));
    tokio::spawn(Arc::clone(&service).run(event_rx));

    Shell::new(service, input).run().await
}
