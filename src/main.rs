//! Terminal host for the registration assistant.
//!
//! Reads one line per turn from stdin. Lines starting with `/` are widget
//! actions:
//!
//! - `/abrir [setor]` opens the widget, optionally from a sector page
//! - `/formulario [setor]` hands the conversation off to the web form
//! - `/sair` closes the widget
//!
//! Everything else is submitted as user input.

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

use cadastro_assistant::adapters::{
    FileHandoffStore, FileRecordSink, FixedGeolocation, InMemoryRecordSink, TerminalDisplay,
};
use cadastro_assistant::application::{
    DialogueHost, HandOffHandler, HandOffSettings, SubmitTurnHandler, WidgetHandle,
};
use cadastro_assistant::config::{AppConfig, SinkBackend};
use cadastro_assistant::domain::dialogue::DialogueEngine;
use cadastro_assistant::domain::foundation::Sector;
use cadastro_assistant::ports::{GeolocationProvider, RecordSink};

enum Line {
    Open(Option<Sector>),
    Form(Option<Sector>),
    Quit,
    Text(String),
    Unknown(String),
}

fn parse_line(line: &str) -> Line {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix('/') else {
        return Line::Text(line.to_string());
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let sector = parts.next().and_then(|s| s.parse::<Sector>().ok());

    match name {
        "abrir" => Line::Open(sector),
        "formulario" => Line::Form(sector),
        "sair" => Line::Quit,
        other => Line::Unknown(other.to_string()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.logging.init_tracing();
    config.validate()?;

    let engine = Arc::new(DialogueEngine::standard()?);

    let sink: Arc<dyn RecordSink> = match config.storage.sink_backend {
        SinkBackend::Memory => Arc::new(InMemoryRecordSink::new()),
        SinkBackend::File => Arc::new(FileRecordSink::new(&config.storage.data_dir)),
    };
    let store = Arc::new(FileHandoffStore::new(&config.storage.handoff_path));
    let settings = HandOffSettings {
        tail_len: config.dialogue.transcript_tail_len,
        default_sector: config.dialogue.default_sector,
    };

    let mut submit = SubmitTurnHandler::new(engine.clone(), sink);
    let mut hand_off = HandOffHandler::new(engine.clone(), store, settings);
    if let Some(position) = config.geolocation.position() {
        let provider: Arc<dyn GeolocationProvider> = Arc::new(FixedGeolocation::at(position));
        submit = submit.with_geolocation(provider.clone());
        hand_off = hand_off.with_geolocation(provider);
    }

    let (host, handle) = DialogueHost::new(
        engine,
        submit,
        hand_off,
        Arc::new(TerminalDisplay::new()),
        config.dialogue.command_buffer,
    );
    let host = host.with_shutdown_grace(Duration::from_millis(config.dialogue.shutdown_grace_ms));
    let host_task = tokio::spawn(host.run());

    handle.open(None).await?;
    read_stdin(&handle, config.features.verbose_errors).await?;
    // The host may already be gone if stdin closed mid-command.
    let _ = handle.close().await;

    host_task.await?;
    Ok(())
}

async fn read_stdin(handle: &WidgetHandle, verbose_errors: bool) -> Result<(), Box<dyn Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Line::Open(sector) => handle.open(sector).await?,
            Line::Form(sector) => match handle.hand_off(sector).await {
                Ok(route) => println!("Abrindo formulário: {}", route),
                Err(err) if verbose_errors => eprintln!("Erro ao abrir formulário: {}", err),
                Err(_) => eprintln!("Não foi possível abrir o formulário."),
            },
            Line::Quit => break,
            Line::Text(text) => handle.submit(text).await?,
            Line::Unknown(name) => {
                eprintln!("Comando desconhecido: /{} (use /abrir, /formulario ou /sair)", name)
            }
        }
    }
    Ok(())
}
