//! DialogueHost - the widget's command loop.
//!
//! The host owns exactly one session and processes widget commands one at a
//! time from an mpsc channel. UI elements talk to it through a cloneable
//! [`WidgetHandle`]; nothing else can reach the session.
//!
//! Record writes run as background tasks. Their outcomes come back into the
//! same loop, so a slow sink never holds up rendering or later commands.

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, info, warn};

use super::handlers::dialogue::{
    HandOffCommand, HandOffHandler, SubmitTurnCommand, SubmitTurnError, SubmitTurnHandler,
    WriteOutcome,
};
use crate::domain::dialogue::{DialogueEngine, DialogueSession, APOLOGY_MESSAGE};
use crate::domain::foundation::{DomainError, Sector};
use crate::ports::DisplaySurface;

/// Reply channel for a hand-off request.
pub type HandOffReply = oneshot::Sender<Result<&'static str, DomainError>>;

/// Everything a widget can ask of the host.
#[derive(Debug)]
pub enum WidgetCommand {
    /// Show the widget, optionally from a sector page.
    Open { sector: Option<Sector> },
    /// Text typed by the user or the value of a clicked chip.
    Submit { text: String },
    /// Move to the full web form; the route is sent back on `reply`.
    HandOff {
        sector: Option<Sector>,
        reply: Option<HandOffReply>,
    },
    /// Discard the session and stop the host.
    Close,
}

#[derive(Debug, Clone, Error)]
pub enum HostError {
    #[error("Dialogue host has stopped")]
    Closed,

    #[error("Hand-off failed: {0}")]
    HandOff(String),
}

/// Cloneable sender side of the host's command channel.
#[derive(Debug, Clone)]
pub struct WidgetHandle {
    sender: mpsc::Sender<WidgetCommand>,
}

impl WidgetHandle {
    pub async fn open(&self, sector: Option<Sector>) -> Result<(), HostError> {
        self.send(WidgetCommand::Open { sector }).await
    }

    pub async fn submit(&self, text: impl Into<String>) -> Result<(), HostError> {
        self.send(WidgetCommand::Submit { text: text.into() }).await
    }

    /// Requests a hand-off and waits for the form route.
    pub async fn hand_off(&self, sector: Option<Sector>) -> Result<&'static str, HostError> {
        let (tx, rx) = oneshot::channel();
        self.send(WidgetCommand::HandOff {
            sector,
            reply: Some(tx),
        })
        .await?;
        rx.await
            .map_err(|_| HostError::Closed)?
            .map_err(|e| HostError::HandOff(e.to_string()))
    }

    pub async fn close(&self) -> Result<(), HostError> {
        self.send(WidgetCommand::Close).await
    }

    async fn send(&self, command: WidgetCommand) -> Result<(), HostError> {
        self.sender
            .send(command)
            .await
            .map_err(|_| HostError::Closed)
    }
}

/// How long a stopping host waits for record writes still in flight.
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// Single-session command loop.
pub struct DialogueHost {
    session: DialogueSession,
    engine: Arc<DialogueEngine>,
    submit: SubmitTurnHandler,
    hand_off: HandOffHandler,
    display: Arc<dyn DisplaySurface>,
    commands: mpsc::Receiver<WidgetCommand>,
    writes: JoinSet<WriteOutcome>,
    shutdown_grace: Duration,
}

impl DialogueHost {
    /// Creates a host and the handle used to drive it.
    pub fn new(
        engine: Arc<DialogueEngine>,
        submit: SubmitTurnHandler,
        hand_off: HandOffHandler,
        display: Arc<dyn DisplaySurface>,
        buffer: usize,
    ) -> (Self, WidgetHandle) {
        let (sender, commands) = mpsc::channel(buffer.max(1));
        let host = Self {
            session: DialogueSession::new(),
            engine,
            submit,
            hand_off,
            display,
            commands,
            writes: JoinSet::new(),
            shutdown_grace: DEFAULT_SHUTDOWN_GRACE,
        };
        (host, WidgetHandle { sender })
    }

    pub fn with_shutdown_grace(mut self, grace: Duration) -> Self {
        self.shutdown_grace = grace;
        self
    }

    /// Processes commands until `Close` arrives or every handle is dropped,
    /// then waits up to the shutdown grace for pending record writes.
    ///
    /// Returns the session as it was when the loop stopped.
    pub async fn run(mut self) -> DialogueSession {
        info!(session_id = %self.session.id(), "Dialogue host started");

        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    None | Some(WidgetCommand::Close) => break,
                    Some(command) => {
                        self.process(command).await;
                        self.render().await;
                    }
                },
                Some(joined) = self.writes.join_next(), if !self.writes.is_empty() => {
                    if self.record_written(joined) {
                        self.render().await;
                    }
                }
            }
        }

        self.drain_writes().await;
        info!(session_id = %self.session.id(), "Dialogue host stopped");
        self.session
    }

    async fn process(&mut self, command: WidgetCommand) {
        match command {
            WidgetCommand::Open { sector } => {
                self.engine.open(&mut self.session, sector);
            }
            WidgetCommand::Submit { text } => {
                match self
                    .submit
                    .handle(&mut self.session, SubmitTurnCommand::new(text))
                {
                    Ok(result) => {
                        debug!(stage = ?result.stage, "Turn submitted");
                        if let Some(pending) = result.pending {
                            let write = self.submit.writer().write(self.session.id(), pending);
                            self.writes.spawn(write);
                        }
                    }
                    Err(SubmitTurnError::EmptyContent) => debug!("Ignoring blank input"),
                    Err(err) => warn!(error = %err, "Turn failed"),
                }
            }
            WidgetCommand::HandOff { sector, reply } => {
                let result = self
                    .hand_off
                    .handle(&self.session, HandOffCommand { sector })
                    .await
                    .map(|r| r.route);
                if let Err(err) = &result {
                    warn!(error = %err, "Hand-off failed");
                }
                if let Some(reply) = reply {
                    // The requester may have given up waiting.
                    let _ = reply.send(result);
                }
            }
            WidgetCommand::Close => {}
        }
    }

    /// Applies a finished write. Returns true if the transcript changed.
    fn record_written(&mut self, joined: Result<WriteOutcome, JoinError>) -> bool {
        let failed = match joined {
            Ok(outcome) => outcome.is_failure(),
            Err(err) => {
                warn!(error = %err, "Record write task did not finish");
                true
            }
        };
        if failed {
            self.session.push_bot(APOLOGY_MESSAGE);
        }
        failed
    }

    async fn drain_writes(&mut self) {
        if self.writes.is_empty() {
            return;
        }
        debug!(in_flight = self.writes.len(), "Waiting for record writes");

        let grace = self.shutdown_grace;
        let drained = tokio::time::timeout(grace, async {
            while let Some(joined) = self.writes.join_next().await {
                if self.record_written(joined) {
                    self.render().await;
                }
            }
        })
        .await;

        if drained.is_err() {
            warn!(
                abandoned = self.writes.len(),
                "Stopping with record writes still pending"
            );
            self.writes.abort_all();
        }
    }

    async fn render(&self) {
        if let Err(err) = self
            .display
            .render(self.session.transcript(), self.session.suggestion_set())
            .await
        {
            warn!(error = %err, "Failed to render conversation");
        }
    }
}
