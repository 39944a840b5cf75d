//! HandOff - Command handler for moving the user to the full web form.
//!
//! Captures the tail of the conversation plus any CPF, phone or name the
//! user already typed, writes it where the form will look for it, and
//! returns the form's route. The session itself is left untouched.

use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::dialogue::{DialogueEngine, DialogueSession, HandoffSnapshot};
use crate::domain::foundation::{DomainError, Sector};
use crate::ports::{GeolocationProvider, HandoffStore};

/// Command to hand the conversation off to a web form.
#[derive(Debug, Clone, Default)]
pub struct HandOffCommand {
    /// Form to open. Falls back to the session's context when absent.
    pub sector: Option<Sector>,
}

/// Result of a successful hand-off.
#[derive(Debug, Clone)]
pub struct HandOffResult {
    pub route: &'static str,
    pub snapshot: HandoffSnapshot,
}

/// Settings for building snapshots.
#[derive(Debug, Clone, Copy)]
pub struct HandOffSettings {
    /// Number of transcript entries copied into the snapshot.
    pub tail_len: usize,
    /// Sector used when nothing in the session points to one.
    pub default_sector: Sector,
}

impl Default for HandOffSettings {
    fn default() -> Self {
        Self {
            tail_len: 10,
            default_sector: Sector::Agricultura,
        }
    }
}

/// Handler for HandOff commands.
pub struct HandOffHandler {
    engine: Arc<DialogueEngine>,
    store: Arc<dyn HandoffStore>,
    geolocation: Option<Arc<dyn GeolocationProvider>>,
    settings: HandOffSettings,
}

impl HandOffHandler {
    pub fn new(
        engine: Arc<DialogueEngine>,
        store: Arc<dyn HandoffStore>,
        settings: HandOffSettings,
    ) -> Self {
        Self {
            engine,
            store,
            geolocation: None,
            settings,
        }
    }

    pub fn with_geolocation(mut self, provider: Arc<dyn GeolocationProvider>) -> Self {
        self.geolocation = Some(provider);
        self
    }

    pub async fn handle(
        &self,
        session: &DialogueSession,
        cmd: HandOffCommand,
    ) -> Result<HandOffResult, DomainError> {
        let sector = self.resolve_sector(session, cmd.sector);

        let location = match &self.geolocation {
            Some(provider) => match provider.current_position().await {
                Ok(point) => Some(point),
                Err(reason) => {
                    debug!(%reason, "Position unavailable for hand-off");
                    None
                }
            },
            None => None,
        };

        let snapshot = HandoffSnapshot::capture(session, sector, self.settings.tail_len, location);
        self.store.write_snapshot(&snapshot).await?;

        info!(
            session_id = %session.id(),
            sector = %sector,
            hints = snapshot.extracted_hints.len(),
            "Conversation handed off to web form"
        );

        Ok(HandOffResult {
            route: snapshot.form_route(),
            snapshot,
        })
    }

    /// Explicit choice > running flow > sector the widget was opened on >
    /// configured default.
    fn resolve_sector(&self, session: &DialogueSession, requested: Option<Sector>) -> Sector {
        requested
            .or_else(|| {
                session
                    .active_flow()
                    .and_then(|id| self.engine.catalog().get(id))
                    .map(|flow| flow.sector())
            })
            .or(session.preferred_sector())
            .unwrap_or(self.settings.default_sector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ErrorCode, GeoPoint};
    use crate::ports::{GeolocationUnavailable, HandoffError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockHandoffStore {
        written: Mutex<Vec<HandoffSnapshot>>,
        should_fail: bool,
    }

    impl MockHandoffStore {
        fn new() -> Self {
            Self {
                written: Mutex::new(Vec::new()),
                should_fail: false,
            }
        }
    }

    #[async_trait]
    impl HandoffStore for MockHandoffStore {
        async fn write_snapshot(&self, snapshot: &HandoffSnapshot) -> Result<(), HandoffError> {
            if self.should_fail {
                return Err(HandoffError::IoError("read-only".to_string()));
            }
            self.written.lock().unwrap().push(snapshot.clone());
            Ok(())
        }
    }

    struct DeniedGeolocation;

    #[async_trait]
    impl GeolocationProvider for DeniedGeolocation {
        async fn current_position(&self) -> Result<GeoPoint, GeolocationUnavailable> {
            Err(GeolocationUnavailable::PermissionDenied)
        }
    }

    fn engine() -> Arc<DialogueEngine> {
        Arc::new(DialogueEngine::standard().unwrap())
    }

    fn handler(store: Arc<MockHandoffStore>) -> HandOffHandler {
        HandOffHandler::new(engine(), store, HandOffSettings::default())
    }

    #[tokio::test]
    async fn test_hand_off_writes_snapshot_and_returns_route() {
        let store = Arc::new(MockHandoffStore::new());
        let handler = handler(store.clone());
        let mut session = DialogueSession::new();
        session.push_user("meu telefone é (94) 99123-4567");

        let result = handler
            .handle(&session, HandOffCommand { sector: Some(Sector::Pesca) })
            .await
            .unwrap();

        assert_eq!(result.route, "/forms/pesca");
        let written = store.written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(
            written[0].extracted_hints.get("telefone").map(String::as_str),
            Some("(94) 99123-4567")
        );
    }

    #[tokio::test]
    async fn test_hand_off_uses_running_flow_sector() {
        let store = Arc::new(MockHandoffStore::new());
        let handler = handler(store);
        let engine = engine();
        let mut session = DialogueSession::new();
        engine.handle_input(&mut session, "cadastro do paa").unwrap();

        let result = handler
            .handle(&session, HandOffCommand::default())
            .await
            .unwrap();

        assert_eq!(result.route, "/forms/paa");
        assert!(result.snapshot.flow_id.is_some());
    }

    #[tokio::test]
    async fn test_hand_off_falls_back_to_preferred_then_default() {
        let store = Arc::new(MockHandoffStore::new());
        let handler = handler(store);

        let mut session = DialogueSession::new();
        let result = handler
            .handle(&session, HandOffCommand::default())
            .await
            .unwrap();
        assert_eq!(result.route, "/forms/agricultura-completo");

        session.set_preferred_sector(Some(Sector::Pesca));
        let result = handler
            .handle(&session, HandOffCommand::default())
            .await
            .unwrap();
        assert_eq!(result.route, "/forms/pesca");
    }

    #[tokio::test]
    async fn test_hand_off_leaves_session_unchanged() {
        let store = Arc::new(MockHandoffStore::new());
        let handler = handler(store);
        let engine = engine();
        let mut session = DialogueSession::new();
        engine.handle_input(&mut session, "cadastro").unwrap();
        let before = session.clone();

        handler
            .handle(&session, HandOffCommand::default())
            .await
            .unwrap();

        assert_eq!(session, before);
    }

    #[tokio::test]
    async fn test_hand_off_without_position_omits_location() {
        let store = Arc::new(MockHandoffStore::new());
        let handler = handler(store).with_geolocation(Arc::new(DeniedGeolocation));
        let session = DialogueSession::new();

        let result = handler
            .handle(&session, HandOffCommand::default())
            .await
            .unwrap();

        assert!(result.snapshot.user_location.is_none());
    }

    #[tokio::test]
    async fn test_hand_off_store_failure_is_reported() {
        let store = Arc::new(MockHandoffStore {
            should_fail: true,
            ..MockHandoffStore::new()
        });
        let handler = handler(store);

        let err = handler
            .handle(&DialogueSession::new(), HandOffCommand::default())
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::HandoffWrite);
    }
}
