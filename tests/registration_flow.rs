//! Integration tests for the registration assistant.
//!
//! These tests drive the public API end to end:
//! 1. A widget handle sends commands to the dialogue host
//! 2. The engine selects and steps through a registration flow
//! 3. The completed record is written in the background to a sink
//!    (in-memory or YAML files)
//! 4. A hand-off writes the conversation context for the web form
//!
//! Uses in-memory and temp-dir adapters so no external services are needed.

use std::sync::Arc;
use tempfile::TempDir;

use cadastro_assistant::adapters::{
    FileHandoffStore, FileRecordSink, FixedGeolocation, InMemoryHandoffStore,
    InMemoryRecordSink, RecordingDisplay,
};
use cadastro_assistant::application::{
    DialogueHost, HandOffHandler, HandOffSettings, SubmitTurnCommand, SubmitTurnHandler,
    WriteOutcome,
};
use cadastro_assistant::domain::dialogue::{
    catalog::{AGRICULTURE_COLLECTION, FISHING_COLLECTION},
    AssembledRecord, DialogueEngine, DialogueSession, HandoffSnapshot, Stage,
};
use cadastro_assistant::domain::foundation::{GeoPoint, Sector};
use cadastro_assistant::ports::RecordSink;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn engine() -> Arc<DialogueEngine> {
    Arc::new(DialogueEngine::standard().expect("standard catalog is valid"))
}

fn rural_answers() -> Vec<String> {
    let mut answers: Vec<String> = (1..31).map(|i| format!("resposta {}", i)).collect();
    answers.insert(0, "Sítio Boa Esperança".to_string());
    answers
}

// =============================================================================
// Turn handler with sinks
// =============================================================================

#[tokio::test]
async fn rural_registration_produces_one_record() {
    let sink = Arc::new(InMemoryRecordSink::new());
    let handler = SubmitTurnHandler::new(engine(), sink.clone());
    let mut session = DialogueSession::new();

    let first = handler
        .handle(&mut session, SubmitTurnCommand::new("quero fazer um cadastro"))
        .unwrap();
    assert_eq!(first.stage, Stage::Sequence(0));
    assert_eq!(first.replies, vec!["Qual o nome da propriedade?".to_string()]);
    assert!(session.suggestion_set().is_empty());

    let mut outcomes = Vec::new();
    for answer in rural_answers() {
        let result = handler
            .handle(&mut session, SubmitTurnCommand::new(answer))
            .unwrap();
        if let Some(pending) = result.pending {
            outcomes.push(handler.writer().write(session.id(), pending).await);
        }
    }

    assert_eq!(outcomes.len(), 1);
    assert!(matches!(outcomes[0], WriteOutcome::Stored { .. }));
    let records = sink.records(AGRICULTURE_COLLECTION).await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].field("propriedade", "nome"), Some("Sítio Boa Esperança"));
    assert_eq!(records[0].status, "pendente");
    assert_eq!(session.stage(), Stage::Freeform);
}

#[tokio::test]
async fn partial_registration_persists_nothing() {
    let sink = Arc::new(InMemoryRecordSink::new());
    let handler = SubmitTurnHandler::new(engine(), sink.clone());
    let mut session = DialogueSession::new();

    handler
        .handle(&mut session, SubmitTurnCommand::new("cadastro"))
        .unwrap();
    for answer in rural_answers().into_iter().take(12) {
        let result = handler
            .handle(&mut session, SubmitTurnCommand::new(answer))
            .unwrap();
        assert!(result.pending.is_none());
    }

    assert_eq!(session.stage(), Stage::Sequence(12));
    assert_eq!(sink.record_count().await, 0);
}

#[tokio::test]
async fn fishing_registration_writes_yaml_with_location() {
    let temp_dir = TempDir::new().unwrap();
    let sink = Arc::new(FileRecordSink::new(temp_dir.path()));
    let position = GeoPoint::new(-3.2041, -52.2111).unwrap();
    let handler = SubmitTurnHandler::new(engine(), sink as Arc<dyn RecordSink>)
        .with_geolocation(Arc::new(FixedGeolocation::at(position)));
    let mut session = DialogueSession::new();

    handler
        .handle(&mut session, SubmitTurnCommand::new("pesca"))
        .unwrap();
    handler
        .handle(&mut session, SubmitTurnCommand::new("Sim"))
        .unwrap();

    let mut pending = None;
    let mut turns = 0;
    while pending.is_none() {
        turns += 1;
        assert!(turns < 100, "fishing flow never completed");
        let result = handler
            .handle(&mut session, SubmitTurnCommand::new(format!("r{}", turns)))
            .unwrap();
        pending = result.pending;
    }
    let outcome = handler
        .writer()
        .write(session.id(), pending.unwrap())
        .await;
    assert!(!outcome.is_failure());

    let dir = temp_dir.path().join(FISHING_COLLECTION);
    let files: Vec<_> = std::fs::read_dir(&dir).unwrap().collect();
    assert_eq!(files.len(), 1);

    let yaml = std::fs::read_to_string(files[0].as_ref().unwrap().path()).unwrap();
    let record: AssembledRecord = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(record.sector, Sector::Pesca);
    assert_eq!(record.localizacao, Some(position));
    assert_eq!(record.origem, "chatbot");
}

// =============================================================================
// Host command loop
// =============================================================================

#[tokio::test]
async fn host_runs_a_registration_and_hands_off() {
    let engine = engine();
    let sink = Arc::new(InMemoryRecordSink::new());
    let store = Arc::new(InMemoryHandoffStore::new());
    let display = Arc::new(RecordingDisplay::new());

    let submit = SubmitTurnHandler::new(engine.clone(), sink.clone());
    let hand_off = HandOffHandler::new(engine.clone(), store.clone(), HandOffSettings::default());
    let (host, handle) = DialogueHost::new(engine, submit, hand_off, display.clone(), 16);
    let task = tokio::spawn(host.run());

    handle.open(Some(Sector::Agricultura)).await.unwrap();
    handle.submit("oi, me chamo Raimundo Nonato").await.unwrap();
    handle.submit("quero fazer meu cadastro").await.unwrap();
    handle.submit("Sítio Santa Luzia").await.unwrap();
    let route = handle.hand_off(None).await.unwrap();
    handle.close().await.unwrap();
    let session = task.await.unwrap();

    assert_eq!(route, "/forms/agricultura-completo");
    assert_eq!(session.stage(), Stage::Sequence(1));

    let snapshot = store.latest().await.unwrap();
    assert_eq!(
        snapshot.extracted_hints.get("nome").map(String::as_str),
        Some("Raimundo Nonato")
    );
    assert_eq!(snapshot.flow_id.map(|f| f.to_string()).as_deref(), Some("rural-registration"));

    let last = display.last_frame().await.unwrap();
    assert_eq!(last.transcript.len(), session.transcript().len());
    assert_eq!(sink.record_count().await, 0);
}

#[tokio::test]
async fn file_handoff_matches_browser_context_shape() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("chat_context.json");
    let store = Arc::new(FileHandoffStore::new(&path));
    let handler = HandOffHandler::new(
        engine(),
        store,
        HandOffSettings {
            tail_len: 2,
            default_sector: Sector::Paa,
        },
    );

    let mut session = DialogueSession::new();
    session.push_user("meu cpf é 123.456.789-09");
    session.push_bot("Obrigado!");
    session.push_user("telefone (94) 3421-1234");

    handler
        .handle(&session, Default::default())
        .await
        .unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["setor"], "paa");
    assert_eq!(json["ultimasMensagens"].as_array().unwrap().len(), 2);
    assert_eq!(json["dadosParciais"]["cpf"], "123.456.789-09");
    assert_eq!(json["dadosParciais"]["telefone"], "(94) 3421-1234");

    let snapshot: HandoffSnapshot = serde_json::from_value(json).unwrap();
    assert_eq!(snapshot.form_route(), "/forms/paa");
}
