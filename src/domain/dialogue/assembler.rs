//! Record assembler.
//!
//! Turns the positional answers of a completed flow into the grouped record
//! the admin dashboard expects, using the flow's declared field mapping.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use super::flow::{FlowDefinition, FlowId};
use crate::domain::foundation::{DomainError, ErrorCode, GeoPoint, Sector, SessionId, Timestamp};

/// Review status every new request starts in.
pub const STATUS_PENDING: &str = "pendente";

/// Marks records captured by the chat assistant rather than a web form.
pub const ORIGIN_CHATBOT: &str = "chatbot";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblyError {
    #[error("Flow '{flow}' expected {expected} answers but got {actual}")]
    IncompleteSequence {
        flow: FlowId,
        expected: usize,
        actual: usize,
    },
}

impl From<AssemblyError> for DomainError {
    fn from(err: AssemblyError) -> Self {
        match &err {
            AssemblyError::IncompleteSequence {
                flow,
                expected,
                actual,
            } => DomainError::new(ErrorCode::IncompleteSequence, err.to_string())
                .with_detail("flow_id", flow.as_str())
                .with_detail("expected", expected.to_string())
                .with_detail("actual", actual.to_string()),
        }
    }
}

/// Durable output of a completed flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssembledRecord {
    pub flow_id: FlowId,
    pub sector: Sector,
    pub session_id: SessionId,
    /// group -> field -> raw answer.
    #[serde(flatten)]
    pub groups: BTreeMap<String, BTreeMap<String, String>>,
    pub status: String,
    pub origem: String,
    pub captured_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub localizacao: Option<GeoPoint>,
}

impl AssembledRecord {
    pub fn group(&self, group: &str) -> Option<&BTreeMap<String, String>> {
        self.groups.get(group)
    }

    /// Looks up one answer by `group` and `field`.
    pub fn field(&self, group: &str, field: &str) -> Option<&str> {
        self.groups
            .get(group)
            .and_then(|g| g.get(field))
            .map(String::as_str)
    }

    pub fn with_location(mut self, location: Option<GeoPoint>) -> Self {
        self.localizacao = location;
        self
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RecordAssembler;

impl RecordAssembler {
    /// Builds the record for `flow` from exactly `flow.expected_answers()`
    /// answers.
    ///
    /// # Errors
    ///
    /// `IncompleteSequence` when the answer count does not match.
    pub fn assemble(
        flow: &FlowDefinition,
        answers: &[String],
        session_id: SessionId,
        captured_at: Timestamp,
    ) -> Result<AssembledRecord, AssemblyError> {
        if answers.len() != flow.expected_answers() {
            return Err(AssemblyError::IncompleteSequence {
                flow: flow.id().clone(),
                expected: flow.expected_answers(),
                actual: answers.len(),
            });
        }

        let mut groups: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
        for mapping in flow.mapping() {
            // Mapping positions are validated against the question count.
            if let Some(answer) = answers.get(mapping.position) {
                groups
                    .entry(mapping.group.clone())
                    .or_default()
                    .insert(mapping.field.clone(), answer.clone());
            }
        }

        Ok(AssembledRecord {
            flow_id: flow.id().clone(),
            sector: flow.sector(),
            session_id,
            groups,
            status: STATUS_PENDING.to_string(),
            origem: ORIGIN_CHATBOT.to_string(),
            captured_at,
            localizacao: None,
        })
    }
}
