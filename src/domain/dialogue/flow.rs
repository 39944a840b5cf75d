//! Flow definitions.
//!
//! A flow is an ordered list of self-describing questions followed by a
//! terminal thank-you message, plus the positional table that says which
//! record field each answer lands in. Stepping logic only ever asks the
//! definition about a position; it never hard-codes one.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::domain::foundation::{DomainError, ErrorCode, Sector};

/// Identifier of a question sequence, e.g. `rural-registration`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlowId(String);

impl FlowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FlowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Expected shape of an answer. Drives which chips are offered; answers
/// are never validated against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "labels", rename_all = "kebab-case")]
pub enum AnswerShape {
    FreeText,
    #[serde(rename = "boolean-yes-no")]
    YesNo,
    Enum(Vec<String>),
    Numeric,
}

/// One question of a flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSpec {
    pub prompt: String,
    pub shape: AnswerShape,
}

impl QuestionSpec {
    pub fn free_text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            shape: AnswerShape::FreeText,
        }
    }

    pub fn yes_no(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            shape: AnswerShape::YesNo,
        }
    }

    pub fn numeric(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            shape: AnswerShape::Numeric,
        }
    }

    /// A closed-choice question offering `labels` as chips.
    pub fn choice(prompt: impl Into<String>, labels: &[&str]) -> Self {
        Self {
            prompt: prompt.into(),
            shape: AnswerShape::Enum(labels.iter().map(|l| l.to_string()).collect()),
        }
    }
}

/// Maps the answer at `position` to `group.field` in the assembled record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    pub position: usize,
    pub group: String,
    pub field: String,
}

impl FieldMapping {
    pub fn new(position: usize, group: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            position,
            group: group.into(),
            field: field.into(),
        }
    }
}

/// A validated, linear question sequence for one sector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowDefinition {
    id: FlowId,
    sector: Sector,
    collection_key: String,
    questions: Vec<QuestionSpec>,
    terminal_message: String,
    mapping: Vec<FieldMapping>,
}

impl FlowDefinition {
    /// Creates a flow from its parts, validating the mapping table.
    ///
    /// # Errors
    ///
    /// `InvalidFlowDefinition` if the flow has no questions, a blank
    /// terminal message, an enum question without labels, or a mapping
    /// table that does not cover every question exactly once.
    pub fn new(
        id: FlowId,
        sector: Sector,
        collection_key: impl Into<String>,
        questions: Vec<QuestionSpec>,
        terminal_message: impl Into<String>,
        mapping: Vec<FieldMapping>,
    ) -> Result<Self, DomainError> {
        let flow = Self {
            id,
            sector,
            collection_key: collection_key.into(),
            questions,
            terminal_message: terminal_message.into(),
            mapping,
        };
        flow.validate()?;
        Ok(flow)
    }

    /// Starts a builder that declares each question together with its field.
    pub fn builder(id: &str, sector: Sector, collection_key: &str) -> FlowBuilder {
        FlowBuilder {
            id: FlowId::new(id),
            sector,
            collection_key: collection_key.to_string(),
            questions: Vec::new(),
            mapping: Vec::new(),
        }
    }

    pub fn id(&self) -> &FlowId {
        &self.id
    }

    pub fn sector(&self) -> Sector {
        self.sector
    }

    /// Sink collection every record of this flow is appended to.
    pub fn collection_key(&self) -> &str {
        &self.collection_key
    }

    pub fn questions(&self) -> &[QuestionSpec] {
        &self.questions
    }

    /// Returns the question at `index`, or `None` at or past the terminal.
    pub fn question(&self, index: usize) -> Option<&QuestionSpec> {
        self.questions.get(index)
    }

    pub fn first_prompt(&self) -> Option<&str> {
        self.questions.first().map(|q| q.prompt.as_str())
    }

    pub fn terminal_message(&self) -> &str {
        &self.terminal_message
    }

    pub fn mapping(&self) -> &[FieldMapping] {
        &self.mapping
    }

    /// Total entries including the terminal message.
    pub fn entry_count(&self) -> usize {
        self.questions.len() + 1
    }

    /// Position of the terminal message; reaching it closes the flow.
    pub fn terminal_position(&self) -> usize {
        self.questions.len()
    }

    /// Number of answers a completed flow has collected.
    pub fn expected_answers(&self) -> usize {
        self.entry_count() - 1
    }

    fn validate(&self) -> Result<(), DomainError> {
        let invalid = |reason: String| {
            DomainError::new(ErrorCode::InvalidFlowDefinition, reason)
                .with_detail("flow_id", self.id.as_str())
        };

        if self.id.as_str().trim().is_empty() {
            return Err(invalid("flow id cannot be empty".to_string()));
        }
        if self.collection_key.trim().is_empty() {
            return Err(invalid("collection key cannot be empty".to_string()));
        }
        if self.questions.is_empty() {
            return Err(invalid("flow needs at least one question".to_string()));
        }
        if self.terminal_message.trim().is_empty() {
            return Err(invalid("terminal message cannot be empty".to_string()));
        }

        for (index, question) in self.questions.iter().enumerate() {
            if question.prompt.trim().is_empty() {
                return Err(invalid(format!("question {} has an empty prompt", index)));
            }
            if let AnswerShape::Enum(labels) = &question.shape {
                if labels.is_empty() {
                    return Err(invalid(format!("enum question {} has no labels", index)));
                }
            }
        }

        let mut positions = HashSet::new();
        let mut fields = HashSet::new();
        for entry in &self.mapping {
            if entry.position >= self.questions.len() {
                return Err(invalid(format!(
                    "mapping {}.{} points at position {} past the last question",
                    entry.group, entry.field, entry.position
                )));
            }
            if entry.group.trim().is_empty() || entry.field.trim().is_empty() {
                return Err(invalid(format!(
                    "mapping at position {} has an empty group or field",
                    entry.position
                )));
            }
            if !positions.insert(entry.position) {
                return Err(invalid(format!("position {} is mapped twice", entry.position)));
            }
            if !fields.insert((entry.group.as_str(), entry.field.as_str())) {
                return Err(invalid(format!(
                    "field {}.{} is mapped twice",
                    entry.group, entry.field
                )));
            }
        }

        if positions.len() != self.questions.len() {
            let missing: Vec<String> = (0..self.questions.len())
                .filter(|p| !positions.contains(p))
                .map(|p| p.to_string())
                .collect();
            return Err(invalid(format!(
                "positions without a field: {}",
                missing.join(", ")
            )));
        }

        Ok(())
    }
}

/// Declares questions in order, each bound to its record field.
#[derive(Debug)]
pub struct FlowBuilder {
    id: FlowId,
    sector: Sector,
    collection_key: String,
    questions: Vec<QuestionSpec>,
    mapping: Vec<FieldMapping>,
}

impl FlowBuilder {
    /// Appends a question whose answer is stored at `group.field`.
    pub fn ask(mut self, group: &str, field: &str, question: QuestionSpec) -> Self {
        self.mapping
            .push(FieldMapping::new(self.questions.len(), group, field));
        self.questions.push(question);
        self
    }

    /// Closes the flow with its thank-you message and validates it.
    pub fn finish(self, terminal_message: &str) -> Result<FlowDefinition, DomainError> {
        FlowDefinition::new(
            self.id,
            self.sector,
            self.collection_key,
            self.questions,
            terminal_message,
            self.mapping,
        )
    }
}
