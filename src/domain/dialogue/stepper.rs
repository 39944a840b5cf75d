//! Sequence stepper.
//!
//! Consumes one answer per turn while a flow is running. Strictly linear:
//! the answer is stored verbatim and never influences which question comes
//! next.

use super::flow::{AnswerShape, FlowDefinition, QuestionSpec};
use super::message::{yes_no_suggestions, Suggestion};
use super::session::DialogueSession;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Result of one stepping turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The flow continues with the question at `index`.
    Prompt {
        index: usize,
        text: String,
        suggestions: Vec<Suggestion>,
    },
    /// The terminal position was reached; the session is back in freeform.
    Completed {
        terminal: String,
        answers: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceStepper;

impl SequenceStepper {
    /// Chips offered for a question, derived from its shape.
    pub fn suggestions_for(question: &QuestionSpec) -> Vec<Suggestion> {
        match &question.shape {
            AnswerShape::YesNo => yes_no_suggestions(),
            AnswerShape::Enum(labels) => labels.iter().map(Suggestion::labelled).collect(),
            AnswerShape::FreeText | AnswerShape::Numeric => Vec::new(),
        }
    }

    /// Prompt for the question the session is currently waiting on.
    pub fn current_prompt(
        session: &DialogueSession,
        flow: &FlowDefinition,
    ) -> Result<StepOutcome, DomainError> {
        let index = session.stage().question_index().ok_or_else(|| {
            DomainError::new(ErrorCode::InvalidStateTransition, "No question is pending")
        })?;
        Self::prompt_at(flow, index)
    }

    /// Stores `answer` and moves to the next question or the terminal.
    ///
    /// # Errors
    ///
    /// `InvalidStateTransition` when the session is not running `flow`.
    pub fn step(
        session: &mut DialogueSession,
        flow: &FlowDefinition,
        answer: &str,
    ) -> Result<StepOutcome, DomainError> {
        if session.active_flow() != Some(flow.id()) {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Session is not running flow '{}'", flow.id()),
            )
            .with_detail("flow_id", flow.id().as_str()));
        }

        let next = session.record_answer(answer)?;
        if next >= flow.terminal_position() {
            let answers = session.finish_flow()?;
            return Ok(StepOutcome::Completed {
                terminal: flow.terminal_message().to_string(),
                answers,
            });
        }
        Self::prompt_at(flow, next)
    }

    fn prompt_at(flow: &FlowDefinition, index: usize) -> Result<StepOutcome, DomainError> {
        let question = flow.question(index).ok_or_else(|| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Flow '{}' has no question {}", flow.id(), index),
            )
        })?;
        Ok(StepOutcome::Prompt {
            index,
            text: question.prompt.clone(),
            suggestions: Self::suggestions_for(question),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dialogue::stage::Stage;
    use crate::domain::foundation::Sector;
    use proptest::prelude::*;

    fn small_flow() -> FlowDefinition {
        FlowDefinition::builder("tiny", Sector::Pesca, "solicitacoes_pesca")
            .ask("pessoal", "nome", QuestionSpec::free_text("Qual o seu nome?"))
            .ask(
                "atividade",
                "cria_peixe",
                QuestionSpec::yes_no("Você cria peixe?"),
            )
            .ask(
                "atividade",
                "especie",
                QuestionSpec::choice("Qual espécie?", &["Tambaqui", "Tilápia"]),
            )
            .finish("Obrigado!")
            .unwrap()
    }

    fn started(flow: &FlowDefinition) -> DialogueSession {
        let mut session = DialogueSession::new();
        session.start_flow(flow.id().clone()).unwrap();
        session
    }

    mod chips {
        use super::*;

        #[test]
        fn yes_no_offers_sim_and_nao() {
            let chips = SequenceStepper::suggestions_for(&QuestionSpec::yes_no("?"));
            let labels: Vec<_> = chips.iter().map(|s| s.label.as_str()).collect();
            assert_eq!(labels, vec!["Sim", "Não"]);
        }

        #[test]
        fn enum_offers_its_labels() {
            let chips =
                SequenceStepper::suggestions_for(&QuestionSpec::choice("?", &["A", "B", "C"]));
            assert_eq!(chips.len(), 3);
            assert_eq!(chips[2], Suggestion::labelled("C"));
        }

        #[test]
        fn free_text_and_numeric_offer_nothing() {
            assert!(SequenceStepper::suggestions_for(&QuestionSpec::free_text("?")).is_empty());
            assert!(SequenceStepper::suggestions_for(&QuestionSpec::numeric("?")).is_empty());
        }
    }

    mod stepping {
        use super::*;

        #[test]
        fn current_prompt_is_first_question_after_start() {
            let flow = small_flow();
            let session = started(&flow);
            let outcome = SequenceStepper::current_prompt(&session, &flow).unwrap();
            assert_eq!(
                outcome,
                StepOutcome::Prompt {
                    index: 0,
                    text: "Qual o seu nome?".to_string(),
                    suggestions: vec![]
                }
            );
        }

        #[test]
        fn answer_advances_to_next_prompt_with_chips() {
            let flow = small_flow();
            let mut session = started(&flow);

            let outcome = SequenceStepper::step(&mut session, &flow, "Maria").unwrap();
            match outcome {
                StepOutcome::Prompt {
                    index, suggestions, ..
                } => {
                    assert_eq!(index, 1);
                    assert_eq!(suggestions, yes_no_suggestions());
                }
                other => panic!("expected prompt, got {:?}", other),
            }
            assert_eq!(session.stage(), Stage::Sequence(1));
        }

        #[test]
        fn unexpected_answer_on_yes_no_still_advances() {
            let flow = small_flow();
            let mut session = started(&flow);
            SequenceStepper::step(&mut session, &flow, "Maria").unwrap();

            SequenceStepper::step(&mut session, &flow, "talvez").unwrap();
            assert_eq!(session.stage(), Stage::Sequence(2));
            assert_eq!(session.collected_answers()[1], "talvez");
        }

        #[test]
        fn last_answer_completes_and_resets() {
            let flow = small_flow();
            let mut session = started(&flow);
            SequenceStepper::step(&mut session, &flow, "Maria").unwrap();
            SequenceStepper::step(&mut session, &flow, "Sim").unwrap();

            let outcome = SequenceStepper::step(&mut session, &flow, "Tambaqui").unwrap();
            assert_eq!(
                outcome,
                StepOutcome::Completed {
                    terminal: "Obrigado!".to_string(),
                    answers: vec!["Maria".into(), "Sim".into(), "Tambaqui".into()],
                }
            );
            assert_eq!(session.stage(), Stage::Freeform);
            assert!(session.active_flow().is_none());
            assert!(session.collected_answers().is_empty());
        }

        #[test]
        fn stepping_a_different_flow_is_rejected() {
            let flow = small_flow();
            let mut session = DialogueSession::new();
            let err = SequenceStepper::step(&mut session, &flow, "Maria").unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidStateTransition);
            assert!(session.collected_answers().is_empty());
        }
    }

    proptest! {
        #[test]
        fn stage_never_moves_backwards_mid_flow(answers in prop::collection::vec(".*", 0..3)) {
            let flow = small_flow();
            let mut session = started(&flow);
            let mut previous = 0usize;

            for answer in &answers {
                SequenceStepper::step(&mut session, &flow, answer).unwrap();
                let current = session.stage().question_index().unwrap();
                prop_assert_eq!(current, previous + 1);
                previous = current;
            }
            prop_assert_eq!(session.collected_answers().len(), answers.len());
        }
    }
}
