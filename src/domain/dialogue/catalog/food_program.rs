//! Food procurement programme interest (PAA).

use crate::domain::dialogue::flow::{FlowDefinition, QuestionSpec};
use crate::domain::foundation::{DomainError, Sector};

use super::{FOOD_PROGRAM_COLLECTION, FOOD_PROGRAM_REGISTRATION};

const TERMINAL: &str = "Obrigado! Seu interesse no PAA foi registrado. \
A coordenação do programa vai entrar em contato.";

pub fn food_program_registration() -> Result<FlowDefinition, DomainError> {
    FlowDefinition::builder(FOOD_PROGRAM_REGISTRATION, Sector::Paa, FOOD_PROGRAM_COLLECTION)
        .ask("pessoal", "nome", QuestionSpec::free_text("Qual o seu nome completo?"))
        .ask("pessoal", "cpf", QuestionSpec::free_text("Qual o seu CPF?"))
        .ask("pessoal", "telefone", QuestionSpec::free_text("Qual o seu telefone para contato?"))
        .ask("produtor", "dap_caf", QuestionSpec::yes_no("Você possui DAP ou CAF?"))
        .ask("produtor", "localidade", QuestionSpec::free_text("Em qual localidade você produz?"))
        .ask(
            "produtor",
            "produtos",
            QuestionSpec::free_text("Quais produtos você gostaria de fornecer?"),
        )
        .ask(
            "interesse",
            "quantidade_estimada_kg",
            QuestionSpec::numeric("Qual a quantidade estimada por mês, em kg?"),
        )
        .ask(
            "interesse",
            "interesse",
            QuestionSpec::choice(
                "Qual o seu interesse no programa?",
                &["Vender para o PAA", "Receber mais informações"],
            ),
        )
        .finish(TERMINAL)
}
