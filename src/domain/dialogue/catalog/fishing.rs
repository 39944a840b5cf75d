//! Fish farmer / fisher registration (pesca).

use crate::domain::dialogue::flow::{FlowDefinition, QuestionSpec};
use crate::domain::foundation::{DomainError, Sector};

use super::{FISHING_COLLECTION, FISHING_REGISTRATION};

const TERMINAL: &str = "Obrigado! Seu cadastro na Secretaria de Pesca foi concluído. \
Nossa equipe vai entrar em contato em breve.";

pub fn fishing_registration() -> Result<FlowDefinition, DomainError> {
    FlowDefinition::builder(FISHING_REGISTRATION, Sector::Pesca, FISHING_COLLECTION)
        .ask("pessoal", "nome", QuestionSpec::free_text("Qual o seu nome completo?"))
        .ask("pessoal", "cpf", QuestionSpec::free_text("Qual o seu CPF?"))
        .ask("pessoal", "telefone", QuestionSpec::free_text("Qual o seu telefone para contato?"))
        .ask("pessoal", "travessao", QuestionSpec::free_text("Em qual travessão você mora?"))
        .ask(
            "atividade",
            "tipo_atividade",
            QuestionSpec::choice(
                "Qual a sua atividade principal?",
                &["Piscicultura", "Pesca artesanal", "Outra"],
            ),
        )
        .ask(
            "atividade",
            "especie_principal",
            QuestionSpec::choice(
                "Qual a principal espécie criada ou pescada?",
                &["Tambaqui", "Tambatinga", "Matrinxã", "Curimatã", "Pirarucu", "Tilápia"],
            ),
        )
        .ask(
            "estrutura",
            "tipo_estrutura",
            QuestionSpec::choice(
                "Que tipo de estrutura você utiliza?",
                &["Viveiro escavado", "Açude", "Tanque", "Estrutura flutuante", "Nenhuma"],
            ),
        )
        .ask(
            "estrutura",
            "area_total_ha",
            QuestionSpec::numeric("Qual a área total de lâmina d'água, em hectares?"),
        )
        .ask(
            "estrutura",
            "recurso_hidrico",
            QuestionSpec::yes_no("Existe rio, igarapé ou nascente na propriedade?"),
        )
        .ask(
            "atividade",
            "assistencia_tecnica",
            QuestionSpec::yes_no("Você recebe assistência técnica?"),
        )
        .ask(
            "atividade",
            "observacoes",
            QuestionSpec::free_text("Quer deixar alguma observação para a equipe?"),
        )
        .finish(TERMINAL)
}
