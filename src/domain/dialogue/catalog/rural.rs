//! Rural producer registration (agricultura).

use crate::domain::dialogue::flow::{FlowDefinition, QuestionSpec};
use crate::domain::foundation::{DomainError, Sector};

use super::{AGRICULTURE_COLLECTION, RURAL_REGISTRATION};

const TERMINAL: &str = "Obrigado! Seu cadastro de produtor rural foi concluído. \
A Secretaria de Agricultura vai analisar sua solicitação e entrar em contato.";

/// 31 questions followed by the thank-you message.
pub fn rural_registration() -> Result<FlowDefinition, DomainError> {
    FlowDefinition::builder(RURAL_REGISTRATION, Sector::Agricultura, AGRICULTURE_COLLECTION)
        // Dados da propriedade
        .ask("propriedade", "nome", QuestionSpec::free_text("Qual o nome da propriedade?"))
        .ask(
            "propriedade",
            "tipo_pessoa",
            QuestionSpec::choice(
                "A propriedade está registrada como pessoa física ou jurídica?",
                &["Pessoa Física", "Pessoa Jurídica"],
            ),
        )
        .ask("propriedade", "endereco", QuestionSpec::free_text("Qual o endereço da propriedade?"))
        .ask(
            "propriedade",
            "travessao",
            QuestionSpec::free_text("Em qual travessão a propriedade fica?"),
        )
        .ask(
            "propriedade",
            "tamanho_ha",
            QuestionSpec::numeric("Qual o tamanho da propriedade, em hectares?"),
        )
        .ask(
            "propriedade",
            "distancia_municipio_km",
            QuestionSpec::numeric("Qual a distância da propriedade até a sede do município, em km?"),
        )
        .ask(
            "propriedade",
            "situacao_legal",
            QuestionSpec::choice(
                "Qual a situação legal da propriedade?",
                &["Própria", "Arrendada", "Posse", "Assentamento", "Outra"],
            ),
        )
        // Dados pessoais
        .ask("pessoal", "nome", QuestionSpec::free_text("Qual o seu nome completo?"))
        .ask("pessoal", "cpf", QuestionSpec::free_text("Qual o seu CPF?"))
        .ask("pessoal", "rg", QuestionSpec::free_text("Qual o número da sua identidade (RG)?"))
        .ask("pessoal", "emissor", QuestionSpec::free_text("Qual o órgão emissor da identidade?"))
        .ask(
            "pessoal",
            "sexo",
            QuestionSpec::choice(
                "Qual o seu sexo?",
                &["Masculino", "Feminino", "Prefiro não informar"],
            ),
        )
        .ask(
            "pessoal",
            "data_nascimento",
            QuestionSpec::free_text("Qual a sua data de nascimento?"),
        )
        .ask("pessoal", "telefone", QuestionSpec::free_text("Qual o seu telefone para contato?"))
        .ask(
            "pessoal",
            "email",
            QuestionSpec::free_text("Qual o seu e-mail? Se não tiver, responda \"não possui\"."),
        )
        .ask("pessoal", "endereco", QuestionSpec::free_text("Qual o seu endereço residencial?"))
        .ask(
            "pessoal",
            "escolaridade",
            QuestionSpec::choice(
                "Qual a sua escolaridade?",
                &[
                    "Fundamental incompleto",
                    "Fundamental completo",
                    "Médio incompleto",
                    "Médio completo",
                    "Superior",
                ],
            ),
        )
        // Produção
        .ask(
            "producao",
            "culturas",
            QuestionSpec::free_text("Quais culturas você produz atualmente?"),
        )
        .ask("producao", "hortalicas", QuestionSpec::yes_no("Você cultiva hortaliças?"))
        .ask("producao", "mandioca", QuestionSpec::yes_no("Você cultiva mandioca?"))
        .ask("producao", "milho", QuestionSpec::yes_no("Você cultiva milho?"))
        .ask("producao", "feijao", QuestionSpec::yes_no("Você cultiva feijão?"))
        .ask("producao", "cacau", QuestionSpec::yes_no("Você cultiva cacau?"))
        .ask("producao", "cafe", QuestionSpec::yes_no("Você cultiva café?"))
        .ask(
            "producao",
            "area_cultivada_ha",
            QuestionSpec::numeric("Qual a área total cultivada, em hectares?"),
        )
        .ask(
            "producao",
            "producao_anual",
            QuestionSpec::free_text("Qual a produção anual estimada (por exemplo, em sacas ou toneladas)?"),
        )
        // Recursos
        .ask(
            "recursos",
            "maquinario",
            QuestionSpec::choice(
                "Qual maquinário você possui?",
                &["Trator", "Plantadeira", "Colheitadeira", "Pulverizador", "Irrigação", "Nenhum"],
            ),
        )
        .ask(
            "recursos",
            "mao_de_obra",
            QuestionSpec::choice(
                "Qual o tipo de mão de obra na propriedade?",
                &["Familiar", "Contratada permanente", "Contratada temporária"],
            ),
        )
        .ask(
            "recursos",
            "numero_empregados",
            QuestionSpec::numeric("Quantas pessoas trabalham na propriedade?"),
        )
        .ask(
            "recursos",
            "assistencia_tecnica",
            QuestionSpec::yes_no("Você recebe assistência técnica?"),
        )
        // Serviço solicitado
        .ask(
            "servico",
            "tipo_servico",
            QuestionSpec::choice(
                "Qual serviço você deseja solicitar?",
                &["Aração", "Gradagem", "Calagem", "Assistência técnica", "Outro"],
            ),
        )
        .finish(TERMINAL)
}
