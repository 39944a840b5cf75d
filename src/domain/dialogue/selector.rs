//! Flow selector.
//!
//! Decides what to do with free text typed while no flow is running:
//! start a registration flow, answer from the canned-reply table, or fall
//! back to the "didn't understand" reply. Pure function of the input, the
//! static tables and the pending registration offer.
//!
//! Matching ignores case and accents.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::catalog::FlowCatalog;
use super::flow::FlowId;
use super::message::Suggestion;
use crate::domain::foundation::Sector;

/// One canned answer and the keywords that trigger it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CannedReply {
    keywords: Vec<String>,
    reply: String,
    offers: Option<Sector>,
}

impl CannedReply {
    pub fn new(keywords: &[&str], reply: impl Into<String>) -> Self {
        Self {
            keywords: keywords.iter().map(|k| fold(k)).collect(),
            reply: reply.into(),
            offers: None,
        }
    }

    /// Marks the reply as ending with a registration offer for `sector`.
    pub fn offering(mut self, sector: Sector) -> Self {
        self.offers = Some(sector);
        self
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn reply(&self) -> &str {
        &self.reply
    }

    pub fn offers(&self) -> Option<Sector> {
        self.offers
    }

    fn matches(&self, tokens: &[String]) -> bool {
        self.keywords.iter().any(|k| contains_phrase(tokens, k))
    }
}

/// Static tables the selector matches against.
#[derive(Debug, Clone)]
pub struct SelectorTables {
    /// Scanned in declaration order; the first hit wins.
    pub replies: Vec<CannedReply>,
    /// Words that start a registration flow outright.
    pub registration_triggers: Vec<String>,
    /// Words that accept a pending registration offer.
    pub affirmatives: Vec<String>,
    /// Words that turn a pending registration offer down.
    pub declines: Vec<String>,
    /// Words that name a sector inside a registration request.
    pub sector_keywords: Vec<(Sector, Vec<String>)>,
    /// First message shown when the widget opens.
    pub welcome: String,
    /// Answer to a declined offer.
    pub decline_reply: String,
    pub fallback: String,
    /// Chips offered on a fresh freeform turn.
    pub topic_suggestions: Vec<Suggestion>,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| fold(w)).collect()
}

impl Default for SelectorTables {
    fn default() -> Self {
        Self {
            replies: vec![
                CannedReply::new(
                    &["assistência técnica"],
                    "Oferecemos assistência técnica agrícola gratuita para produtores \
                     cadastrados. Para solicitar, é só preencher o cadastro de produtor rural.",
                ),
                CannedReply::new(
                    &["análise de solo"],
                    "Realizamos análise de solo gratuita para produtores cadastrados. O kit \
                     para coleta de solo está disponível na nossa sede. \
                     Deseja fazer seu cadastro de produtor rural?",
                )
                .offering(Sector::Agricultura),
                CannedReply::new(
                    &["mecanização", "aração", "gradagem"],
                    "Nosso programa de mecanização agrícola oferece serviços de preparo do \
                     solo, plantio e colheita. Para solicitar, é necessário estar cadastrado. \
                     Deseja fazer seu cadastro de produtor rural?",
                )
                .offering(Sector::Agricultura),
                CannedReply::new(
                    &["licenciamento pesca", "licenciamento de pesca", "licença de pesca"],
                    "O licenciamento para atividade pesqueira requer documentação específica. \
                     Podemos ajudar com todo o processo de licenciamento ambiental para pesca.",
                ),
                CannedReply::new(
                    &["piscicultura", "tanque", "tanques", "açude", "açudes"],
                    "Oferecemos suporte técnico para criação de peixes em tanques e açudes, \
                     com orientações sobre manejo, alimentação e comercialização. \
                     Deseja fazer seu cadastro na pesca?",
                )
                .offering(Sector::Pesca),
                CannedReply::new(
                    &["vender para o governo", "vender para a prefeitura"],
                    "Através do PAA, você pode vender seus produtos diretamente para \
                     instituições públicas, com preços justos para a agricultura familiar. \
                     Deseja registrar seu interesse?",
                )
                .offering(Sector::Paa),
                CannedReply::new(
                    &["agricultura", "agrícola", "plantio", "lavoura"],
                    "A Secretaria de Agricultura oferece aração, gradagem, calagem e \
                     assistência técnica para produtores do município. \
                     Deseja fazer seu cadastro de produtor rural?",
                )
                .offering(Sector::Agricultura),
                CannedReply::new(
                    &["pesca", "peixe", "pescador", "aquicultura"],
                    "A Secretaria de Pesca apoia piscicultores e pescadores com \
                     assistência técnica e acompanhamento de viveiros e açudes. \
                     Deseja fazer seu cadastro na pesca?",
                )
                .offering(Sector::Pesca),
                CannedReply::new(
                    &["paa", "aquisição de alimentos", "merenda"],
                    "O Programa de Aquisição de Alimentos (PAA) compra alimentos da \
                     agricultura familiar para doação. Deseja registrar seu interesse?",
                )
                .offering(Sector::Paa),
                CannedReply::new(
                    &["documento", "documentos", "dap", "caf"],
                    "Para o cadastro você vai precisar de CPF, identidade, comprovante \
                     de residência e, se tiver, DAP ou CAF.",
                ),
                CannedReply::new(
                    &["horário", "atendimento", "funcionamento"],
                    "Atendemos de segunda a sexta, das 8h às 14h, exceto feriados.",
                ),
                CannedReply::new(
                    &["endereço", "onde fica", "localização"],
                    "Estamos localizados na Av. Principal, nº 500, Centro, \
                     Vitória do Xingu/PA, próximo à prefeitura.",
                ),
                CannedReply::new(
                    &["contato", "email", "e-mail", "falar com a equipe"],
                    "Você pode entrar em contato pelo telefone (99) 3333-4444 ou pelo \
                     e-mail semapa@prefeitura.gov.br.",
                ),
                CannedReply::new(
                    &["oi", "olá", "bom dia", "boa tarde", "boa noite"],
                    "Olá! Sou o assistente virtual da Prefeitura. Posso ajudar com \
                     agricultura, pesca ou o PAA. Sobre o que você quer saber?",
                ),
                CannedReply::new(
                    &["obrigado", "obrigada", "valeu"],
                    "Por nada! Se precisar de mais alguma coisa, é só chamar.",
                ),
            ],
            registration_triggers: words(&[
                "cadastro",
                "cadastrar",
                "cadastre",
                "inscrição",
                "inscrever",
            ]),
            affirmatives: words(&["sim", "claro", "com certeza", "pode ser", "quero sim"]),
            declines: words(&["não", "depois", "mais tarde"]),
            sector_keywords: vec![
                (
                    Sector::Agricultura,
                    words(&["agricultura", "agrícola", "produtor rural", "lavoura"]),
                ),
                (
                    Sector::Pesca,
                    words(&["pesca", "peixe", "piscicultura", "pescador"]),
                ),
                (
                    Sector::Paa,
                    words(&["paa", "aquisição de alimentos", "vender para o governo"]),
                ),
            ],
            welcome: "Olá! Como posso ajudar você hoje?".to_string(),
            decline_reply: "Tudo bem! Quando quiser se cadastrar, é só digitar \"cadastro\". \
                            Posso ajudar com mais alguma coisa?"
                .to_string(),
            fallback: "Desculpe, não entendi. Você pode perguntar sobre agricultura, pesca \
                       ou o PAA, ou digitar \"cadastro\" para iniciar seu cadastro."
                .to_string(),
            topic_suggestions: vec![
                Suggestion::new("Agricultura", "agricultura"),
                Suggestion::new("Pesca", "pesca"),
                Suggestion::new("PAA", "paa"),
                Suggestion::new("Fazer cadastro", "cadastro"),
            ],
        }
    }
}

/// Session facts the selector may consult.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionContext {
    /// Sector whose registration the previous reply offered.
    pub pending_offer: Option<Sector>,
    /// Sector the widget was opened on.
    pub preferred_sector: Option<Sector>,
}

/// What the selector decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorOutcome {
    StartFlow { flow: FlowId },
    Canned { reply: String, offers: Option<Sector> },
    Fallback { reply: String },
}

#[derive(Debug, Clone)]
pub struct FlowSelector {
    tables: SelectorTables,
}

impl FlowSelector {
    pub fn new(tables: SelectorTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &SelectorTables {
        &self.tables
    }

    /// Classifies one freeform input. Total: every input gets an outcome.
    pub fn select(
        &self,
        input: &str,
        context: SelectionContext,
        catalog: &FlowCatalog,
    ) -> SelectorOutcome {
        let tokens = tokenize(input);

        if context.pending_offer.is_some() && any_phrase(&tokens, &self.tables.declines) {
            return SelectorOutcome::Canned {
                reply: self.tables.decline_reply.clone(),
                offers: None,
            };
        }

        let triggered = any_phrase(&tokens, &self.tables.registration_triggers);
        let accepted_offer =
            context.pending_offer.is_some() && any_phrase(&tokens, &self.tables.affirmatives);

        if triggered || accepted_offer {
            let sector = self
                .mentioned_sector(&tokens)
                .or(context.pending_offer)
                .or(context.preferred_sector);
            let flow = sector
                .and_then(|s| catalog.for_sector(s))
                .map(|f| f.id().clone())
                .unwrap_or_else(|| catalog.default_flow().clone());
            return SelectorOutcome::StartFlow { flow };
        }

        match self.tables.replies.iter().find(|r| r.matches(&tokens)) {
            Some(entry) => SelectorOutcome::Canned {
                reply: entry.reply.clone(),
                offers: entry.offers,
            },
            None => SelectorOutcome::Fallback {
                reply: self.tables.fallback.clone(),
            },
        }
    }

    fn mentioned_sector(&self, tokens: &[String]) -> Option<Sector> {
        self.tables
            .sector_keywords
            .iter()
            .find(|(_, keywords)| any_phrase(tokens, keywords))
            .map(|(sector, _)| *sector)
    }
}

impl Default for FlowSelector {
    fn default() -> Self {
        Self::new(SelectorTables::default())
    }
}

/// Lower-cases, strips accents and splits on anything that is not a letter
/// or digit, so "Mecanização" and "mecanizacao" give the same token.
pub fn tokenize(text: &str) -> Vec<String> {
    fold(text)
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn fold(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

fn any_phrase(tokens: &[String], phrases: &[String]) -> bool {
    phrases.iter().any(|p| contains_phrase(tokens, p))
}

/// True if the (possibly multi-word) phrase occurs as contiguous tokens.
fn contains_phrase(tokens: &[String], phrase: &str) -> bool {
    let needle = tokenize(phrase);
    if needle.is_empty() || needle.len() > tokens.len() {
        return false;
    }
    tokens.windows(needle.len()).any(|window| window == needle.as_slice())
}
