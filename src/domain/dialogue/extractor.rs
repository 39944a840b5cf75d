//! Hint extraction for the web-form hand-off.
//!
//! Scans what the user typed for a CPF, a phone number and a self-declared
//! name so the form can pre-fill them. Best effort, never fails.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

use super::message::TranscriptEntry;

pub const CPF_FIELD: &str = "cpf";
pub const PHONE_FIELD: &str = "telefone";
pub const NAME_FIELD: &str = "nome";

static CPF_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{3}\.\d{3}\.\d{3}-\d{2}").expect("valid cpf pattern"));

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(\d{2}\)\s*\d{4,5}-\d{4}").expect("valid phone pattern"));

static NAME_INTRO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)meu nome é|me chamo").expect("valid name pattern"));

/// Names this short are treated as noise.
const MIN_NAME_CHARS: usize = 4;

/// Field name -> raw extracted value.
pub type ExtractedHints = BTreeMap<String, String>;

/// Extracts form hints from the user's turns in `transcript`.
///
/// CPF and phone keep the earliest match; the name keeps the latest.
pub fn extract_hints(transcript: &[TranscriptEntry]) -> ExtractedHints {
    let mut hints = ExtractedHints::new();

    for entry in transcript.iter().filter(|e| e.is_from_user) {
        let text = entry.text.as_str();

        if !hints.contains_key(CPF_FIELD) {
            if let Some(m) = CPF_PATTERN.find(text) {
                hints.insert(CPF_FIELD.to_string(), m.as_str().to_string());
            }
        }

        if !hints.contains_key(PHONE_FIELD) {
            if let Some(m) = PHONE_PATTERN.find(text) {
                hints.insert(PHONE_FIELD.to_string(), m.as_str().to_string());
            }
        }

        if let Some(name) = declared_name(text) {
            hints.insert(NAME_FIELD.to_string(), name);
        }
    }

    hints
}

fn declared_name(text: &str) -> Option<String> {
    let intro = NAME_INTRO.find(text)?;
    let rest = &text[intro.end()..];
    let candidate = rest
        .trim()
        .split(|c| matches!(c, '.' | ',' | '!' | '?'))
        .next()
        .unwrap_or_default()
        .trim();

    (candidate.chars().count() >= MIN_NAME_CHARS).then(|| candidate.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(text: &str) -> TranscriptEntry {
        TranscriptEntry::user(text)
    }

    #[test]
    fn extracts_cpf_and_phone() {
        let hints = extract_hints(&[
            user("meu cpf é 123.456.789-09"),
            user("telefone (94) 99123-4567"),
        ]);
        assert_eq!(hints.get("cpf").map(String::as_str), Some("123.456.789-09"));
        assert_eq!(hints.get("telefone").map(String::as_str), Some("(94) 99123-4567"));
    }

    #[test]
    fn phone_accepts_eight_digits_without_space() {
        let hints = extract_hints(&[user("(94)3421-1234")]);
        assert_eq!(hints.get("telefone").map(String::as_str), Some("(94)3421-1234"));
    }

    #[test]
    fn earliest_cpf_wins() {
        let hints = extract_hints(&[user("111.111.111-11"), user("222.222.222-22")]);
        assert_eq!(hints.get("cpf").map(String::as_str), Some("111.111.111-11"));
    }

    #[test]
    fn assistant_turns_are_ignored() {
        let hints = extract_hints(&[TranscriptEntry::bot("Exemplo: 123.456.789-09")]);
        assert!(hints.is_empty());
    }

    #[test]
    fn name_is_cut_at_punctuation() {
        let hints = extract_hints(&[user("Olá, meu nome é João da Silva. Quero ajuda")]);
        assert_eq!(hints.get("nome").map(String::as_str), Some("João da Silva"));
    }

    #[test]
    fn name_intro_is_case_insensitive() {
        let hints = extract_hints(&[user("ME CHAMO Antônia!")]);
        assert_eq!(hints.get("nome").map(String::as_str), Some("Antônia"));
    }

    #[test]
    fn short_names_are_dropped() {
        let hints = extract_hints(&[user("me chamo Ana")]);
        assert!(hints.get("nome").is_none());
    }

    #[test]
    fn latest_name_wins() {
        let hints = extract_hints(&[user("me chamo Joaquim"), user("na verdade meu nome é Raimundo")]);
        assert_eq!(hints.get("nome").map(String::as_str), Some("Raimundo"));
    }

    #[test]
    fn nothing_found_yields_empty_map() {
        assert!(extract_hints(&[user("oi"), user("quero cadastro")]).is_empty());
    }
}
