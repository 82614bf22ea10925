use mesero_core::{contains_any, LangCode, Sentiment};

use crate::{LangServiceError, LanguageServices, RankedLanguage};

/// Heuristic stand-in for the external services, used in development and
/// tests when no endpoint is configured. Identification counts stopword hits
/// per language; translation is the identity; sentiment is a keyword scan.
#[derive(Debug, Clone, Default)]
pub struct OfflineLanguageStack;

const STOPWORDS: &[(&str, &[&str])] = &[
    (
        "es",
        &["el", "la", "que", "un", "una", "quiero", "por", "gracias", "con"],
    ),
    (
        "pt",
        &["eu", "você", "não", "um", "uma", "quero", "obrigado", "tenho", "com"],
    ),
    (
        "en",
        &["the", "i", "you", "a", "want", "please", "my", "and"],
    ),
];

const NEGATIVE_WORDS: &[&str] = &["triste", "mal", "furioso", "terrible", "horrible", "pésimo"];
const POSITIVE_WORDS: &[&str] = &["gracias", "genial", "rico", "excelente", "bueno", "delicioso"];

impl LanguageServices for OfflineLanguageStack {
    async fn identify(&self, text: &str) -> Result<Vec<RankedLanguage>, LangServiceError> {
        let words = text
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect::<Vec<_>>();
        if words.is_empty() {
            return Ok(Vec::new());
        }

        let mut ranked = STOPWORDS
            .iter()
            .map(|(code, stopwords)| {
                let hits = words
                    .iter()
                    .filter(|word| stopwords.contains(&word.as_str()))
                    .count();
                RankedLanguage {
                    code: code.to_string(),
                    confidence: hits as f32 / words.len() as f32,
                }
            })
            .filter(|entry| entry.confidence > 0.0)
            .collect::<Vec<_>>();

        ranked.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        Ok(ranked)
    }

    async fn translate(
        &self,
        text: &str,
        _source: &LangCode,
        _target: &LangCode,
    ) -> Result<String, LangServiceError> {
        Ok(text.to_string())
    }

    async fn sentiment(&self, text: &str, _lang: &LangCode) -> Result<Sentiment, LangServiceError> {
        let lower = text.to_lowercase();
        let negative = contains_any(&lower, NEGATIVE_WORDS);
        let positive = contains_any(&lower, POSITIVE_WORDS);

        Ok(match (negative, positive) {
            (true, true) => Sentiment::Mixed,
            (true, false) => Sentiment::Negative,
            (false, true) => Sentiment::Positive,
            (false, false) => Sentiment::Neutral,
        })
    }
}
