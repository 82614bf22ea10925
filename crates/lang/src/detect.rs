use std::collections::HashMap;

use mesero_core::LangCode;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::LanguageServices;

/// Statistical detectors are unreliable on very short strings, so common
/// greetings, farewells and fillers are resolved from this table before the
/// external call. Configuration data rather than logic: replaceable wholesale.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct ShortPhraseTable {
    entries: HashMap<String, String>,
}

impl Default for ShortPhraseTable {
    fn default() -> Self {
        let entries = [
            ("hola", "es"),
            ("buenas", "es"),
            ("gracias", "es"),
            ("oi", "pt"),
            ("olá", "pt"),
            ("ola", "pt"),
            ("bom dia", "pt"),
            ("tudo bem", "pt"),
            ("obrigado", "pt"),
            ("obrigada", "pt"),
            ("tchau", "pt"),
            ("quero", "pt"),
            ("hi", "en"),
            ("hello", "en"),
            ("thanks", "en"),
            ("bye", "en"),
            ("burger", "en"),
        ]
        .into_iter()
        .map(|(phrase, code)| (phrase.to_string(), code.to_string()))
        .collect();

        Self { entries }
    }
}

impl ShortPhraseTable {
    pub fn lookup(&self, cleaned: &str) -> Option<LangCode> {
        self.entries.get(cleaned).map(|code| LangCode::parse(code))
    }
}

/// Minimum raw length before the statistical tier is worth calling.
const MIN_STATISTICAL_LEN: usize = 2;

/// Two-tier language detection: exact-phrase dictionary first, statistical
/// service second, canonical language as the silent default. Detection is
/// advisory, not safety-critical; failures never propagate.
#[derive(Debug, Clone, Default)]
pub struct LanguageDetector {
    table: ShortPhraseTable,
}

impl LanguageDetector {
    pub fn new(table: ShortPhraseTable) -> Self {
        Self { table }
    }

    pub async fn detect<S: LanguageServices>(&self, services: &S, text: &str) -> LangCode {
        let cleaned = clean_for_lookup(text);

        if let Some(code) = self.table.lookup(&cleaned) {
            debug!(lang = %code, "language resolved by phrase dictionary");
            return code;
        }

        if text.chars().count() > MIN_STATISTICAL_LEN {
            match services.identify(text).await {
                Ok(ranked) => {
                    if let Some(top) = ranked.first() {
                        let code = LangCode::parse(&top.code);
                        debug!(lang = %code, confidence = top.confidence, "language resolved statistically");
                        return code;
                    }
                }
                Err(error) => {
                    warn!(%error, "language identification failed, defaulting to canonical");
                }
            }
        }

        LangCode::canonical()
    }
}

fn clean_for_lookup(text: &str) -> String {
    text.to_lowercase()
        .trim()
        .trim_matches(|ch| matches!(ch, '!' | '?' | '.'))
        .to_string()
}
