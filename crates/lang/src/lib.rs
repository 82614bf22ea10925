//! Contracts and client implementations for the external language services:
//! statistical language identification, machine translation and sentiment
//! analysis. The pipeline only ever talks to these through the degradation
//! wrappers in [`detect`], [`translate`] and [`sentiment`].

pub mod detect;
mod http;
mod offline;
pub mod sentiment;
pub mod translate;

use mesero_core::{LangCode, Sentiment};
use thiserror::Error;

pub use detect::{LanguageDetector, ShortPhraseTable};
pub use http::HttpLanguageStack;
pub use offline::OfflineLanguageStack;
pub use sentiment::SentimentClassifier;
pub use translate::Translator;

#[derive(Debug, Clone, PartialEq)]
pub struct RankedLanguage {
    pub code: String,
    pub confidence: f32,
}

#[derive(Debug, Error)]
pub enum LangServiceError {
    #[error("language service transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("language service returned an unusable payload: {0}")]
    Payload(String),
}

/// External language capability, one round trip per call, no retries.
pub trait LanguageServices: Send + Sync {
    /// Ranked list of candidate languages for a raw text; only the top entry
    /// is ever used.
    async fn identify(&self, text: &str) -> Result<Vec<RankedLanguage>, LangServiceError>;

    async fn translate(
        &self,
        text: &str,
        source: &LangCode,
        target: &LangCode,
    ) -> Result<String, LangServiceError>;

    async fn sentiment(&self, text: &str, lang: &LangCode) -> Result<Sentiment, LangServiceError>;
}

/// Runtime-selected service stack: HTTP-backed when an endpoint is
/// configured, heuristic offline stand-in otherwise.
#[derive(Debug, Clone)]
pub enum LanguageStack {
    Http(HttpLanguageStack),
    Offline(OfflineLanguageStack),
}

impl LanguageStack {
    pub fn offline() -> Self {
        Self::Offline(OfflineLanguageStack::default())
    }

    pub fn from_env() -> anyhow::Result<Self> {
        match std::env::var("MESERO_LANG_API_URL") {
            Ok(base_url) => {
                let api_key = std::env::var("MESERO_LANG_API_KEY").ok();
                Ok(Self::Http(HttpLanguageStack::new(base_url, api_key)?))
            }
            Err(_) => Ok(Self::offline()),
        }
    }
}

impl LanguageServices for LanguageStack {
    async fn identify(&self, text: &str) -> Result<Vec<RankedLanguage>, LangServiceError> {
        match self {
            Self::Http(stack) => stack.identify(text).await,
            Self::Offline(stack) => stack.identify(text).await,
        }
    }

    async fn translate(
        &self,
        text: &str,
        source: &LangCode,
        target: &LangCode,
    ) -> Result<String, LangServiceError> {
        match self {
            Self::Http(stack) => stack.translate(text, source, target).await,
            Self::Offline(stack) => stack.translate(text, source, target).await,
        }
    }

    async fn sentiment(&self, text: &str, lang: &LangCode) -> Result<Sentiment, LangServiceError> {
        match self {
            Self::Http(stack) => stack.sentiment(text, lang).await,
            Self::Offline(stack) => stack.sentiment(text, lang).await,
        }
    }
}
