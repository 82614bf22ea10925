use std::time::Duration;

use mesero_core::{LangCode, Sentiment};
use serde::{Deserialize, Serialize};

use crate::{LangServiceError, LanguageServices, RankedLanguage};

/// REST client for a LibreTranslate-style language service exposing
/// `/detect`, `/translate` and `/sentiment` routes. One request per call,
/// deadlines inherited from the client timeouts, no retries.
#[derive(Debug, Clone)]
pub struct HttpLanguageStack {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct DetectBody<'a> {
    q: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct DetectEntry {
    language: String,
    #[serde(default)]
    confidence: f32,
}

#[derive(Debug, Serialize)]
struct TranslateBody<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateResponse {
    translated_text: String,
}

#[derive(Debug, Serialize)]
struct SentimentBody<'a> {
    q: &'a str,
    language: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct SentimentResponse {
    sentiment: String,
}

impl HttpLanguageStack {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(6))
            .timeout(Duration::from_secs(20))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn route(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}

impl LanguageServices for HttpLanguageStack {
    async fn identify(&self, text: &str) -> Result<Vec<RankedLanguage>, LangServiceError> {
        let entries: Vec<DetectEntry> = self
            .client
            .post(self.route("detect"))
            .json(&DetectBody {
                q: text,
                api_key: self.api_key.as_deref(),
            })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(entries
            .into_iter()
            .map(|entry| RankedLanguage {
                code: entry.language,
                confidence: entry.confidence,
            })
            .collect())
    }

    async fn translate(
        &self,
        text: &str,
        source: &LangCode,
        target: &LangCode,
    ) -> Result<String, LangServiceError> {
        let response: TranslateResponse = self
            .client
            .post(self.route("translate"))
            .json(&TranslateBody {
                q: text,
                source: source.as_str(),
                target: target.as_str(),
                api_key: self.api_key.as_deref(),
            })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if response.translated_text.is_empty() && !text.is_empty() {
            return Err(LangServiceError::Payload(
                "empty translation for non-empty input".to_string(),
            ));
        }
        Ok(response.translated_text)
    }

    async fn sentiment(&self, text: &str, lang: &LangCode) -> Result<Sentiment, LangServiceError> {
        let response: SentimentResponse = self
            .client
            .post(self.route("sentiment"))
            .json(&SentimentBody {
                q: text,
                language: lang.as_str(),
                api_key: self.api_key.as_deref(),
            })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(Sentiment::from_label(&response.sentiment))
    }
}
