use mesero_core::{LangCode, Sentiment};
use tracing::warn;

use crate::LanguageServices;

/// Coarse sentiment over the canonical-language text, used only to bias tone.
/// Anything that goes wrong reads as Neutral.
#[derive(Debug, Clone)]
pub struct SentimentClassifier {
    canonical: LangCode,
}

impl Default for SentimentClassifier {
    fn default() -> Self {
        Self {
            canonical: LangCode::canonical(),
        }
    }
}

impl SentimentClassifier {
    pub async fn classify<S: LanguageServices>(
        &self,
        services: &S,
        canonical_text: &str,
    ) -> Sentiment {
        if canonical_text.trim().chars().count() <= 1 {
            return Sentiment::Neutral;
        }

        match services.sentiment(canonical_text, &self.canonical).await {
            Ok(sentiment) => sentiment,
            Err(error) => {
                warn!(%error, "sentiment service failed, defaulting to neutral");
                Sentiment::Neutral
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LangServiceError, RankedLanguage};

    struct AngryServices;

    impl LanguageServices for AngryServices {
        async fn identify(&self, _text: &str) -> Result<Vec<RankedLanguage>, LangServiceError> {
            Ok(Vec::new())
        }

        async fn translate(
            &self,
            text: &str,
            _source: &LangCode,
            _target: &LangCode,
        ) -> Result<String, LangServiceError> {
            Ok(text.to_string())
        }

        async fn sentiment(
            &self,
            _text: &str,
            _lang: &LangCode,
        ) -> Result<Sentiment, LangServiceError> {
            Ok(Sentiment::Negative)
        }
    }

    #[tokio::test]
    async fn trivial_text_never_reaches_the_service() {
        let classifier = SentimentClassifier::default();
        assert_eq!(
            classifier.classify(&AngryServices, " a ").await,
            Sentiment::Neutral
        );
        assert_eq!(
            classifier.classify(&AngryServices, "estoy furioso").await,
            Sentiment::Negative
        );
    }
}
