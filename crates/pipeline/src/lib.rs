//! The fulfillment pipeline: detect language, normalize into the canonical
//! language, classify sentiment, resolve the intent, localize the reply and
//! emit the uniform response envelope. One envelope per event, always.

mod resolver;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use mesero_catalog::MenuCatalog;
use mesero_core::{
    FulfillmentEvent, Intent, ResponseEnvelope, Sentiment, Utterance, FALLBACK_INTENT_NAME,
};
use mesero_lang::{LanguageDetector, LanguageServices, SentimentClassifier, Translator};
use mesero_observability::AppMetrics;
use tracing::{error, info, instrument};

pub use resolver::DISH_SLOT;

#[derive(Clone)]
pub struct DialogPipeline<L, C>
where
    L: LanguageServices,
    C: MenuCatalog,
{
    services: Arc<L>,
    catalog: Arc<C>,
    detector: LanguageDetector,
    translator: Translator,
    classifier: SentimentClassifier,
    metrics: Arc<AppMetrics>,
}

impl<L, C> DialogPipeline<L, C>
where
    L: LanguageServices,
    C: MenuCatalog,
{
    pub fn new(services: Arc<L>, catalog: Arc<C>, metrics: Arc<AppMetrics>) -> Self {
        Self {
            services,
            catalog,
            detector: LanguageDetector::default(),
            translator: Translator::default(),
            classifier: SentimentClassifier::default(),
            metrics,
        }
    }

    /// Entry point for untyped events from the front end. Malformed shapes
    /// are the catastrophic tier: logged in full, answered with the fixed
    /// technical-error envelope, never propagated.
    pub async fn handle_value(&self, event: serde_json::Value) -> ResponseEnvelope {
        match serde_json::from_value::<FulfillmentEvent>(event) {
            Ok(event) => self.handle(event).await,
            Err(cause) => {
                error!(%cause, "malformed fulfillment event");
                self.metrics.inc_recovered_error();
                ResponseEnvelope::technical_error()
            }
        }
    }

    /// Runs one request to completion. The front end expects a well-formed
    /// envelope on every call; a wrong-but-well-formed answer beats a
    /// structural failure, so errors stop here.
    #[instrument(skip(self, event))]
    pub async fn handle(&self, event: FulfillmentEvent) -> ResponseEnvelope {
        let started = Instant::now();
        self.metrics.inc_request();

        let envelope = match self.try_handle(&event).await {
            Ok(envelope) => envelope,
            Err(cause) => {
                error!(%cause, "pipeline failed, substituting technical-error reply");
                self.metrics.inc_recovered_error();
                ResponseEnvelope::technical_error()
            }
        };

        self.metrics.observe_latency(started.elapsed());
        envelope
    }

    async fn try_handle(&self, event: &FulfillmentEvent) -> Result<ResponseEnvelope> {
        let intent_data = &event.session_state.intent;
        let intent = Intent::from_name(intent_data.name.as_deref());
        let intent_name = intent_data
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(FALLBACK_INTENT_NAME)
            .to_string();

        let raw_text = event.input_transcript.as_str();
        let original_language = self.detector.detect(&*self.services, raw_text).await;

        // Translation and sentiment are only worth a round trip for real text.
        let substantive = raw_text.trim().chars().count() > 1;
        let normalized_text = if substantive {
            self.translator
                .to_canonical(&*self.services, raw_text, &original_language)
                .await
        } else {
            raw_text.to_string()
        };
        let sentiment = if substantive {
            self.classifier
                .classify(&*self.services, &normalized_text)
                .await
        } else {
            Sentiment::Neutral
        };

        let utterance = Utterance {
            raw_text: raw_text.to_string(),
            original_language,
            normalized_text,
        };

        let reply = resolver::resolve(
            &*self.catalog,
            &self.metrics,
            &intent,
            intent_data,
            &utterance,
            sentiment,
        )
        .await;

        let content = if utterance.original_language.is_canonical() || reply.is_empty() {
            reply
        } else {
            self.metrics.inc_localized_reply();
            self.translator
                .from_canonical(&*self.services, &reply, &utterance.original_language)
                .await
        };

        info!(
            intent = %intent_name,
            lang = %utterance.original_language,
            sentiment = ?sentiment,
            "fulfillment handled"
        );

        Ok(ResponseEnvelope::closed(intent_name, content))
    }
}
