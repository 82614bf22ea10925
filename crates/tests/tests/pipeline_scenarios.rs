use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use mesero_catalog::{CatalogError, MemoryCatalog, MenuCatalog};
use mesero_core::{FulfillmentEvent, LangCode, MenuItem, Sentiment};
use mesero_lang::{LangServiceError, LanguageServices, RankedLanguage};
use mesero_observability::AppMetrics;
use mesero_pipeline::{DialogPipeline, DISH_SLOT};
use serde_json::json;

/// Counts statistical-identification calls and marks every translation with
/// the target language, so language routing can be asserted without a real
/// service.
#[derive(Default)]
struct MarkerServices {
    identify_calls: AtomicUsize,
    identified: Option<&'static str>,
}

impl MarkerServices {
    fn identifying(code: &'static str) -> Self {
        Self {
            identify_calls: AtomicUsize::new(0),
            identified: Some(code),
        }
    }
}

impl LanguageServices for MarkerServices {
    async fn identify(&self, _text: &str) -> Result<Vec<RankedLanguage>, LangServiceError> {
        self.identify_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .identified
            .map(|code| RankedLanguage {
                code: code.to_string(),
                confidence: 0.99,
            })
            .into_iter()
            .collect())
    }

    async fn translate(
        &self,
        text: &str,
        _source: &LangCode,
        target: &LangCode,
    ) -> Result<String, LangServiceError> {
        Ok(format!("[{target}] {text}"))
    }

    async fn sentiment(&self, _text: &str, _lang: &LangCode) -> Result<Sentiment, LangServiceError> {
        Ok(Sentiment::Neutral)
    }
}

struct BrokenCatalog;

impl MenuCatalog for BrokenCatalog {
    async fn find_item(&self, _canonical_name: &str) -> Result<Option<MenuItem>, CatalogError> {
        Err(CatalogError::Unavailable("conexión rechazada".to_string()))
    }
}

fn pipeline_with<L: LanguageServices, C: MenuCatalog>(
    services: L,
    catalog: C,
) -> DialogPipeline<L, C> {
    DialogPipeline::new(Arc::new(services), Arc::new(catalog), AppMetrics::shared())
}

fn event(intent_name: Option<&str>, transcript: &str) -> FulfillmentEvent {
    let value = json!({
        "sessionState": { "intent": { "name": intent_name, "slots": {} } },
        "inputTranscript": transcript
    });
    serde_json::from_value(value).unwrap()
}

fn event_with_slot(intent_name: &str, transcript: &str, slot: &str, value: &str) -> FulfillmentEvent {
    let value = json!({
        "sessionState": {
            "intent": {
                "name": intent_name,
                "slots": { slot: { "value": { "interpretedValue": value } } }
            }
        },
        "inputTranscript": transcript
    });
    serde_json::from_value(value).unwrap()
}

fn message_of(envelope: &mesero_core::ResponseEnvelope) -> &str {
    assert_eq!(envelope.messages.len(), 1);
    &envelope.messages[0].content
}

#[tokio::test]
async fn dictionary_tier_short_circuits_the_statistical_call() {
    let services = Arc::new(MarkerServices::identifying("en"));
    let pipeline = DialogPipeline::new(
        services.clone(),
        Arc::new(MemoryCatalog::seeded()),
        AppMetrics::shared(),
    );

    let envelope = pipeline.handle(event(Some("Greeting"), "Hola")).await;

    assert_eq!(envelope.session_state.intent.state, "Fulfilled");
    // Dictionary hit resolves "Hola" as canonical: no statistical call and
    // no localization marker on the reply.
    assert_eq!(services.identify_calls.load(Ordering::SeqCst), 0);
    assert!(!message_of(&envelope).starts_with("[en]"));
}

#[tokio::test]
async fn greeting_round_trips_back_to_the_original_language() {
    let services = Arc::new(MarkerServices::identifying("en"));
    let pipeline = DialogPipeline::new(
        services.clone(),
        Arc::new(MemoryCatalog::seeded()),
        AppMetrics::shared(),
    );

    let envelope = pipeline
        .handle(event(Some("Greeting"), "good evening to you"))
        .await;

    // The reply was localized back into the detected language.
    assert!(message_of(&envelope).starts_with("[en] "));
    assert_eq!(services.identify_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn place_order_with_slot_returns_the_pizza_price() {
    let pipeline = pipeline_with(MarkerServices::default(), MemoryCatalog::seeded());

    let envelope = pipeline
        .handle(event_with_slot("PlaceOrder", "quiero pedir", DISH_SLOT, "pizza"))
        .await;

    let message = message_of(&envelope);
    assert!(message.contains("Pizza"));
    assert!(message.contains("25.000"));
    assert!(message.contains("¿Deseas pedirla?"));
}

#[tokio::test]
async fn fallback_burger_is_looked_up_in_canonical_and_replied_in_english() {
    let services = Arc::new(MarkerServices::identifying("en"));
    let pipeline = DialogPipeline::new(
        services.clone(),
        Arc::new(MemoryCatalog::seeded()),
        AppMetrics::shared(),
    );

    let envelope = pipeline.handle(event(None, "quiero un burger")).await;

    let message = message_of(&envelope);
    assert!(message.starts_with("[en] "));
    assert!(message.contains("Hamburguesa"));
    assert!(message.contains("18.000"));
    assert_eq!(envelope.session_state.intent.name, "FallbackIntent");
}

#[tokio::test]
async fn catalog_transport_failure_is_surfaced_verbatim() {
    let pipeline = pipeline_with(MarkerServices::default(), BrokenCatalog);

    let envelope = pipeline.handle(event(None, "una pizza por favor")).await;

    let message = message_of(&envelope);
    assert!(message.contains("Error consultando el menú"));
    assert!(message.contains("conexión rechazada"));
    // Still a well-formed fulfilled envelope.
    assert_eq!(envelope.session_state.intent.state, "Fulfilled");
}

#[tokio::test]
async fn missing_intent_name_behaves_like_the_fallback_intent() {
    let pipeline = pipeline_with(MarkerServices::default(), MemoryCatalog::seeded());

    let implicit = pipeline.handle(event(None, "mmm no sé qué decir")).await;
    let pipeline = pipeline_with(MarkerServices::default(), MemoryCatalog::seeded());
    let explicit = pipeline
        .handle(event(Some("FallbackIntent"), "mmm no sé qué decir"))
        .await;

    assert_eq!(message_of(&implicit), message_of(&explicit));
    assert_eq!(implicit.session_state.intent.name, "FallbackIntent");
    assert_eq!(explicit.session_state.intent.name, "FallbackIntent");
}

#[tokio::test]
async fn unrecognized_named_intent_gets_the_safety_net_reply() {
    let pipeline = pipeline_with(MarkerServices::default(), MemoryCatalog::seeded());

    let envelope = pipeline.handle(event(Some("BookATable"), "")).await;

    assert!(message_of(&envelope).contains("BookATable"));
    assert_eq!(envelope.session_state.intent.name, "BookATable");
}

#[tokio::test]
async fn fallback_delivery_keyword_offers_delivery() {
    let pipeline = pipeline_with(MarkerServices::default(), MemoryCatalog::seeded());

    let envelope = pipeline.handle(event(None, "me lo traigan por favor")).await;

    assert!(message_of(&envelope).contains("domicilios"));
    assert_eq!(envelope.session_state.intent.name, "FallbackIntent");
}

#[tokio::test]
async fn confirm_and_farewell_reply_with_their_fixed_texts() {
    let pipeline = pipeline_with(MarkerServices::default(), MemoryCatalog::seeded());
    let confirmed = pipeline.handle(event(Some("Confirm"), "sí, confirmo")).await;
    assert!(message_of(&confirmed).contains("¡Pedido Confirmado!"));

    let pipeline = pipeline_with(MarkerServices::default(), MemoryCatalog::seeded());
    let aliased = pipeline
        .handle(event(Some("ConfirmOrder"), "sí, confirmo"))
        .await;
    assert_eq!(message_of(&confirmed), message_of(&aliased));

    let pipeline = pipeline_with(MarkerServices::default(), MemoryCatalog::seeded());
    let farewell = pipeline.handle(event(Some("Farewell"), "chao")).await;
    assert!(message_of(&farewell).contains("Vuelve pronto"));
}

#[tokio::test]
async fn generic_craving_short_circuits_item_extraction() {
    let pipeline = pipeline_with(MarkerServices::default(), MemoryCatalog::seeded());

    let envelope = pipeline
        .handle(event(Some("PlaceOrder"), "tengo hambre de algo rico"))
        .await;

    assert!(message_of(&envelope).contains("¡Tenemos de todo!"));
}
