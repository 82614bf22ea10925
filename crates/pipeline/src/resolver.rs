//! Per-intent decision logic. State-free: everything is derived from the
//! intent, the slots, the two text views and the sentiment for this request.
//! Replies come back in the canonical language; localization is the
//! pipeline's job.

use mesero_catalog::MenuCatalog;
use mesero_core::keywords::{
    contains_any, scan_dishes, FALLBACK_DELIVERY, FALLBACK_DISH_SCAN, GENERIC_CRAVING,
    NEGATIVE_TONE, ORDER_DISH_SCAN,
};
use mesero_core::{normalize_dish_name, replies, Intent, IntentData, ItemResolution, Sentiment, Utterance};
use mesero_observability::AppMetrics;
use tracing::{debug, error};

pub const DISH_SLOT: &str = "Comida";

pub(crate) async fn resolve<C: MenuCatalog>(
    catalog: &C,
    metrics: &AppMetrics,
    intent: &Intent,
    slots: &IntentData,
    utterance: &Utterance,
    sentiment: Sentiment,
) -> String {
    match intent {
        Intent::Greeting => greeting(utterance, sentiment),
        Intent::RestaurantInfo => replies::restaurant_info(&utterance.normalized_text),
        Intent::ViewMenu => replies::full_menu(),
        Intent::PlaceOrder => place_order(catalog, metrics, slots, utterance).await,
        Intent::Confirm => replies::order_confirmed(),
        Intent::Farewell => replies::farewell(),
        Intent::Fallback => fallback(catalog, metrics, utterance).await,
        Intent::Unrecognized(name) => {
            metrics.inc_fallback_reply();
            replies::unrecognized_intent(name)
        }
    }
}

/// Negative sentiment, or the explicit bad-mood keyword override, switches to
/// the expedited empathetic greeting.
fn greeting(utterance: &Utterance, sentiment: Sentiment) -> String {
    let lower = utterance.normalized_text.to_lowercase();
    if sentiment.is_negative() || contains_any(&lower, NEGATIVE_TONE) {
        replies::empathetic_greeting()
    } else {
        replies::random_greeting()
    }
}

/// Order sub-flow: generic cravings short-circuit to the menu tease, then the
/// dish is resolved slot-first, keyword-scan second.
async fn place_order<C: MenuCatalog>(
    catalog: &C,
    metrics: &AppMetrics,
    slots: &IntentData,
    utterance: &Utterance,
) -> String {
    let normalized_lower = utterance.normalized_text.to_lowercase();
    let original_lower = utterance.raw_text.to_lowercase();

    if contains_any(&normalized_lower, GENERIC_CRAVING) {
        return replies::generic_menu_tease();
    }

    let resolution = resolve_item(slots, &normalized_lower, &original_lower);
    debug!(?resolution, "order item resolution");

    match resolution.key() {
        Some(key) => price_lookup(catalog, metrics, key).await,
        None => {
            metrics.inc_fallback_reply();
            replies::which_dish_prompt()
        }
    }
}

fn resolve_item(
    slots: &IntentData,
    normalized_lower: &str,
    original_lower: &str,
) -> ItemResolution {
    if let Some(raw) = slots.slot_value(DISH_SLOT) {
        if let Some(key) = normalize_dish_name(raw) {
            return ItemResolution::FromSlot(key);
        }
    }

    match scan_dishes(ORDER_DISH_SCAN, normalized_lower, original_lower) {
        Some(dish) => ItemResolution::FromText(dish.to_string()),
        None => ItemResolution::Unresolved,
    }
}

/// Fallback intent: dish stems over both text views in fixed priority, then
/// a delivery offer, then a clarification prompt.
async fn fallback<C: MenuCatalog>(
    catalog: &C,
    metrics: &AppMetrics,
    utterance: &Utterance,
) -> String {
    let normalized_lower = utterance.normalized_text.to_lowercase();
    let original_lower = utterance.raw_text.to_lowercase();

    if let Some(dish) = scan_dishes(FALLBACK_DISH_SCAN, &normalized_lower, &original_lower) {
        return price_lookup(catalog, metrics, dish).await;
    }

    if contains_any(&normalized_lower, FALLBACK_DELIVERY) {
        return replies::delivery_offer();
    }

    metrics.inc_fallback_reply();
    replies::clarify_dish()
}

/// Point lookup against the catalog. Not-found is a friendly suggestion;
/// transport failure is surfaced to the user with the raw detail.
async fn price_lookup<C: MenuCatalog>(catalog: &C, metrics: &AppMetrics, raw_key: &str) -> String {
    let Some(key) = normalize_dish_name(raw_key) else {
        metrics.inc_fallback_reply();
        return replies::which_dish_prompt();
    };

    match catalog.find_item(&key).await {
        Ok(Some(item)) => replies::price_reply(&item),
        Ok(None) => replies::item_not_found(&key),
        Err(cause) => {
            metrics.inc_catalog_error();
            error!(%cause, item = %key, "menu lookup failed");
            replies::catalog_error(&cause.to_string())
        }
    }
}
