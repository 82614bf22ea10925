//! Canonical-language (Spanish) reply texts. Everything here is composed in
//! the processing language; localization back to the user's language happens
//! at the pipeline edge.

use rand::seq::IndexedRandom;

use crate::keywords::{contains_any, INFO_DEFAULT, INFO_TOPICS};
use crate::models::MenuItem;

const GREETING_VARIANTS: &[&str] = &[
    "¡Hola! Bienvenido a Restaurante Samy 🍔. ¿Qué deseas pedir?",
    "¡Buenas! Mesa lista. ¿Qué te traigo?",
    "¡Hola! Espero que tengas mucha hambre.",
];

pub fn random_greeting() -> String {
    GREETING_VARIANTS
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(GREETING_VARIANTS[0])
        .to_string()
}

/// Expedited greeting for a user who is clearly not having a good day.
pub fn empathetic_greeting() -> String {
    "Hola. Noto que no es un buen momento. 😟 Seré rápido. ¿Qué deseas comer?".to_string()
}

/// First restaurant-info topic whose keyword group matches, else the generic
/// location/hours blurb.
pub fn restaurant_info(normalized_text: &str) -> String {
    let lower = normalized_text.to_lowercase();
    INFO_TOPICS
        .iter()
        .find(|topic| contains_any(&lower, topic.keywords))
        .map(|topic| topic.reply)
        .unwrap_or(INFO_DEFAULT)
        .to_string()
}

/// Static listing, deliberately not catalog-driven.
pub fn full_menu() -> String {
    "Menú: Hamburguesa ($18k), Pizza ($25k), Salchipapa ($15k) y Perros ($12k). ¿Cuál prefieres?"
        .to_string()
}

pub fn order_confirmed() -> String {
    "¡Pedido Confirmado! ✅ Ya mismo lo pasamos a cocina.".to_string()
}

pub fn farewell() -> String {
    "¡Gracias por visitarnos! Vuelve pronto. 👋".to_string()
}

/// Safety net: every intent name produces some reply rather than a crash.
pub fn unrecognized_intent(intent_name: &str) -> String {
    format!("Entendido {intent_name}, pero no tengo respuesta configurada.")
}

pub fn generic_menu_tease() -> String {
    "¡Tenemos de todo! 🍔 Hamburguesas, 🍕 Pizzas y 🌭 Perros. ¿Cuál eliges?".to_string()
}

pub fn which_dish_prompt() -> String {
    "¿Qué plato deseas? Tenemos Hamburguesa, Pizza y Salchipapa.".to_string()
}

pub fn clarify_dish() -> String {
    "No entendí bien. ¿Podrías decirme solo el nombre del plato? (Ej: Pizza)".to_string()
}

pub fn delivery_offer() -> String {
    "¡Ah, domicilios! Sí, llevamos a tu casa. 🛵 ¿Qué te enviamos?".to_string()
}

pub fn price_reply(item: &MenuItem) -> String {
    let mut text = format!("La {} vale ${}. ", item.name, item.price);
    if !item.variants.is_empty() {
        text.push_str(&format!("Viene: {}. ", item.variants));
    }
    text.push_str("¿Deseas pedirla?");
    text
}

pub fn item_not_found(canonical_name: &str) -> String {
    format!("Lo siento, no tenemos {canonical_name}. ¿Te ofrezco Pizza?")
}

/// The one reply that carries raw failure detail back to the user.
pub fn catalog_error(detail: &str) -> String {
    format!("Error consultando el menú: {detail}")
}
