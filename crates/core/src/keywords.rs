use crate::menu::{HAMBURGUESA, PERRO, PIZZA, SALCHIPAPA};

pub fn contains_any(input: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| input.contains(needle))
}

/// Explicit bad-mood markers, scanned even when the sentiment service
/// reports Neutral or is unavailable.
pub const NEGATIVE_TONE: &[&str] = &["triste", "mal", "furioso"];

/// Vague "feed me" phrasings that short-circuit ordering into a menu tease.
pub const GENERIC_CRAVING: &[&str] = &[
    "algo", "comer", "hambre", "menu", "carta", "comida", "food", "fome",
];

#[derive(Debug, Clone, Copy)]
pub struct TopicRule {
    pub keywords: &'static [&'static str],
    pub reply: &'static str,
}

/// Restaurant-info topics in priority order: delivery, payment, hours.
/// First match wins.
pub const INFO_TOPICS: &[TopicRule] = &[
    TopicRule {
        keywords: &["domicilio", "casa", "lleva", "entrega"],
        reply: "¡Claro que sí! 🛵 Domicilios gratis en 20 minutos.",
    },
    TopicRule {
        keywords: &["pago", "tarjeta", "nequi"],
        reply: "Aceptamos Nequi, Daviplata, Efectivo y Tarjetas. 💳",
    },
    TopicRule {
        keywords: &["horario", "abre", "hora"],
        reply: "Abrimos todos los días hasta la medianoche. 🌙",
    },
];

pub const INFO_DEFAULT: &str = "Estamos en la Zona Rosa, abrimos hasta medianoche.";

#[derive(Debug, Clone, Copy)]
pub struct DishRule {
    pub dish: &'static str,
    /// Stems matched against the canonical-language text.
    pub normalized: &'static [&'static str],
    /// Loan-word stems matched against the original text; these survive
    /// translation untransformed ("burger", "cachorro").
    pub original: &'static [&'static str],
}

impl DishRule {
    pub fn matches(&self, normalized_text: &str, original_text: &str) -> bool {
        contains_any(normalized_text, self.normalized) || contains_any(original_text, self.original)
    }
}

/// Dish scan for the fallback intent, fixed priority order.
pub const FALLBACK_DISH_SCAN: &[DishRule] = &[
    DishRule {
        dish: SALCHIPAPA,
        normalized: &["salchipapa"],
        original: &["salchipapa"],
    },
    DishRule {
        dish: PIZZA,
        normalized: &["pizza"],
        original: &[],
    },
    DishRule {
        dish: HAMBURGUESA,
        normalized: &["hamburguesa"],
        original: &["burger", "hambúrguer"],
    },
    DishRule {
        dish: PERRO,
        normalized: &["perro"],
        original: &["cachorro"],
    },
];

/// Dish scan inside the order sub-flow; same priority, slightly different
/// loan-word set ("hot" as in hot dog, bare "burg").
pub const ORDER_DISH_SCAN: &[DishRule] = &[
    DishRule {
        dish: SALCHIPAPA,
        normalized: &["salchipapa"],
        original: &[],
    },
    DishRule {
        dish: PIZZA,
        normalized: &["pizza"],
        original: &[],
    },
    DishRule {
        dish: HAMBURGUESA,
        normalized: &["hamburguesa"],
        original: &["burg"],
    },
    DishRule {
        dish: PERRO,
        normalized: &["perro"],
        original: &["hot", "cachorro"],
    },
];

pub const FALLBACK_DELIVERY: &[&str] = &["casa", "traigan"];

pub fn scan_dishes(
    rules: &[DishRule],
    normalized_text: &str,
    original_text: &str,
) -> Option<&'static str> {
    rules
        .iter()
        .find(|rule| rule.matches(normalized_text, original_text))
        .map(|rule| rule.dish)
}
