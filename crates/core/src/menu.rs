pub const HAMBURGUESA: &str = "Hamburguesa";
pub const PIZZA: &str = "Pizza";
pub const SALCHIPAPA: &str = "Salchipapa";
pub const PERRO: &str = "Perro";

/// Ordered stem rules. User text and slot values arrive with mixed casing,
/// language mixing and singular/plural variation; the catalog key space is a
/// small fixed enumeration, so substring stems are enough.
const STEM_RULES: &[(&[&str], &str)] = &[
    (&["hamb", "burg"], HAMBURGUESA),
    (&["pizz"], PIZZA),
    (&["salch"], SALCHIPAPA),
    (&["perr", "cachorro"], PERRO),
];

/// Maps a raw dish token onto its canonical catalog key. Returns `None` only
/// for blank input; unknown dishes pass through title-cased so the lookup can
/// answer with a "we don't have X" suggestion.
pub fn normalize_dish_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lower = trimmed.to_lowercase();
    for (stems, canonical) in STEM_RULES {
        if stems.iter().any(|stem| lower.contains(stem)) {
            return Some(canonical.to_string());
        }
    }

    let mut item = title_case(&lower);
    if item.ends_with('s') && item.chars().count() > 4 {
        item.pop();
    }
    Some(item)
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
