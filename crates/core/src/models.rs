use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Two-letter ISO-639-1-ish language code, lower-cased and region-stripped.
/// Statistical detectors return region-qualified codes like `pt-PT`; those are
/// truncated unconditionally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LangCode(String);

pub const CANONICAL_LANG: &str = "es";

impl LangCode {
    pub fn canonical() -> Self {
        Self(CANONICAL_LANG.to_string())
    }

    pub fn parse(raw: &str) -> Self {
        let base = raw
            .trim()
            .to_lowercase()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .chars()
            .take(2)
            .collect::<String>();

        if base.is_empty() {
            Self::canonical()
        } else {
            Self(base)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_canonical(&self) -> bool {
        self.0 == CANONICAL_LANG
    }
}

impl fmt::Display for LangCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    Mixed,
}

impl Sentiment {
    /// Parses the categorical label returned by sentiment services; anything
    /// unexpected reads as Neutral.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_uppercase().as_str() {
            "POSITIVE" => Self::Positive,
            "NEGATIVE" => Self::Negative,
            "MIXED" => Self::Mixed,
            _ => Self::Neutral,
        }
    }

    pub fn is_negative(self) -> bool {
        self == Self::Negative
    }
}

impl Default for Sentiment {
    fn default() -> Self {
        Self::Neutral
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    RestaurantInfo,
    ViewMenu,
    PlaceOrder,
    Confirm,
    Farewell,
    Fallback,
    Unrecognized(String),
}

pub const FALLBACK_INTENT_NAME: &str = "FallbackIntent";

impl Intent {
    /// Missing or empty intent names collapse to the fallback intent; any
    /// other unknown name is kept so the safety-net reply can echo it.
    pub fn from_name(name: Option<&str>) -> Self {
        match name.map(str::trim) {
            None | Some("") => Self::Fallback,
            Some(FALLBACK_INTENT_NAME) => Self::Fallback,
            Some("Greeting") => Self::Greeting,
            Some("RestaurantInfo") => Self::RestaurantInfo,
            Some("ViewMenu") => Self::ViewMenu,
            Some("PlaceOrder") => Self::PlaceOrder,
            Some("Confirm") | Some("ConfirmOrder") => Self::Confirm,
            Some("Farewell") => Self::Farewell,
            Some(other) => Self::Unrecognized(other.to_string()),
        }
    }
}

/// Per-request view of the user text. Built once, immutable afterwards.
#[derive(Debug, Clone)]
pub struct Utterance {
    pub raw_text: String,
    pub original_language: LangCode,
    pub normalized_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub price: String,
    pub variants: String,
}

/// Outcome of dish-entity extraction: structured slot first, keyword scan
/// second, otherwise unresolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemResolution {
    FromSlot(String),
    FromText(String),
    Unresolved,
}

impl ItemResolution {
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::FromSlot(key) | Self::FromText(key) => Some(key),
            Self::Unresolved => None,
        }
    }
}

// ---- inbound envelope (dialog front end contract) ----

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FulfillmentEvent {
    pub session_state: SessionState,
    pub input_transcript: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SessionState {
    pub intent: IntentData,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IntentData {
    pub name: Option<String>,
    pub slots: HashMap<String, Option<Slot>>,
}

impl IntentData {
    /// Populated slot value, interpreted value preferred over the raw one.
    pub fn slot_value(&self, slot_name: &str) -> Option<&str> {
        let value = &self.slots.get(slot_name)?.as_ref()?.value;
        value
            .interpreted_value
            .as_deref()
            .or(value.original_value.as_deref())
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Slot {
    pub value: SlotValue,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SlotValue {
    pub interpreted_value: Option<String>,
    pub original_value: Option<String>,
}

// ---- outbound envelope ----

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub session_state: ResponseSessionState,
    pub messages: Vec<ResponseMessage>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSessionState {
    pub dialog_action: DialogAction,
    pub intent: ClosedIntent,
}

#[derive(Debug, Clone, Serialize)]
pub struct DialogAction {
    #[serde(rename = "type")]
    pub action_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClosedIntent {
    pub name: String,
    pub state: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMessage {
    pub content_type: String,
    pub content: String,
}

impl ResponseEnvelope {
    /// The one well-formed shape the front end ever sees: dialog closed,
    /// intent fulfilled, exactly one plain-text message.
    pub fn closed(intent_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            session_state: ResponseSessionState {
                dialog_action: DialogAction {
                    action_type: "Close".to_string(),
                },
                intent: ClosedIntent {
                    name: intent_name.into(),
                    state: "Fulfilled".to_string(),
                },
            },
            messages: vec![ResponseMessage {
                content_type: "PlainText".to_string(),
                content: message.into(),
            }],
        }
    }

    pub fn technical_error() -> Self {
        Self::closed(FALLBACK_INTENT_NAME, "Error técnico.")
    }
}
