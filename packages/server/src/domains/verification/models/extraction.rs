use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Event details pulled out of a claim. Unknown fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedEvent {
    #[serde(default, deserialize_with = "lenient_field")]
    pub event: String,

    #[serde(default, deserialize_with = "lenient_field")]
    pub location: String,

    #[serde(default, deserialize_with = "lenient_field")]
    pub time: String,
}

impl ExtractedEvent {
    pub fn new(
        event: impl Into<String>,
        location: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            event: event.into(),
            location: location.into(),
            time: time.into(),
        }
    }

    /// Non-empty fields in event, location, time order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        [&self.event, &self.location, &self.time]
            .into_iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    pub fn is_blank(&self) -> bool {
        self.terms().next().is_none()
    }
}

/// Placeholder answers models give for "I don't know".
const PLACEHOLDERS: &[&str] = &["unknown", "n/a", "na", "none", "null", "not specified", "unspecified"];

fn lenient_field<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let text = match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        Some(other) => other.to_string(),
    };

    if PLACEHOLDERS.contains(&text.to_lowercase().as_str()) {
        Ok(String::new())
    } else {
        Ok(text)
    }
}

/// Outcome of asking the model for event details.
///
/// Only `Empty` stops a run; the other variants continue with whatever
/// structured fields could be recovered.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// Model returned a parseable object
    Structured(ExtractedEvent),
    /// Model returned text that isn't the expected object
    Unstructured(String),
    /// The model call itself failed
    CallFailed(String),
    /// Model returned nothing usable at all
    Empty,
}

impl Extraction {
    /// Structured fields if any, otherwise an all-empty event.
    pub fn into_event(self) -> ExtractedEvent {
        match self {
            Extraction::Structured(event) => event,
            _ => ExtractedEvent::default(),
        }
    }
}
