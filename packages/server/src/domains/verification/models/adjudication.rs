use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::{json_object_slice, strip_code_fences};

/// Reasoning recorded when the adjudication model could not be reached.
pub const ADJUDICATION_FAILED_MESSAGE: &str = "Unverified: Error during verification.";

/// Verdict on whether the claimed event happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Occurred,
    Unlikely,
    Unverified,
    /// Model answered, but not with one of the three labels
    Unknown,
    /// Model call failed; the run still completes
    CallFailed,
}

impl Verdict {
    /// Case-insensitive match on the three labels the model is asked for.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().trim_matches('.').to_lowercase().as_str() {
            "occurred" => Some(Verdict::Occurred),
            "unlikely" => Some(Verdict::Unlikely),
            "unverified" => Some(Verdict::Unverified),
            _ => None,
        }
    }
}

/// Verdict plus the model's explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredAdjudication")]
pub struct AdjudicationResult {
    pub result: Verdict,
    pub reasoning: String,
}

impl AdjudicationResult {
    pub fn new(result: Verdict, reasoning: impl Into<String>) -> Self {
        Self {
            result,
            reasoning: reasoning.into(),
        }
    }

    pub fn call_failed() -> Self {
        Self::new(Verdict::CallFailed, ADJUDICATION_FAILED_MESSAGE)
    }

    /// Interpret a model reply.
    ///
    /// Expects a `{result, reasoning}` object somewhere in the text. Anything
    /// else is kept verbatim as the reasoning of an `Unknown` verdict.
    pub fn from_model_text(text: &str) -> Self {
        let cleaned = strip_code_fences(text);

        let parsed = json_object_slice(&cleaned)
            .and_then(|candidate| serde_json::from_str::<ModelVerdict>(candidate).ok());

        match parsed {
            Some(reply) => reply.into(),
            None => Self::new(Verdict::Unknown, cleaned),
        }
    }
}

#[derive(Deserialize)]
struct ModelVerdict {
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    reasoning: Option<Value>,
}

impl From<ModelVerdict> for AdjudicationResult {
    fn from(reply: ModelVerdict) -> Self {
        let reasoning = match reply.reasoning {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.trim().to_string(),
            Some(other) => other.to_string(),
        };
        let label = reply.result.unwrap_or_default();
        if let Some(verdict) = Verdict::from_label(&label) {
            return Self::new(verdict, reasoning);
        }

        // Keep the unrecognised label visible to the reader
        let label = label.trim();
        let text = match (label.is_empty(), reasoning.is_empty()) {
            (true, _) => reasoning,
            (false, true) => label.to_string(),
            (false, false) => format!("{}: {}", label, reasoning),
        };
        Self::new(Verdict::Unknown, text)
    }
}

/// Stored rows are either the tagged object or a legacy plain string.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredAdjudication {
    Tagged {
        result: Verdict,
        #[serde(default)]
        reasoning: String,
    },
    Loose(ModelVerdict),
    Text(String),
}

impl From<StoredAdjudication> for AdjudicationResult {
    fn from(stored: StoredAdjudication) -> Self {
        match stored {
            StoredAdjudication::Tagged { result, reasoning } => Self::new(result, reasoning),
            StoredAdjudication::Loose(reply) => reply.into(),
            StoredAdjudication::Text(text) => Self::from_model_text(&text),
        }
    }
}
