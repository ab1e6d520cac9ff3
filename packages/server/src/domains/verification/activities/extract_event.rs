//! Event extraction
//!
//! Asks the model for the event, location and time a claim refers to.
//! Model failures degrade to an empty event; only a blank reply is fatal,
//! and that decision belongs to the caller.

use tracing::{debug, warn};

use crate::common::{json_object_slice, strip_code_fences};
use crate::domains::verification::models::{Claim, ExtractedEvent, Extraction};
use crate::kernel::BaseAI;

pub async fn extract_event(claim: &Claim, ai: &dyn BaseAI) -> Extraction {
    let prompt = build_extraction_prompt(claim.as_str());

    let response = match ai.complete(&prompt).await {
        Ok(r) => r,
        Err(e) => {
            warn!(error = %e, "Event extraction call failed, continuing without event details");
            return Extraction::CallFailed(e.to_string());
        }
    };

    parse_extraction(&response)
}

fn build_extraction_prompt(claim: &str) -> String {
    format!(
        "Extract the event name, location, and time from this claim: \"{}\". \
         Respond in JSON with keys: event, location, time.",
        claim
    )
}

pub fn parse_extraction(response: &str) -> Extraction {
    let cleaned = strip_code_fences(response);
    if cleaned.is_empty() {
        return Extraction::Empty;
    }

    let candidate = json_object_slice(&cleaned).unwrap_or(&cleaned);
    match serde_json::from_str::<ExtractedEvent>(candidate) {
        Ok(event) => {
            debug!(event = %event.event, location = %event.location, time = %event.time, "Event extracted");
            Extraction::Structured(event)
        }
        Err(e) => {
            warn!(error = %e, "Extraction reply was not JSON, continuing without event details");
            Extraction::Unstructured(cleaned)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::MockAI;

    #[test]
    fn test_prompt_embeds_claim() {
        let prompt = build_extraction_prompt("Riots in Manipur last week");
        assert!(prompt.contains("\"Riots in Manipur last week\""));
        assert!(prompt.contains("event, location, time"));
    }

    #[test]
    fn test_parse_fenced_object() {
        let reply = "```json\n{\"event\": \"Riots\", \"location\": \"Manipur\", \"time\": \"last week\"}\n```";
        assert_eq!(
            parse_extraction(reply),
            Extraction::Structured(ExtractedEvent::new("Riots", "Manipur", "last week"))
        );
    }

    #[test]
    fn test_parse_prose_is_unstructured() {
        assert!(matches!(parse_extraction("The event is a riot."), Extraction::Unstructured(_)));
    }

    #[test]
    fn test_parse_blank_is_empty() {
        assert_eq!(parse_extraction("   \n"), Extraction::Empty);
        assert_eq!(parse_extraction("```json\n```"), Extraction::Empty);
    }

    #[tokio::test]
    async fn test_call_failure_degrades() {
        let ai = MockAI::new().with_failure("Extract the event", "quota exceeded");
        let claim = Claim::parse(Some("Flood in Chennai")).unwrap();

        let extraction = extract_event(&claim, &ai).await;

        assert!(matches!(extraction, Extraction::CallFailed(msg) if msg.contains("quota exceeded")));
    }
}
