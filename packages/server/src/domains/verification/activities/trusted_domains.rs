//! Trusted domain lookup
//!
//! Asks the model which news or official domains are reputable for a subject.
//! Any failure yields an empty set, which callers treat as "don't filter".

use tracing::{debug, warn};

use crate::domains::verification::models::TrustedDomainSet;
use crate::kernel::BaseAI;

pub async fn resolve_trusted_domains(subject: &str, ai: &dyn BaseAI) -> TrustedDomainSet {
    let prompt = build_trusted_domains_prompt(subject);

    let response = match ai.complete(&prompt).await {
        Ok(r) => r,
        Err(e) => {
            warn!(error = %e, "Trusted domain lookup failed, using no domain filter");
            return TrustedDomainSet::default();
        }
    };

    match TrustedDomainSet::from_model_text(&response) {
        Some(domains) => {
            debug!(count = domains.len(), "Trusted domains resolved");
            domains
        }
        None => {
            warn!(response = %response, "Trusted domain reply was not a JSON list");
            TrustedDomainSet::default()
        }
    }
}

fn build_trusted_domains_prompt(subject: &str) -> String {
    format!(
        "For the following topic, list the most relevant and reputable news or official domains \
         (e.g., bbc.com, reuters.com, gov.in). Respond with a JSON array of domain names only.\n\n\
         Topic: \"{}\"",
        subject
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::MockAI;

    #[tokio::test]
    async fn test_resolves_list() {
        let ai = MockAI::new().with_response("reputable", r#"["thehindu.com", "ndtv.com"]"#);

        let domains = resolve_trusted_domains("Cyclone in Odisha", &ai).await;

        assert_eq!(domains.iter().collect::<Vec<_>>(), vec!["thehindu.com", "ndtv.com"]);
        assert!(ai.calls()[0].contains("Cyclone in Odisha"));
    }

    #[tokio::test]
    async fn test_prose_reply_gives_empty_set() {
        let ai = MockAI::new().with_response("reputable", "BBC is a good source.");
        assert!(resolve_trusted_domains("anything", &ai).await.is_empty());
    }

    #[tokio::test]
    async fn test_call_failure_gives_empty_set() {
        let ai = MockAI::new().with_failure("reputable", "timeout");
        assert!(resolve_trusted_domains("anything", &ai).await.is_empty());
    }
}
