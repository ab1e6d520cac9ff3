//! Adjudication
//!
//! Hands the claim and gathered evidence to the model and interprets its
//! verdict. The evidence is context for the model, not proof; it is told to
//! reason on its own when the evidence is thin.

use tracing::{info, warn};

use crate::domains::verification::models::{AdjudicationResult, EvidenceItem};
use crate::kernel::BaseAI;

pub async fn adjudicate_claim(claim: &str, evidence: &[EvidenceItem], ai: &dyn BaseAI) -> AdjudicationResult {
    let prompt = build_adjudication_prompt(claim, evidence);

    let result = match ai.complete(&prompt).await {
        Ok(response) => AdjudicationResult::from_model_text(&response),
        Err(e) => {
            warn!(error = %e, "Adjudication call failed, recording unverified result");
            AdjudicationResult::call_failed()
        }
    };

    info!(verdict = ?result.result, evidence_count = evidence.len(), "Claim adjudicated");
    result
}

fn build_adjudication_prompt(claim: &str, evidence: &[EvidenceItem]) -> String {
    let evidence_json = serde_json::to_string_pretty(evidence).unwrap_or_else(|_| "[]".to_string());

    format!(
        "You are checking whether a claimed event actually happened.\n\n\
         Claim: \"{claim}\"\n\n\
         Search results that may relate to the claim:\n{evidence_json}\n\n\
         These results are context only. They can be incomplete, outdated or unrelated, \
         so do not treat them as confirmation on their own. If they are not enough to decide, \
         use your own knowledge of public reporting about this event.\n\n\
         Respond with one of these labels:\n\
         - Occurred: the event very likely happened as claimed\n\
         - Unlikely: the event very likely did not happen, or happened very differently\n\
         - Unverified: there is not enough information to decide\n\n\
         Return JSON only, in the form {{\"result\": \"<label>\", \"reasoning\": \"<one short paragraph>\"}}."
    )
}
