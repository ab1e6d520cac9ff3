//! Verification pipeline
//!
//! Runs one claim through extract -> query -> evidence -> adjudicate -> persist,
//! reporting each stage to the progress publisher. A run ends in exactly one
//! terminal event: `verification_complete` on success, `error` otherwise.

use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::{adjudicate_claim, build_search_query, extract_event, gather_evidence};
use crate::domains::verification::models::{
    AdjudicationResult, Claim, EvidenceItem, ExtractedEvent, Extraction, NewVerificationEvent,
    PipelineStage, ProgressEvent, VerificationEvent,
};
use crate::domains::verification::VerificationError;
use crate::kernel::{ProgressPublisher, ServerDeps};

/// Result returned to the caller of a successful run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationOutcome {
    pub claim: String,
    pub extraction: ExtractedEvent,
    pub evidence: Vec<EvidenceItem>,
    pub verification: AdjudicationResult,
    /// Id of the persisted record
    pub id: Uuid,
}

impl From<VerificationEvent> for VerificationOutcome {
    fn from(event: VerificationEvent) -> Self {
        Self {
            claim: event.claim,
            extraction: event.extraction,
            evidence: event.evidence,
            verification: event.verification,
            id: event.id,
        }
    }
}

/// Verify a claim on behalf of `user_email`.
///
/// A missing claim is rejected before any progress is published.
pub async fn verify_claim(
    raw_claim: Option<&str>,
    user_email: &str,
    deps: &ServerDeps,
) -> Result<VerificationOutcome, VerificationError> {
    let claim = Claim::parse(raw_claim)?;
    let mut run = RunProgress::start(deps.progress.clone(), &claim);

    info!(run_id = %run.run_id, "Verification started");

    match run_pipeline(&claim, user_email, deps, &mut run).await {
        Ok(outcome) => {
            info!(run_id = %run.run_id, id = %outcome.id, verdict = ?outcome.verification.result, "Verification complete");
            run.complete(outcome.id);
            Ok(outcome)
        }
        Err(e) => {
            error!(run_id = %run.run_id, error = %e, "Verification failed");
            run.fail(&e);
            Err(e)
        }
    }
}

async fn run_pipeline(
    claim: &Claim,
    user_email: &str,
    deps: &ServerDeps,
    run: &mut RunProgress,
) -> Result<VerificationOutcome, VerificationError> {
    let ai = deps.ai.as_ref();

    run.enter(PipelineStage::Extracting);
    let event = match extract_event(claim, ai).await {
        Extraction::Empty => return Err(VerificationError::EmptyExtraction),
        Extraction::Unstructured(text) => {
            warn!(run_id = %run.run_id, reply = %text, "Using empty event details");
            ExtractedEvent::default()
        }
        other => other.into_event(),
    };

    run.enter(PipelineStage::QueryBuilding);
    let query = build_search_query(claim, &event, ai).await;

    run.enter(PipelineStage::Fetching);
    let known_domains = deps.reuse_trusted_domains.then_some(&query.domains);
    let evidence = gather_evidence(
        &query.text,
        known_domains,
        ai,
        deps.browser.as_ref(),
        &deps.sources,
    )
    .await;

    run.enter(PipelineStage::Adjudicating);
    let verification = adjudicate_claim(claim.as_str(), &evidence, ai).await;

    run.enter(PipelineStage::Persisting);
    let record = NewVerificationEvent::new(claim.as_str(), event, evidence, verification, user_email);
    let saved = deps
        .store
        .save(record)
        .await
        .map_err(VerificationError::Storage)?;

    Ok(saved.into())
}

/// Publishes one run's events and keeps them well-formed: progress never
/// goes backwards and nothing follows a terminal event.
struct RunProgress {
    run_id: Uuid,
    publisher: Arc<dyn ProgressPublisher>,
    last_progress: u8,
    finished: bool,
}

impl RunProgress {
    fn start(publisher: Arc<dyn ProgressPublisher>, claim: &Claim) -> Self {
        let run_id = Uuid::new_v4();
        publisher.publish(ProgressEvent::started(run_id, claim.as_str()));
        Self {
            run_id,
            publisher,
            last_progress: PipelineStage::Started.progress(),
            finished: false,
        }
    }

    fn enter(&mut self, stage: PipelineStage) {
        if self.finished || stage.progress() < self.last_progress {
            return;
        }
        self.last_progress = stage.progress();
        self.publisher.publish(ProgressEvent::stage(self.run_id, stage));
    }

    fn complete(&mut self, id: Uuid) {
        if self.finished {
            return;
        }
        self.finished = true;
        self.last_progress = PipelineStage::Completed.progress();
        self.publisher.publish(ProgressEvent::completed(self.run_id, id));
    }

    fn fail(&mut self, error: &VerificationError) {
        if self.finished {
            return;
        }
        self.finished = true;
        self.publisher
            .publish(ProgressEvent::failed(self.run_id, &error.to_string()));
    }
}
