use tracing::info;

use super::{search_fact_checks, search_web};
use crate::domains::verification::models::{EvidenceItem, TrustedDomainSet};
use crate::kernel::{BaseAI, BaseBrowser, EvidenceSources};

/// Web search results first, then fact-check index results.
///
/// Each source fails independently; a run with no evidence at all is still
/// adjudicated.
pub async fn gather_evidence(
    query: &str,
    known_domains: Option<&TrustedDomainSet>,
    ai: &dyn BaseAI,
    browser: &dyn BaseBrowser,
    sources: &EvidenceSources,
) -> Vec<EvidenceItem> {
    let mut evidence = search_web(query, known_domains, ai, browser, sources).await;
    let fact_checks = search_fact_checks(query, browser, sources).await;

    info!(
        web_results = evidence.len(),
        fact_checks = fact_checks.len(),
        "Evidence gathered"
    );

    evidence.extend(fact_checks);
    evidence
}
