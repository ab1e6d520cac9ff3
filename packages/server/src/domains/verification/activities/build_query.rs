//! Search query construction
//!
//! Query text is the claim followed by the extracted event terms, then a
//! `site:` clause restricting results to trusted domains when any are known.

use tracing::info;

use super::resolve_trusted_domains;
use crate::domains::verification::models::{Claim, ExtractedEvent, TrustedDomainSet};
use crate::kernel::BaseAI;

/// Query text plus the domains its `site:` clause was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub domains: TrustedDomainSet,
}

pub async fn build_search_query(claim: &Claim, event: &ExtractedEvent, ai: &dyn BaseAI) -> SearchQuery {
    let domains = resolve_trusted_domains(claim.as_str(), ai).await;
    let text = compose_search_query(claim.as_str(), event, &domains);

    info!(query = %text, trusted_domains = domains.len(), "Search query built");

    SearchQuery { text, domains }
}

/// Pure query composition. Empty parts are skipped so the text never has
/// doubled or trailing spaces.
pub fn compose_search_query(claim: &str, event: &ExtractedEvent, domains: &TrustedDomainSet) -> String {
    let mut query = std::iter::once(claim.trim())
        .chain(event.terms())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if let Some(clause) = domains.site_clause() {
        if !query.is_empty() {
            query.push(' ');
        }
        query.push_str(&clause);
    }

    query
}
