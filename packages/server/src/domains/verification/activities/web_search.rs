//! Web search evidence
//!
//! Runs the query on a search front page in a headless browser, keeps result
//! links on trusted domains, and records a short snippet for each one.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::resolve_trusted_domains;
use crate::common::truncate_chars;
use crate::domains::verification::models::{EvidenceItem, TrustedDomainSet, FAILED_SNIPPET};
use crate::kernel::{with_session, BaseAI, BaseBrowser, BrowserSession, EvidenceSources};

/// Maximum evidence items taken from one source.
pub const MAX_RESULTS_PER_SOURCE: usize = 5;

const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);
const ELEMENT_TIMEOUT: Duration = Duration::from_secs(10);
const SNIPPET_TIMEOUT: Duration = Duration::from_secs(20);
const MAX_SNIPPET_CHARS: usize = 500;

pub const SEARCH_INPUT: &str = r#"input[name="p"]"#;

/// Result anchors on the search results page, as absolute hrefs.
pub const SEARCH_LINKS_SCRIPT: &str = r#"(() => Array.from(
    document.querySelectorAll('ol > li > div > div:nth-child(1) > a')
).map(a => a.href).filter(Boolean))()"#;

/// Meta description, else the first paragraph, else an empty string.
pub const SNIPPET_SCRIPT: &str = r#"(() => {
    const meta = document.querySelector('meta[name="description"]');
    if (meta && meta.content) return meta.content;
    const p = document.querySelector('p');
    if (p && p.innerText) return p.innerText;
    return '';
})()"#;

/// Search the web for `query`.
///
/// When `known_domains` is `None` the trusted domains are looked up again for
/// this query. Failures end the search early and return whatever was
/// collected, which may be nothing.
pub async fn search_web(
    query: &str,
    known_domains: Option<&TrustedDomainSet>,
    ai: &dyn BaseAI,
    browser: &dyn BaseBrowser,
    sources: &EvidenceSources,
) -> Vec<EvidenceItem> {
    let outcome = with_session(browser, |session| async move {
        let links = collect_result_links(session.as_ref(), query, sources).await?;
        debug!(count = links.len(), "Search result links collected");

        let resolved;
        let domains = match known_domains {
            Some(domains) => domains,
            None => {
                resolved = resolve_trusted_domains(query, ai).await;
                &resolved
            }
        };
        if domains.is_empty() {
            warn!("No trusted domains found, skipping domain filtering");
        }

        let mut items = Vec::new();
        for link in select_links(links, domains) {
            let snippet = match scrape_snippet(session.as_ref(), &link).await {
                Ok(snippet) => snippet,
                Err(e) => {
                    debug!(link = %link, error = %e, "Snippet scrape failed");
                    FAILED_SNIPPET.to_string()
                }
            };
            items.push(EvidenceItem::web(link, snippet));
        }
        Ok(items)
    })
    .await;

    match outcome {
        Ok(items) => {
            info!(count = items.len(), "Web search evidence collected");
            items
        }
        Err(e) => {
            warn!(error = %e, "Web search failed, continuing without web evidence");
            Vec::new()
        }
    }
}

async fn collect_result_links(
    session: &dyn BrowserSession,
    query: &str,
    sources: &EvidenceSources,
) -> Result<Vec<String>> {
    session.goto(&sources.search_url, NAVIGATION_TIMEOUT).await?;
    session.wait_for_selector(SEARCH_INPUT, ELEMENT_TIMEOUT).await?;
    session.submit_text(SEARCH_INPUT, query, NAVIGATION_TIMEOUT).await?;

    let value = session.evaluate(SEARCH_LINKS_SCRIPT).await?;
    serde_json::from_value(value).context("Search results were not a list of links")
}

async fn scrape_snippet(session: &dyn BrowserSession, link: &str) -> Result<String> {
    session.goto(link, SNIPPET_TIMEOUT).await?;
    let value = session.evaluate(SNIPPET_SCRIPT).await?;
    let text = value.as_str().unwrap_or_default().trim();
    Ok(truncate_chars(text, MAX_SNIPPET_CHARS))
}

/// Keep links on trusted domains (all links when the set is empty), drop
/// duplicates, and cap the list. Order is preserved.
pub fn select_links(links: Vec<String>, domains: &TrustedDomainSet) -> Vec<String> {
    let mut seen = HashSet::new();
    links
        .into_iter()
        .filter(|link| domains.is_empty() || domains.matches(link))
        .filter(|link| seen.insert(link.clone()))
        .take(MAX_RESULTS_PER_SOURCE)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_select_filters_to_trusted_domains() {
        let domains = TrustedDomainSet::from_domains(["bbc.com"]);
        let selected = select_links(
            links(&["https://bbc.com/a", "https://spam.net/b", "https://www.bbc.com/c"]),
            &domains,
        );
        assert_eq!(selected, links(&["https://bbc.com/a", "https://www.bbc.com/c"]));
    }

    #[test]
    fn test_select_without_domains_keeps_everything() {
        let selected = select_links(links(&["https://a.com", "https://b.com"]), &TrustedDomainSet::default());
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn test_select_dedupes_then_caps() {
        let raw = links(&[
            "https://a.com/1",
            "https://a.com/1",
            "https://a.com/2",
            "https://a.com/3",
            "https://a.com/4",
            "https://a.com/5",
            "https://a.com/6",
        ]);
        let selected = select_links(raw, &TrustedDomainSet::from_domains(["a.com"]));
        assert_eq!(selected.len(), MAX_RESULTS_PER_SOURCE);
        assert_eq!(selected[1], "https://a.com/2");
    }
}
