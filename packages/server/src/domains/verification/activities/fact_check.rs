//! Fact-check index evidence
//!
//! Searches a public fact-check explorer for the claim text and turns the
//! first result cards into evidence items carrying publisher and verdict.

use anyhow::Context;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use super::web_search::MAX_RESULTS_PER_SOURCE;
use crate::domains::verification::models::{EvidenceItem, FactCheckDetails};
use crate::kernel::{with_session, BaseBrowser, EvidenceSources};

const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);
const ELEMENT_TIMEOUT: Duration = Duration::from_secs(10);

pub const FACT_CHECK_INPUT: &str = r#"input#search-input[name="query"]"#;

/// Result cards as `{headline, publisher, claim, verdict, link}` objects.
pub const FACT_CHECK_SCRIPT: &str = r#"(() => {
    const text = (root, selector) => {
        const el = root.querySelector(selector);
        return el ? el.innerText.trim() : '';
    };
    const cards = Array.from(document.querySelectorAll('fc-results-list > div > div')).slice(0, 5);
    return cards.map(card => {
        const anchor = card.querySelector('div:nth-child(3) > div:nth-child(3) > div > div:nth-child(2) a');
        return {
            headline: text(card, '.snippet-title'),
            publisher: text(card, 'div:nth-child(3) > div:nth-child(3) > div > span > span:nth-child(1)'),
            claim: text(card, 'div:nth-child(3) > div:nth-child(2)'),
            verdict: text(card, '.rating'),
            link: anchor ? anchor.href : ''
        };
    });
})()"#;

lazy_static! {
    static ref SITE_CLAUSE: Regex = Regex::new(r"(\s*OR\s*)?site:\S+").unwrap();
}

#[derive(Debug, Default, Deserialize)]
struct FactCheckCard {
    #[serde(default)]
    headline: String,
    #[serde(default)]
    publisher: String,
    #[serde(default)]
    claim: String,
    #[serde(default)]
    verdict: String,
    #[serde(default)]
    link: String,
}

impl From<FactCheckCard> for EvidenceItem {
    fn from(card: FactCheckCard) -> Self {
        EvidenceItem::fact_check(
            card.link,
            FactCheckDetails {
                headline: card.headline,
                publisher: card.publisher,
                claim: card.claim,
                verdict: card.verdict,
            },
        )
    }
}

/// Remove `site:` restrictions (and the `OR`s joining them) from a query.
pub fn strip_site_clauses(query: &str) -> String {
    SITE_CLAUSE.replace_all(query, "").trim().to_string()
}

/// Search the fact-check index. Any failure yields no items.
pub async fn search_fact_checks(
    query: &str,
    browser: &dyn BaseBrowser,
    sources: &EvidenceSources,
) -> Vec<EvidenceItem> {
    let cleaned = strip_site_clauses(query);
    if cleaned.is_empty() {
        return Vec::new();
    }

    let outcome = with_session(browser, |session| async move {
        session.goto(&sources.fact_check_url, NAVIGATION_TIMEOUT).await?;
        session.wait_for_selector(FACT_CHECK_INPUT, ELEMENT_TIMEOUT).await?;
        session.submit_text(FACT_CHECK_INPUT, &cleaned, NAVIGATION_TIMEOUT).await?;

        if !sources.results_settle.is_zero() {
            sleep(sources.results_settle).await;
        }

        let value = session.evaluate(FACT_CHECK_SCRIPT).await?;
        let cards: Vec<FactCheckCard> =
            serde_json::from_value(value).context("Fact-check results were not a list of cards")?;
        Ok(cards)
    })
    .await;

    match outcome {
        Ok(cards) => {
            let items: Vec<EvidenceItem> = cards
                .into_iter()
                .filter(|card| !card.link.is_empty() || !card.headline.is_empty())
                .take(MAX_RESULTS_PER_SOURCE)
                .map(Into::into)
                .collect();
            info!(count = items.len(), "Fact-check evidence collected");
            items
        }
        Err(e) => {
            warn!(error = %e, "Fact-check search failed, continuing without fact-checks");
            Vec::new()
        }
    }
}
