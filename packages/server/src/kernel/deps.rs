//! Server dependencies for the verification pipeline (using traits for testability)
//!
//! This module provides the central dependency container handed to every
//! verification run. All external services sit behind trait objects so tests
//! can swap in the mocks from `test_dependencies`.

use std::sync::Arc;
use std::time::Duration;

use super::llm_request::{TimeoutAI, COMPLETION_TIMEOUT};
use super::{BaseAI, BaseBrowser, BaseVerificationStore, ProgressPublisher};

/// Default web search front page.
pub const DEFAULT_SEARCH_URL: &str = "https://search.yahoo.com/";

/// Default fact-check index search page.
pub const DEFAULT_FACT_CHECK_URL: &str = "https://toolbox.google.com/factcheck/explorer";

/// Where evidence is fetched from.
#[derive(Debug, Clone)]
pub struct EvidenceSources {
    pub search_url: String,
    pub fact_check_url: String,
    /// Pause after submitting a fact-check query so results can render
    pub results_settle: Duration,
}

impl Default for EvidenceSources {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            fact_check_url: DEFAULT_FACT_CHECK_URL.to_string(),
            results_settle: Duration::from_millis(2000),
        }
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Dependencies shared by all verification runs
#[derive(Clone)]
pub struct ServerDeps {
    pub ai: Arc<dyn BaseAI>,
    pub browser: Arc<dyn BaseBrowser>,
    pub store: Arc<dyn BaseVerificationStore>,
    /// Sink for run progress; the transport layer decides who hears it
    pub progress: Arc<dyn ProgressPublisher>,
    pub sources: EvidenceSources,
    /// Hand the query builder's trusted domains to the web search instead of
    /// asking the model again
    pub reuse_trusted_domains: bool,
}

impl ServerDeps {
    /// Model calls are bounded by `COMPLETION_TIMEOUT` whatever backend is
    /// passed in.
    pub fn new(
        ai: Arc<dyn BaseAI>,
        browser: Arc<dyn BaseBrowser>,
        store: Arc<dyn BaseVerificationStore>,
        progress: Arc<dyn ProgressPublisher>,
    ) -> Self {
        Self {
            ai: Arc::new(TimeoutAI::new(ai, COMPLETION_TIMEOUT)),
            browser,
            store,
            progress,
            sources: EvidenceSources::default(),
            reuse_trusted_domains: false,
        }
    }

    pub fn with_sources(mut self, sources: EvidenceSources) -> Self {
        self.sources = sources;
        self
    }

    pub fn with_reused_trusted_domains(mut self, reuse: bool) -> Self {
        self.reuse_trusted_domains = reuse;
        self
    }
}
