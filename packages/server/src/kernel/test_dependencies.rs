// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

use super::{
    BaseAI, BaseBrowser, BaseVerificationStore, BrowserSession, EvidenceSources,
    ProgressPublisher, ServerDeps,
};
use crate::domains::verification::activities::fact_check::{FACT_CHECK_INPUT, FACT_CHECK_SCRIPT};
use crate::domains::verification::activities::web_search::{
    SEARCH_INPUT, SEARCH_LINKS_SCRIPT, SNIPPET_SCRIPT,
};
use crate::domains::verification::models::verification_event::normalize_email;
use crate::domains::verification::{NewVerificationEvent, ProgressEvent, VerificationEvent};

// =============================================================================
// Mock AI (Generic LLM capabilities)
// =============================================================================

#[derive(Clone)]
enum MockReply {
    Text(String),
    Failure(String),
}

/// Replies are chosen by the first rule whose pattern appears in the prompt.
pub struct MockAI {
    rules: Arc<Mutex<Vec<(String, MockReply)>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockAI {
    pub fn new() -> Self {
        Self {
            rules: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer prompts containing `pattern` with `response`
    pub fn with_response(self, pattern: &str, response: impl Into<String>) -> Self {
        self.rules
            .lock()
            .unwrap()
            .push((pattern.to_string(), MockReply::Text(response.into())));
        self
    }

    /// Fail prompts containing `pattern`
    pub fn with_failure(self, pattern: &str, message: &str) -> Self {
        self.rules
            .lock()
            .unwrap()
            .push((pattern.to_string(), MockReply::Failure(message.to_string())));
        self
    }

    /// Get all prompts that were sent to the AI
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of prompts containing the given text
    pub fn calls_containing(&self, text: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.contains(text))
            .count()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockAI {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseAI for MockAI {
    async fn complete(&self, prompt: &str) -> Result<String> {
        // Record the call
        self.calls.lock().unwrap().push(prompt.to_string());

        let reply = self
            .rules
            .lock()
            .unwrap()
            .iter()
            .find(|(pattern, _)| prompt.contains(pattern.as_str()))
            .map(|(_, reply)| reply.clone());

        match reply {
            Some(MockReply::Text(text)) => Ok(text),
            Some(MockReply::Failure(message)) => Err(anyhow!("{}", message)),
            None => Err(anyhow!("MockAI: no response configured for prompt")),
        }
    }
}

// =============================================================================
// Mock Browser
// =============================================================================

#[derive(Default)]
struct MockBrowserState {
    search_links: Vec<String>,
    snippets: HashMap<String, String>,
    failing_urls: HashSet<String>,
    fact_checks: Vec<Value>,
    fact_check_unavailable: bool,
    search_unavailable: bool,
    visited: Vec<String>,
    submitted: Vec<String>,
    opened: usize,
    closed: usize,
}

/// Scripted browser. Recognizes the search, snippet and fact-check scripts
/// and answers them from configured data.
#[derive(Clone, Default)]
pub struct MockBrowser {
    state: Arc<Mutex<MockBrowserState>>,
}

impl MockBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Links returned by the search results page, in order
    pub fn with_search_links(self, links: &[&str]) -> Self {
        self.state.lock().unwrap().search_links = links.iter().map(|l| l.to_string()).collect();
        self
    }

    pub fn with_snippet(self, url: &str, snippet: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .snippets
            .insert(url.to_string(), snippet.to_string());
        self
    }

    /// Navigation to this URL fails
    pub fn with_failing_url(self, url: &str) -> Self {
        self.state.lock().unwrap().failing_urls.insert(url.to_string());
        self
    }

    /// Add a fact-check result card
    pub fn with_fact_check(self, headline: &str, publisher: &str, claim: &str, verdict: &str, link: &str) -> Self {
        self.state.lock().unwrap().fact_checks.push(json!({
            "headline": headline,
            "publisher": publisher,
            "claim": claim,
            "verdict": verdict,
            "link": link,
        }));
        self
    }

    /// The fact-check search box never appears
    pub fn fact_check_unavailable(self) -> Self {
        self.state.lock().unwrap().fact_check_unavailable = true;
        self
    }

    /// The web search box never appears
    pub fn search_unavailable(self) -> Self {
        self.state.lock().unwrap().search_unavailable = true;
        self
    }

    /// URLs navigated to, across all sessions
    pub fn visited(&self) -> Vec<String> {
        self.state.lock().unwrap().visited.clone()
    }

    /// Text typed into search inputs, across all sessions
    pub fn submitted_queries(&self) -> Vec<String> {
        self.state.lock().unwrap().submitted.clone()
    }

    pub fn sessions_opened(&self) -> usize {
        self.state.lock().unwrap().opened
    }

    pub fn sessions_closed(&self) -> usize {
        self.state.lock().unwrap().closed
    }
}

#[async_trait]
impl BaseBrowser for MockBrowser {
    async fn open_session(&self) -> Result<Box<dyn BrowserSession>> {
        self.state.lock().unwrap().opened += 1;
        Ok(Box::new(MockSession {
            state: self.state.clone(),
            current_url: Mutex::new(String::new()),
        }))
    }
}

struct MockSession {
    state: Arc<Mutex<MockBrowserState>>,
    current_url: Mutex<String>,
}

#[async_trait]
impl BrowserSession for MockSession {
    async fn goto(&self, url: &str, _timeout: Duration) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.visited.push(url.to_string());
        if state.failing_urls.contains(url) {
            bail!("MockBrowser: navigation to {} failed", url);
        }
        *self.current_url.lock().unwrap() = url.to_string();
        Ok(())
    }

    async fn wait_for_selector(&self, selector: &str, _timeout: Duration) -> Result<()> {
        let state = self.state.lock().unwrap();
        let missing = (selector == FACT_CHECK_INPUT && state.fact_check_unavailable)
            || (selector == SEARCH_INPUT && state.search_unavailable);
        if missing {
            bail!("MockBrowser: selector {} not found", selector);
        }
        Ok(())
    }

    async fn submit_text(&self, _selector: &str, text: &str, _timeout: Duration) -> Result<()> {
        self.state.lock().unwrap().submitted.push(text.to_string());
        Ok(())
    }

    async fn evaluate(&self, script: &str) -> Result<Value> {
        let state = self.state.lock().unwrap();
        if script == SEARCH_LINKS_SCRIPT {
            Ok(json!(state.search_links))
        } else if script == FACT_CHECK_SCRIPT {
            Ok(Value::Array(state.fact_checks.clone()))
        } else if script == SNIPPET_SCRIPT {
            let url = self.current_url.lock().unwrap().clone();
            Ok(json!(state.snippets.get(&url).cloned().unwrap_or_default()))
        } else {
            bail!("MockBrowser: unexpected script")
        }
    }

    async fn close(&self) -> Result<()> {
        self.state.lock().unwrap().closed += 1;
        Ok(())
    }
}

// =============================================================================
// In-memory Verification Store
// =============================================================================

#[derive(Default)]
pub struct InMemoryVerificationStore {
    events: Mutex<Vec<VerificationEvent>>,
    fail_saves: bool,
    fail_ping: bool,
}

impl InMemoryVerificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every save returns an error
    pub fn failing() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    /// Health pings return an error
    pub fn unreachable() -> Self {
        Self {
            fail_saves: true,
            fail_ping: true,
            ..Self::default()
        }
    }

    pub fn events(&self) -> Vec<VerificationEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseVerificationStore for InMemoryVerificationStore {
    async fn save(&self, event: NewVerificationEvent) -> Result<VerificationEvent> {
        if self.fail_saves {
            bail!("storage unavailable");
        }
        let saved = VerificationEvent {
            id: Uuid::now_v7(),
            claim: event.claim,
            extraction: event.extraction,
            evidence: event.evidence,
            verification: event.verification,
            user_email: event.user_email,
            created_at: Utc::now(),
        };
        self.events.lock().unwrap().push(saved.clone());
        Ok(saved)
    }

    async fn find_by_user(&self, email: &str) -> Result<Vec<VerificationEvent>> {
        let email = normalize_email(email);
        let mut events: Vec<VerificationEvent> = self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.user_email == email)
            .cloned()
            .collect();
        events.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(events)
    }

    async fn ping(&self) -> Result<()> {
        if self.fail_ping {
            bail!("connection refused");
        }
        Ok(())
    }
}

// =============================================================================
// Recording Publisher
// =============================================================================

#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressPublisher for RecordingPublisher {
    fn publish(&self, event: ProgressEvent) {
        self.events.lock().unwrap().push(event);
    }
}

// =============================================================================
// TestDependencies - Builder for test dependencies
// =============================================================================

#[derive(Clone)]
pub struct TestDependencies {
    pub ai: Arc<MockAI>,
    pub browser: Arc<MockBrowser>,
    pub store: Arc<InMemoryVerificationStore>,
    pub progress: Arc<RecordingPublisher>,
    pub reuse_trusted_domains: bool,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            ai: Arc::new(MockAI::new()),
            browser: Arc::new(MockBrowser::new()),
            store: Arc::new(InMemoryVerificationStore::new()),
            progress: Arc::new(RecordingPublisher::new()),
            reuse_trusted_domains: false,
        }
    }

    /// Set a mock AI
    pub fn mock_ai(mut self, ai: MockAI) -> Self {
        self.ai = Arc::new(ai);
        self
    }

    /// Set a mock browser
    pub fn mock_browser(mut self, browser: MockBrowser) -> Self {
        self.browser = Arc::new(browser);
        self
    }

    /// Set the verification store
    pub fn mock_store(mut self, store: InMemoryVerificationStore) -> Self {
        self.store = Arc::new(store);
        self
    }

    pub fn reuse_trusted_domains(mut self) -> Self {
        self.reuse_trusted_domains = true;
        self
    }

    /// Convert into ServerDeps for testing. Fact-check results are read
    /// without the render pause.
    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(
            self.ai.clone(),
            self.browser.clone(),
            self.store.clone(),
            self.progress.clone(),
        )
        .with_sources(EvidenceSources {
            results_settle: Duration::ZERO,
            ..EvidenceSources::default()
        })
        .with_reused_trusted_domains(self.reuse_trusted_domains)
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
