// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Prompting, scraping scripts and verdict parsing live in domain activities
// that call through these traits.
//
// Naming convention: Base* for trait names (e.g., BaseAI, BaseBrowser)

use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

use crate::domains::verification::{NewVerificationEvent, ProgressEvent, VerificationEvent};

// =============================================================================
// AI Trait (Infrastructure - Generic LLM capabilities)
// =============================================================================

#[async_trait]
pub trait BaseAI: Send + Sync {
    /// Complete a prompt with an LLM (returns raw text response)
    async fn complete(&self, prompt: &str) -> Result<String>;
}

// =============================================================================
// Browser Traits (Infrastructure - headless page automation)
// =============================================================================

/// Launches isolated browser sessions.
#[async_trait]
pub trait BaseBrowser: Send + Sync {
    async fn open_session(&self) -> Result<Box<dyn BrowserSession>>;
}

/// A single browser with one active page.
///
/// Callers must `close()` every session they open; use
/// [`crate::kernel::with_session`] rather than calling this directly.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Navigate the page and wait for the load to finish.
    async fn goto(&self, url: &str, timeout: Duration) -> Result<()>;

    /// Wait until `selector` matches an element on the current page.
    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()>;

    /// Type `text` into the element at `selector`, press Enter and wait for
    /// the resulting navigation.
    async fn submit_text(&self, selector: &str, text: &str, timeout: Duration) -> Result<()>;

    /// Evaluate a script on the current page and return its JSON result.
    async fn evaluate(&self, script: &str) -> Result<serde_json::Value>;

    /// Release the browser process and its resources.
    async fn close(&self) -> Result<()>;
}

// =============================================================================
// Storage Trait
// =============================================================================

#[async_trait]
pub trait BaseVerificationStore: Send + Sync {
    async fn save(&self, event: NewVerificationEvent) -> Result<VerificationEvent>;

    /// Events owned by `email`, newest first.
    async fn find_by_user(&self, email: &str) -> Result<Vec<VerificationEvent>>;

    /// Cheap connectivity check for health reporting.
    async fn ping(&self) -> Result<()>;
}

// =============================================================================
// Progress Trait
// =============================================================================

/// Fire-and-forget sink for run progress. Must never block or fail the run.
pub trait ProgressPublisher: Send + Sync {
    fn publish(&self, event: ProgressEvent);
}
