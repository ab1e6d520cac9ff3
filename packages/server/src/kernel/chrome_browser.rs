//! Headless Chrome implementation of `BaseBrowser` (chromiumoxide).
//!
//! Every session launches its own browser with a throwaway profile directory,
//! so concurrent runs never share cookies, cache or tabs.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout, Instant};
use tracing::{debug, warn};
use uuid::Uuid;

use super::{BaseBrowser, BrowserSession};

const SELECTOR_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Launches a fresh headless Chrome per session.
#[derive(Debug, Clone, Default)]
pub struct ChromeBrowser {
    executable: Option<PathBuf>,
}

impl ChromeBrowser {
    /// Use the Chrome binary chromiumoxide finds on the system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific Chrome/Chromium binary.
    pub fn with_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.executable = Some(path.into());
        self
    }
}

#[async_trait]
impl BaseBrowser for ChromeBrowser {
    async fn open_session(&self) -> Result<Box<dyn BrowserSession>> {
        let data_dir = std::env::temp_dir().join(format!("claim-verifier-{}", Uuid::new_v4()));

        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .user_data_dir(&data_dir);
        if let Some(path) = &self.executable {
            builder = builder.chrome_executable(path);
        }
        let config = builder
            .build()
            .map_err(|e| anyhow!("Failed to build browser config: {}", e))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .context("Failed to launch browser")?;

        // Spawn handler to process browser events
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler_task.abort();
                let _ = std::fs::remove_dir_all(&data_dir);
                return Err(anyhow!("Failed to open page: {}", e));
            }
        };

        debug!(profile = %data_dir.display(), "Browser session opened");

        Ok(Box::new(ChromeSession {
            browser: Mutex::new(browser),
            page,
            handler_task,
            data_dir,
        }))
    }
}

struct ChromeSession {
    browser: Mutex<Browser>,
    page: Page,
    handler_task: JoinHandle<()>,
    data_dir: PathBuf,
}

#[async_trait]
impl BrowserSession for ChromeSession {
    /// Resolves on the page's `load` event, not network idle; chromiumoxide
    /// has no idle wait. Content rendered after load is picked up by the
    /// callers' `wait_for_selector` polling.
    async fn goto(&self, url: &str, limit: Duration) -> Result<()> {
        timeout(limit, self.page.goto(url))
            .await
            .map_err(|_| anyhow!("Navigation to {} timed out after {:?}", url, limit))?
            .with_context(|| format!("Navigation to {} failed", url))?;
        Ok(())
    }

    async fn wait_for_selector(&self, selector: &str, limit: Duration) -> Result<()> {
        let deadline = Instant::now() + limit;
        loop {
            if self.page.find_element(selector).await.is_ok() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(anyhow!("Selector {} not found within {:?}", selector, limit));
            }
            sleep(SELECTOR_POLL_INTERVAL).await;
        }
    }

    async fn submit_text(&self, selector: &str, text: &str, limit: Duration) -> Result<()> {
        let input = self
            .page
            .find_element(selector)
            .await
            .with_context(|| format!("Input {} not found", selector))?;

        input.click().await.context("Click failed")?;
        input.type_str(text).await.context("Typing failed")?;
        input.press_key("Enter").await.context("Submit failed")?;

        // Some forms update in place without navigating
        if timeout(limit, self.page.wait_for_navigation()).await.is_err() {
            debug!(selector, "No navigation after submit");
        }
        Ok(())
    }

    async fn evaluate(&self, script: &str) -> Result<serde_json::Value> {
        self.page
            .evaluate(script)
            .await
            .context("Script evaluation failed")?
            .into_value()
            .context("Script returned no JSON value")
    }

    async fn close(&self) -> Result<()> {
        let mut browser = self.browser.lock().await;
        let closed = browser.close().await;
        if let Err(e) = browser.wait().await {
            warn!(error = %e, "Browser process did not exit cleanly");
        }
        self.handler_task.abort();

        if let Err(e) = std::fs::remove_dir_all(&self.data_dir) {
            debug!(error = %e, "Failed to remove browser profile");
        }

        closed.map(|_| ()).context("Failed to close browser")
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        self.handler_task.abort();
    }
}
