//! Scoped browser sessions.

use anyhow::Result;
use std::future::Future;
use std::sync::Arc;
use tracing::warn;

use super::{BaseBrowser, BrowserSession};

/// Open a session, run `work` with it, and close it whatever the outcome.
///
/// The work result is returned as-is; a failure to close is only logged.
pub async fn with_session<T, F, Fut>(browser: &dyn BaseBrowser, work: F) -> Result<T>
where
    F: FnOnce(Arc<dyn BrowserSession>) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let session: Arc<dyn BrowserSession> = Arc::from(browser.open_session().await?);

    let outcome = work(session.clone()).await;

    if let Err(e) = session.close().await {
        warn!(error = %e, "Failed to close browser session");
    }

    outcome
}
