// Gemini-backed implementation of the BaseAI trait
//
// Prompts and response parsing stay in the domain activities; this adapter
// only sends text and returns text.

use anyhow::Result;
use async_trait::async_trait;
use gemini_client::{GeminiClient, GenerateRequest};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use super::BaseAI;

/// Low temperature keeps JSON answers stable across runs.
const COMPLETION_TEMPERATURE: f32 = 0.2;

/// Upper bound on a single model call, including time spent queued.
pub const COMPLETION_TIMEOUT: Duration = Duration::from_secs(60);

#[async_trait]
impl BaseAI for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest::from_prompt(prompt).temperature(COMPLETION_TEMPERATURE);

        let response = self
            .generate(&request)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))?;

        response
            .text()
            .ok_or_else(|| match response.block_reason() {
                Some(reason) => anyhow::anyhow!("Prompt blocked: {}", reason),
                None => anyhow::anyhow!("No candidates in Gemini response"),
            })
    }
}

/// Bounds every call to the wrapped model; a call that overruns fails like
/// any other model error.
pub struct TimeoutAI {
    inner: Arc<dyn BaseAI>,
    timeout: Duration,
}

impl TimeoutAI {
    pub fn new(inner: Arc<dyn BaseAI>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl BaseAI for TimeoutAI {
    async fn complete(&self, prompt: &str) -> Result<String> {
        match tokio::time::timeout(self.timeout, self.inner.complete(prompt)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(timeout_secs = self.timeout.as_secs(), "Model call timed out");
                Err(anyhow::anyhow!(
                    "Model call timed out after {}s",
                    self.timeout.as_secs()
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::MockAI;

    /// Accepts the prompt and never answers.
    struct SilentAI;

    #[async_trait]
    impl BaseAI for SilentAI {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            std::future::pending().await
        }
    }

    #[test]
    fn test_gemini_client_is_base_ai() {
        fn _assert_base_ai<T: BaseAI>() {}

        _assert_base_ai::<GeminiClient>();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_call_times_out() {
        let ai = TimeoutAI::new(Arc::new(SilentAI), COMPLETION_TIMEOUT);

        let err = ai.complete("anything").await.unwrap_err();

        assert_eq!(err.to_string(), "Model call timed out after 60s");
    }

    #[tokio::test]
    async fn test_answers_pass_through() {
        let ai = TimeoutAI::new(
            Arc::new(MockAI::new().with_response("ping", "pong")),
            COMPLETION_TIMEOUT,
        );

        assert_eq!(ai.complete("ping").await.unwrap(), "pong");
        assert!(ai.complete("unscripted").await.is_err());
    }
}
