//! Kernel module - server infrastructure and dependencies.

pub mod browser;
pub mod chrome_browser;
pub mod deps;
pub mod llm_request;
pub mod progress_hub;
pub mod test_dependencies;
pub mod traits;
pub mod verification_store;

pub use browser::with_session;
pub use chrome_browser::ChromeBrowser;
pub use deps::{EvidenceSources, ServerDeps, DEFAULT_FACT_CHECK_URL, DEFAULT_SEARCH_URL};
pub use llm_request::{TimeoutAI, COMPLETION_TIMEOUT};
pub use progress_hub::ProgressHub;
pub use test_dependencies::{
    InMemoryVerificationStore, MockAI, MockBrowser, RecordingPublisher, TestDependencies,
};
pub use traits::*;
pub use verification_store::PostgresVerificationStore;
