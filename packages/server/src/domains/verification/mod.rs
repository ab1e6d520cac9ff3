//! Verification domain - turns a free-text claim into a persisted verdict
//!
//! Pipeline: extract event -> build query -> gather evidence -> adjudicate -> persist.
//! Each stage reports progress through the kernel's `ProgressPublisher`.

pub mod activities;
pub mod errors;
pub mod models;

pub use activities::{verify_claim, VerificationOutcome};
pub use errors::VerificationError;
pub use models::*;
