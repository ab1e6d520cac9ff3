use thiserror::Error;

/// Failures that end a verification run without a persisted record.
///
/// Everything else (model outages, search failures, unparseable output)
/// degrades inside the pipeline instead of surfacing here.
#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("Missing claim")]
    MissingClaim,

    #[error("Failed to extract event info")]
    EmptyExtraction,

    #[error("Failed to save verification: {0}")]
    Storage(anyhow::Error),
}
