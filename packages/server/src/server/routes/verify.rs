use axum::{extract::rejection::JsonRejection, extract::Extension, Json};
use serde::Deserialize;
use tracing::error;

use crate::domains::auth::Identity;
use crate::domains::verification::{verify_claim, VerificationOutcome};
use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    #[serde(default)]
    pub claim: Option<String>,
}

/// Run a verification for the authenticated caller.
///
/// The pipeline runs as its own task so a caller that disconnects mid-run
/// does not stop the record from being saved.
pub async fn verify_handler(
    Extension(state): Extension<AppState>,
    Extension(identity): Extension<Identity>,
    payload: Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<Json<VerificationOutcome>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let deps = state.deps.clone();
    let run = tokio::spawn(async move {
        verify_claim(request.claim.as_deref(), &identity.email, &deps).await
    });

    let outcome = run.await.map_err(|e| {
        error!(error = %e, "Verification task aborted");
        ApiError::Internal("Verification task aborted".to_string())
    })??;

    Ok(Json(outcome))
}
