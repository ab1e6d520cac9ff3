use axum::{extract::Extension, Json};
use tracing::error;

use crate::domains::auth::Identity;
use crate::domains::verification::VerificationEvent;
use crate::server::app::AppState;
use crate::server::error::ApiError;

/// The caller's own verification history, newest first.
pub async fn logs_handler(
    Extension(state): Extension<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<VerificationEvent>>, ApiError> {
    let events = state
        .deps
        .store
        .find_by_user(&identity.email)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to load verification logs");
            ApiError::Internal(format!("Failed to fetch logs: {}", e))
        })?;

    Ok(Json(events))
}
