use crate::domains::auth::{Identity, JwtService};
use crate::server::error::ApiError;
use axum::{
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::debug;

pub const MISSING_TOKEN: &str = "Access token required";
pub const INVALID_TOKEN: &str = "Invalid token";

/// JWT authentication middleware for protected routes
///
/// Verifies the bearer token and adds the caller's `Identity` to request
/// extensions. Requests without a valid token are rejected with 401.
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    match extract_identity(&request, &jwt_service) {
        Ok(identity) => {
            debug!(user_id = %identity.user_id, "Authenticated request");
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(rejection) => {
            debug!(reason = rejection, "Rejected unauthenticated request");
            ApiError::Unauthorized(rejection).into_response()
        }
    }
}

/// Extract and verify the JWT from the Authorization header
fn extract_identity(
    request: &axum::http::Request<axum::body::Body>,
    jwt_service: &JwtService,
) -> Result<Identity, &'static str> {
    let auth_str = request
        .headers()
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(MISSING_TOKEN)?;

    // Handle both "Bearer <token>" and raw token
    let token = auth_str
        .strip_prefix("Bearer")
        .map(str::trim)
        .unwrap_or(auth_str);
    if token.is_empty() {
        return Err(MISSING_TOKEN);
    }

    jwt_service.identify(token).map_err(|_| INVALID_TOKEN)
}
