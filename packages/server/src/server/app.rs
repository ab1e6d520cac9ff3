//! Application setup and router construction.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::domains::auth::JwtService;
use crate::kernel::{ProgressHub, ServerDeps};
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::{health_handler, logs_handler, progress_socket_handler, verify_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: ServerDeps,
    pub jwt_service: Arc<JwtService>,
    /// Observer registry; `deps.progress` publishes into the same hub
    pub progress_hub: ProgressHub,
}

impl AppState {
    /// Wire the hub in as the pipeline's progress publisher.
    pub fn new(deps: ServerDeps, jwt_service: Arc<JwtService>, progress_hub: ProgressHub) -> Self {
        let deps = ServerDeps {
            progress: Arc::new(progress_hub.clone()),
            ..deps
        };
        Self {
            deps,
            jwt_service,
            progress_hub,
        }
    }
}

/// Build the Axum application router
pub fn build_app(state: AppState, allowed_origins: &[String]) -> Router {
    let jwt_service = state.jwt_service.clone();

    let protected = Router::new()
        .route("/verify", post(verify_handler))
        .route("/logs", get(logs_handler))
        .route("/api/verify-event", post(verify_handler))
        .route("/api/verify-event/logs", get(logs_handler))
        .route_layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service.clone(), req, next)
        }));

    Router::new()
        .merge(protected)
        .route("/health", get(health_handler))
        .route("/ws", get(progress_socket_handler))
        .route("/", get(progress_socket_handler))
        .layer(Extension(state))
        .layer(build_cors(allowed_origins))
        .layer(TraceLayer::new_for_http())
}

fn build_cors(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    if allowed_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(origins)
}
