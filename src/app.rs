//! Router assembly.

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{any, get},
};

use crate::{
    handlers::{proxy_api, serve_static},
    middleware::{inject_url_helpers, log_requests},
    state::AppState,
};

/// API requests under `state.prefix` go to the backend; everything else is
/// served from the static bundle.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(&format!("{}/{{*path}}", state.prefix), any(proxy_api))
        .fallback(get(serve_static))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            inject_url_helpers,
        ))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}
