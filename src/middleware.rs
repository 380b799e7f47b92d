//! Request middleware: logging ids and per-request URL helpers.

use std::{sync::Arc, time::Instant};

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use nanoid::nanoid;
use tracing::{debug, info};

use crate::{colors::colored_id, headers::RequestHeaders, helpers::UrlHelpers, state::AppState};

/// Short id attached to every log line of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

/// Assigns a colored request id and records the start time.
///
/// Both are stored in request extensions for downstream handlers.
pub async fn log_requests(mut req: Request<Body>, next: Next) -> Response {
    let id = nanoid!(5);
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    req.extensions_mut().insert(RequestId(id.clone()));
    req.extensions_mut().insert(Instant::now());

    info!("{} → {} {}", colored_id(&id), method, path);
    next.run(req).await
}

/// Captures the deployment headers of this request and stores a fresh
/// [`UrlHelpers`] bundle in the request extensions.
pub async fn inject_url_helpers(
    State(state): State<Arc<AppState>>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let headers = RequestHeaders::from_header_map(req.headers());
    let helpers = UrlHelpers::for_request(state.settings.clone(), headers);
    debug!(api_path = %helpers.get_api_path(), "resolved api path");

    req.extensions_mut().insert(helpers);
    next.run(req).await
}
