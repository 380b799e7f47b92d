//! HTTP request handlers.

use std::{
    path::{Path as FsPath, PathBuf},
    sync::Arc,
    time::Instant,
};

use axum::{
    body::{Body, Bytes},
    extract::{Extension, Path, State},
    http::{HeaderMap, HeaderValue, Method, Uri, header},
    response::Response,
};
use tokio::fs;
use tracing::info;

use crate::{
    colors::{Origin, colored_id, origin_tag},
    error::ProxyError,
    helpers::UrlHelpers,
    middleware::RequestId,
    resolver::ClientEnv,
    state::AppState,
};

/// Serves the built front-end bundle.
///
/// - `index.html` for directory requests
/// - the root `index.html` for extensionless paths that match no file
/// - `window.env` injected into every HTML document
pub async fn serve_static(
    State(state): State<Arc<AppState>>,
    Extension(RequestId(id)): Extension<RequestId>,
    Extension(start_time): Extension<Instant>,
    Extension(helpers): Extension<UrlHelpers>,
    uri: Uri,
) -> Result<Response, ProxyError> {
    let Some(file_path) = resolve_static_path(&state.static_dir, uri.path()).await else {
        info!(
            "{} ← {} 404 ({}ms)",
            colored_id(&id),
            origin_tag(Origin::Static),
            start_time.elapsed().as_millis()
        );
        return Err(ProxyError::NotFound(uri.path().to_string()));
    };

    let content = fs::read(&file_path)
        .await
        .map_err(|_| ProxyError::NotFound(uri.path().to_string()))?;
    let mime_type = mime_guess::from_path(&file_path).first_or_octet_stream();

    let (origin, body) = if mime_type.essence_str() == "text/html" {
        match String::from_utf8(content) {
            Ok(html) => (
                Origin::Document,
                Body::from(inject_client_env(&html, &helpers.client_env())),
            ),
            Err(err) => (Origin::Static, Body::from(err.into_bytes())),
        }
    } else {
        (Origin::Static, Body::from(content))
    };

    let response = Response::builder()
        .header(header::CONTENT_TYPE, mime_type.as_ref())
        .body(body)?;

    info!(
        "{} ← {} {} ({}ms)",
        colored_id(&id),
        origin_tag(origin),
        response.status(),
        start_time.elapsed().as_millis()
    );
    Ok(response)
}

/// Forwards requests under the API prefix to the backend.
///
/// Hop-by-hop headers are dropped in both directions and the query string is
/// preserved. With `flatten_responses` set, textual bodies are buffered and
/// backend URLs inside them rewritten to application URLs, dropping
/// `content-length` and `etag`; everything else streams through.
#[allow(clippy::too_many_arguments)]
pub async fn proxy_api(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
    Extension(RequestId(id)): Extension<RequestId>,
    Extension(start_time): Extension<Instant>,
    Extension(helpers): Extension<UrlHelpers>,
    method: Method,
    headers: HeaderMap,
    uri: Uri,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let full_url = upstream_url(&state.backend_url, &path, uri.query());

    let mut filtered_headers = HeaderMap::new();
    for (key, value) in headers.iter() {
        if !matches!(
            key.as_str(),
            "host" | "accept-encoding" | "connection" | "keep-alive"
        ) {
            filtered_headers.append(key.clone(), value.clone());
        }
    }

    info!("{} → {} {}", colored_id(&id), origin_tag(Origin::Api), full_url);
    let proxy_start_time = Instant::now();

    let response = state
        .client
        .request(method.clone(), &full_url)
        .headers(filtered_headers)
        .body(body)
        .send()
        .await
        .map_err(|source| ProxyError::Upstream {
            url: full_url.clone(),
            source,
        })?;

    let status = response.status();
    info!(
        "{} ← {} {} ({}ms)",
        colored_id(&id),
        origin_tag(Origin::Api),
        status,
        proxy_start_time.elapsed().as_millis()
    );

    let rewrite = state.flatten_responses && is_textual(response.headers());
    let mut builder = Response::builder().status(status);
    for (key, value) in response.headers().iter() {
        let dropped = matches!(
            key.as_str(),
            "transfer-encoding" | "content-encoding" | "connection" | "keep-alive"
        ) || (rewrite && (*key == header::CONTENT_LENGTH || *key == header::ETAG));
        if !dropped {
            builder = builder.header(key, value);
        }
    }

    let body = if rewrite {
        let text = response.text().await.map_err(ProxyError::UpstreamBody)?;
        Body::from(helpers.flatten_html_to_app_url(&text))
    } else {
        Body::from_stream(response.bytes_stream())
    };

    info!(
        "{} ← {} {} ({}ms)",
        colored_id(&id),
        method,
        status,
        start_time.elapsed().as_millis()
    );
    Ok(builder.body(body)?)
}

/// Maps a request path onto a file below `static_dir`.
pub async fn resolve_static_path(static_dir: &FsPath, uri_path: &str) -> Option<PathBuf> {
    let relative = uri_path.trim_start_matches('/');
    if relative.split('/').any(|segment| segment == "..") {
        return None;
    }

    let mut candidate = static_dir.join(relative);
    if is_dir(&candidate).await {
        candidate.push("index.html");
    }
    if is_file(&candidate).await {
        return Some(candidate);
    }

    // Client-side routes have no file of their own.
    if FsPath::new(relative).extension().is_none() {
        let index = static_dir.join("index.html");
        if is_file(&index).await {
            return Some(index);
        }
    }
    None
}

/// Inserts `window.env` before `</head>`, or at the top without a head.
pub fn inject_client_env(html: &str, env: &ClientEnv) -> String {
    let json = serde_json::to_string(env)
        .unwrap_or_else(|_| "{}".to_string())
        .replace("</", "<\\/");
    let script = format!("<script>window.env = {};</script>", json);

    match html.find("</head>") {
        Some(index) => {
            let mut out = String::with_capacity(html.len() + script.len());
            out.push_str(&html[..index]);
            out.push_str(&script);
            out.push_str(&html[index..]);
            out
        }
        None => format!("{}{}", script, html),
    }
}

pub fn upstream_url(backend_url: &str, path: &str, query: Option<&str>) -> String {
    let url = format!(
        "{}/{}",
        backend_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    match query {
        Some(query) => format!("{}?{}", url, query),
        None => url,
    }
}

/// Whether a response body is text that may embed backend URLs.
pub fn is_textual(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value: &HeaderValue| value.to_str().ok())
    else {
        return false;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence.starts_with("text/")
        || essence.ends_with("+json")
        || essence.ends_with("+xml")
        || matches!(
            essence.as_str(),
            "application/json" | "application/javascript" | "application/xml"
        )
}

async fn is_dir(path: &FsPath) -> bool {
    fs::metadata(path).await.is_ok_and(|meta| meta.is_dir())
}

async fn is_file(path: &FsPath) -> bool {
    fs::metadata(path).await.is_ok_and(|meta| meta.is_file())
}
