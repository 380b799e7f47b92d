//! Per-request API headers.

use axum::http::HeaderMap;

use crate::settings::non_empty;

pub const X_FORWARDED_PROTO: &str = "x-forwarded-proto";
pub const X_FORWARDED_HOST: &str = "x-forwarded-host";
/// Backend-internal API base announced by the fronting proxy.
pub const X_INTERNAL_API_PATH: &str = "x-internal-api-path";
/// Public API base announced by the fronting proxy.
pub const X_API_PATH: &str = "x-api-path";
/// Public site URL announced by the fronting proxy.
pub const X_PUBLIC_URL: &str = "x-public-url";

/// Deployment headers captured once per inbound request.
///
/// `protocol` is always `http` or `https`; path values are kept verbatim.
///
/// Owned by a single request; never shared between requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHeaders {
    pub protocol: String,
    pub host: Option<String>,
    pub internal_api_path: Option<String>,
    pub api_path: Option<String>,
    pub public_url: Option<String>,
}

impl Default for RequestHeaders {
    fn default() -> Self {
        Self {
            protocol: "http".to_string(),
            host: None,
            internal_api_path: None,
            api_path: None,
            public_url: None,
        }
    }
}

impl RequestHeaders {
    /// Derives the deployment headers from an inbound request.
    pub fn from_header_map(headers: &HeaderMap) -> Self {
        let protocol = first_value(headers, X_FORWARDED_PROTO)
            .map(|proto| proto.to_ascii_lowercase())
            .filter(|proto| matches!(proto.as_str(), "http" | "https"))
            .unwrap_or_else(|| "http".to_string());
        let host = first_value(headers, X_FORWARDED_HOST)
            .or_else(|| first_value(headers, axum::http::header::HOST.as_str()));

        Self {
            protocol,
            host,
            internal_api_path: path_value(headers, X_INTERNAL_API_PATH),
            api_path: path_value(headers, X_API_PATH),
            public_url: path_value(headers, X_PUBLIC_URL),
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

// Forwarding proxies may append; the client-facing value comes first.
fn first_value(headers: &HeaderMap, name: &str) -> Option<String> {
    header_str(headers, name)
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn path_value(headers: &HeaderMap, name: &str) -> Option<String> {
    header_str(headers, name).and_then(non_empty)
}
