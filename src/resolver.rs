//! Resolution of the authoritative API base path.

use serde::{Deserialize, Serialize};

use crate::{headers::RequestHeaders, settings::Settings};

/// Used when neither settings nor headers name an API location.
pub const DEFAULT_API_PATH: &str = "http://localhost:8080/Plone";

/// Globals the server injects into rendered pages as `window.env`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientEnv {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_path: Option<String>,
}

/// Where the resolution runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeContext {
    /// Server-side render pass; request headers apply.
    Server,
    /// Browser; only the injected globals apply.
    Client(ClientEnv),
}

/// Resolves the API base path for one execution context.
///
/// Pure and total: unset inputs fall through to [`DEFAULT_API_PATH`].
/// On the server the first matching rule wins:
///
/// 1. no configured internal path, internal path header present
/// 2. configured internal path
/// 3. no configured API path, API path header present
/// 4. configured API path
/// 5. no configured API path, host header present (`{protocol}://{host}`)
/// 6. [`DEFAULT_API_PATH`]
///
/// On the client the injected `apiPath` is used when no API path is
/// configured. Request headers are ignored there.
pub fn resolve_api_path(
    context: &RuntimeContext,
    settings: &Settings,
    headers: &RequestHeaders,
) -> String {
    match context {
        RuntimeContext::Server => resolve_on_server(settings, headers),
        RuntimeContext::Client(env) => resolve_on_client(settings, env),
    }
}

fn resolve_on_server(settings: &Settings, headers: &RequestHeaders) -> String {
    let configured_internal = present(&settings.internal_api_path);
    let configured_api = present(&settings.api_path);

    if let (None, Some(internal)) = (configured_internal, present(&headers.internal_api_path)) {
        internal.to_string()
    } else if let Some(internal) = configured_internal {
        internal.to_string()
    } else if let (None, Some(api)) = (configured_api, present(&headers.api_path)) {
        api.to_string()
    } else if let Some(api) = configured_api {
        api.to_string()
    } else if let Some(host) = present(&headers.host) {
        format!("{}://{}", headers.protocol, host)
    } else {
        DEFAULT_API_PATH.to_string()
    }
}

fn resolve_on_client(settings: &Settings, env: &ClientEnv) -> String {
    match (present(&settings.api_path), present(&env.api_path)) {
        (None, Some(injected)) => injected.to_string(),
        (Some(configured), _) => configured.to_string(),
        (None, None) => DEFAULT_API_PATH.to_string(),
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}
