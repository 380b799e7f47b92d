//! The per-request URL helper bundle.
//!
//! A [`UrlHelpers`] value is built once per request (see
//! [`crate::middleware::inject_url_helpers`]) and handed to whatever needs
//! to turn backend URLs into application URLs.

use std::sync::Arc;

use crate::{
    baseline,
    headers::RequestHeaders,
    resolver::{ClientEnv, RuntimeContext, resolve_api_path},
    settings::Settings,
};

/// Value returned by the helpers that have no behavior yet.
pub const STUB: &str = "stub";

#[derive(Debug, Clone)]
pub struct UrlHelpers {
    context: RuntimeContext,
    settings: Arc<Settings>,
    api_headers: Option<RequestHeaders>,
}

impl UrlHelpers {
    pub fn new(
        context: RuntimeContext,
        settings: Arc<Settings>,
        api_headers: Option<RequestHeaders>,
    ) -> Self {
        Self {
            context,
            settings,
            api_headers,
        }
    }

    /// Server-side bundle for one inbound request.
    pub fn for_request(settings: Arc<Settings>, headers: RequestHeaders) -> Self {
        Self::new(RuntimeContext::Server, settings, Some(headers))
    }

    /// Browser-side bundle; no request headers exist there.
    pub fn for_client(settings: Arc<Settings>, env: ClientEnv) -> Self {
        Self::new(RuntimeContext::Client(env), settings, None)
    }

    pub fn has_api_headers(&self) -> bool {
        self.api_headers.is_some()
    }

    pub fn get_api_path(&self) -> String {
        match &self.api_headers {
            Some(headers) => resolve_api_path(&self.context, &self.settings, headers),
            None => resolve_api_path(&self.context, &self.settings, &RequestHeaders::default()),
        }
    }

    /// Turns a backend URL into a site-relative one. `None` passes through.
    ///
    /// Strips the first occurrence of the internal API path, the API path and
    /// the public URL, in that order. Applying it twice equals applying it once
    /// only while each prefix occurs at most once in `url`; a repeated prefix
    /// loses one copy per call.
    pub fn flatten_to_app_url(&self, url: Option<&str>) -> Option<String> {
        let Some(headers) = &self.api_headers else {
            return baseline::flatten_to_app_url(&self.settings, url);
        };
        url.map(|url| {
            baseline::strip_prefixes(
                url,
                [
                    headers.internal_api_path.as_deref(),
                    headers.api_path.as_deref(),
                    headers.public_url.as_deref(),
                ],
            )
        })
    }

    /// Removes every embedded backend prefix from a markup document.
    pub fn flatten_html_to_app_url(&self, html: &str) -> String {
        match &self.api_headers {
            Some(headers) => baseline::remove_all_prefixes(
                html,
                headers.internal_api_path.as_deref(),
                headers.api_path.as_deref(),
            ),
            None => baseline::flatten_html_to_app_url(&self.settings, html),
        }
    }

    pub fn to_public_url(&self, _url: &str) -> &'static str {
        STUB
    }

    pub fn add_app_url(&self, _url: &str) -> &'static str {
        STUB
    }

    pub fn expand_to_backend_url(&self, _path: &str) -> &'static str {
        STUB
    }

    pub fn is_internal_url(&self, _url: &str) -> &'static str {
        STUB
    }

    /// Globals for the browser, which must never see the internal path.
    pub fn client_env(&self) -> ClientEnv {
        let api_path = match &self.context {
            RuntimeContext::Client(_) => self.get_api_path(),
            RuntimeContext::Server => {
                let settings = Settings {
                    internal_api_path: None,
                    ..Settings::clone(&self.settings)
                };
                let headers = RequestHeaders {
                    internal_api_path: None,
                    ..self.api_headers.clone().unwrap_or_default()
                };
                resolve_api_path(&RuntimeContext::Server, &settings, &headers)
            }
        };
        ClientEnv {
            api_path: Some(api_path),
        }
    }
}
