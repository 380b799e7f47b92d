//! Shared application state.

use std::{path::PathBuf, sync::Arc};

use crate::settings::Settings;

/// Shared application state accessible to all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Read-only process settings
    pub settings: Arc<Settings>,
    /// Base URL proxied requests are forwarded to (e.g. "http://localhost:8080/Plone")
    pub backend_url: String,
    /// Route prefix for proxied API requests (e.g. "/++api++")
    pub prefix: String,
    /// Root directory of the built front-end bundle
    pub static_dir: PathBuf,
    /// Rewrite backend URLs in textual upstream responses
    pub flatten_responses: bool,
    /// Upstream client, shared so connections are pooled
    pub client: reqwest::Client,
}

impl AppState {
    pub fn new(
        settings: Settings,
        backend_url: &str,
        prefix: &str,
        static_dir: impl Into<PathBuf>,
    ) -> Self {
        let backend_url = if backend_url.starts_with("http") {
            backend_url.to_string()
        } else {
            format!("http://{}", backend_url)
        };
        let prefix = format!("/{}", prefix.trim_matches('/'));

        Self {
            settings: Arc::new(settings),
            backend_url: backend_url.trim_end_matches('/').to_string(),
            prefix,
            static_dir: static_dir.into(),
            flatten_responses: false,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_flatten_responses(mut self, enabled: bool) -> Self {
        self.flatten_responses = enabled;
        self
    }
}
