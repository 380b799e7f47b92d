//! Server error types and their HTTP mapping.

use std::{io, path::PathBuf};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::settings::SettingsError;

/// Failures while serving a single request.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("upstream request to {url} failed: {source}")]
    Upstream {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("reading upstream body failed: {0}")]
    UpstreamBody(#[source] reqwest::Error),
    #[error("no static file for {0}")]
    NotFound(String),
    #[error("failed to build response: {0}")]
    Response(#[from] axum::http::Error),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Upstream { .. } | Self::UpstreamBody(_) => StatusCode::BAD_GATEWAY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Response(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }
        status.into_response()
    }
}

/// Failures that prevent the server from starting.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("invalid static directory {path:?}: {source}")]
    StaticDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot bind server socket: {0}")]
    Bind(#[source] io::Error),
    #[error("server error: {0}")]
    Serve(#[source] io::Error),
}
