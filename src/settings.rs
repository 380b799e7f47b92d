//! Process-wide settings.
//!
//! Loaded once at startup from CLI options, `RAZZLE_*` environment variables
//! and an optional JSON file, then shared read-only behind an `Arc`.

use std::{fs, io, path::Path};

use serde::Deserialize;

/// Environment variable holding the public API base URL.
pub const ENV_API_PATH: &str = "RAZZLE_API_PATH";
/// Environment variable holding the backend-internal API base URL.
pub const ENV_INTERNAL_API_PATH: &str = "RAZZLE_INTERNAL_API_PATH";
/// Environment variable holding the public site URL.
pub const ENV_PUBLIC_URL: &str = "RAZZLE_PUBLIC_URL";

/// Errors raised while reading a settings file.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("cannot read settings file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Configured API locations.
///
/// Values are kept exactly as given, except that an empty string is `None`,
/// so every consumer can treat "set" as "present and non-empty".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Explicit public API base URL.
    pub api_path: Option<String>,
    /// Backend-internal API base URL, only meaningful server side.
    pub internal_api_path: Option<String>,
    /// Public URL of the site itself.
    #[serde(rename = "publicURL")]
    pub public_url: Option<String>,
}

impl Settings {
    pub fn new(
        api_path: Option<&str>,
        internal_api_path: Option<&str>,
        public_url: Option<&str>,
    ) -> Self {
        Self {
            api_path: api_path.and_then(non_empty),
            internal_api_path: internal_api_path.and_then(non_empty),
            public_url: public_url.and_then(non_empty),
        }
    }

    /// Reads settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::new(
            lookup(ENV_API_PATH).as_deref(),
            lookup(ENV_INTERNAL_API_PATH).as_deref(),
            lookup(ENV_PUBLIC_URL).as_deref(),
        )
    }

    /// Reads a JSON settings file (`{"apiPath": ..., "internalApiPath": ..., "publicURL": ...}`).
    pub fn from_path(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let raw: Settings =
            serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        Ok(Self::new(
            raw.api_path.as_deref(),
            raw.internal_api_path.as_deref(),
            raw.public_url.as_deref(),
        ))
    }

    /// Fills every unset value of `self` from `fallback`.
    pub fn or(self, fallback: Settings) -> Self {
        Self {
            api_path: self.api_path.or(fallback.api_path),
            internal_api_path: self.internal_api_path.or(fallback.internal_api_path),
            public_url: self.public_url.or(fallback.public_url),
        }
    }
}

/// Empty strings are unset; anything else is kept verbatim.
pub(crate) fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
