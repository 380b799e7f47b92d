//! Command-line interface configuration.

use argh::FromArgs;
use std::{net::SocketAddr, path::PathBuf};

use crate::{
    resolver::DEFAULT_API_PATH,
    settings::{Settings, SettingsError},
};

/// Front-end server that proxies the CMS API and serves the site bundle
#[derive(Debug, FromArgs)]
pub struct Cli {
    /// path to the built front-end bundle (e.g. 'build/public')
    #[argh(option, long = "static-dir")]
    pub static_dir: PathBuf,

    /// backend that API requests are forwarded to (default: 'http://localhost:8080/Plone')
    #[argh(option, default = "DEFAULT_API_PATH.to_string()")]
    pub backend: String,

    /// route prefix for proxied API requests (default: '/++api++')
    #[argh(option, default = "String::from(\"/++api++\")")]
    pub prefix: String,

    /// public API base URL, overrides RAZZLE_API_PATH
    #[argh(option, long = "api-path")]
    pub api_path: Option<String>,

    /// backend-internal API base URL, overrides RAZZLE_INTERNAL_API_PATH
    #[argh(option, long = "internal-api-path")]
    pub internal_api_path: Option<String>,

    /// public site URL, overrides RAZZLE_PUBLIC_URL
    #[argh(option, long = "public-url")]
    pub public_url: Option<String>,

    /// settings file (JSON) used for values not given elsewhere
    #[argh(option)]
    pub config: Option<PathBuf>,

    /// rewrite backend URLs in textual API responses to app URLs
    #[argh(switch, long = "flatten-responses")]
    pub flatten_responses: bool,

    /// server bind address (default: '127.0.0.1:3000')
    #[argh(option, default = "\"127.0.0.1:3000\".parse().unwrap()")]
    pub bind: SocketAddr,
}

impl Cli {
    /// Options first, then the given environment layer, then the config file.
    pub fn settings(&self, env: Settings) -> Result<Settings, SettingsError> {
        let file = match &self.config {
            Some(path) => Settings::from_path(path)?,
            None => Settings::default(),
        };
        let options = Settings::new(
            self.api_path.as_deref(),
            self.internal_api_path.as_deref(),
            self.public_url.as_deref(),
        );
        Ok(options.or(env).or(file))
    }
}
