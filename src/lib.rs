//! Volto-proxy library - API path resolution and URL flattening for a CMS
//! front end, plus the server that applies them per request.

pub mod app;
pub mod baseline;
pub mod cli;
pub mod colors;
pub mod error;
pub mod handlers;
pub mod headers;
pub mod helpers;
pub mod middleware;
pub mod resolver;
pub mod settings;
pub mod state;

pub use headers::RequestHeaders;
pub use helpers::UrlHelpers;
pub use resolver::{ClientEnv, DEFAULT_API_PATH, RuntimeContext, resolve_api_path};
pub use settings::Settings;
