//! Front-end server for a headless CMS.
//!
//! - Proxies API requests under a prefix to the backend
//! - Serves the built site bundle with `window.env` injected
//! - Resolves the API path per request from settings and deployment headers

use std::sync::Arc;

use tower_http::compression::CompressionLayer;
use tracing::{Level, error, info};
use volto_proxy::{
    app, cli::Cli, error::StartupError, settings::Settings, state::AppState,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let args: Cli = argh::from_env();
    if let Err(err) = run(args).await {
        error!("{}", err);
        std::process::exit(1);
    }
}

async fn run(args: Cli) -> Result<(), StartupError> {
    let settings = args.settings(Settings::from_env())?;
    let static_dir = args
        .static_dir
        .canonicalize()
        .map_err(|source| StartupError::StaticDir {
            path: args.static_dir.clone(),
            source,
        })?;

    let state = Arc::new(
        AppState::new(settings, &args.backend, &args.prefix, static_dir.clone())
            .with_flatten_responses(args.flatten_responses),
    );

    info!("Serving static files from: {:?}", static_dir);
    info!("Proxying {}/* to: {}/", state.prefix, state.backend_url);
    info!("Settings: {:?}", state.settings);
    if state.flatten_responses {
        info!("Flattening backend URLs in textual API responses");
    }
    info!("Server running on: http://{}", args.bind);

    let app = app::router(state).layer(CompressionLayer::new());
    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .map_err(StartupError::Bind)?;
    axum::serve(listener, app)
        .await
        .map_err(StartupError::Serve)
}
