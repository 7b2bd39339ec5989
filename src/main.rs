use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use pomotrack_server::{app, open_database, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pomotrack_server=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(anyhow::Error::msg)?;

    let db = open_database(&config.database_path)
        .with_context(|| format!("opening database at {}", config.database_path))?;
    tracing::info!(path = %config.database_path, "database ready");

    // Session cookies cross origins, so CORS must both name the
    // frontend origin explicitly and allow credentials. A wildcard
    // origin would make browsers drop the cookie.
    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .context("invalid ALLOWED_ORIGINS entry")?;

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    let state = AppState::new(db, config.clone());
    let router = app(state).layer(cors).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.server_address())
        .await
        .with_context(|| format!("binding {}", config.server_address()))?;
    tracing::info!(address = %config.server_address(), "listening");

    axum::serve(listener, router).await?;

    Ok(())
}
