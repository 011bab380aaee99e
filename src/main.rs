//! vote-gateway server entry point.
//!
//! Starts the Axum HTTP server with the vote and health endpoints, and
//! closes the database pool on shutdown.

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use vote_gateway::api;
use vote_gateway::app_state::AppState;
use vote_gateway::config::{LogFormat, VoteConfig};
use vote_gateway::persistence::{ConnectionPool, SchemaInitializer};
use vote_gateway::service::VoteService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = VoteConfig::from_env().context("loading configuration")?;

    // Initialize tracing
    init_tracing(config.log_format);
    tracing::info!(addr = %config.listen_addr, table = %config.table, "starting vote-gateway");

    // Build service context
    let pool = Arc::new(ConnectionPool::new(config.pool.clone()));
    let schema = SchemaInitializer::new(config.table.clone());
    let app_state = AppState::new(VoteService::new(pool, schema));
    let vote_service = Arc::clone(&app_state.vote_service);

    // Build router
    let app = with_api_docs(
        api::build_router()
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(CorsLayer::permissive()),
            )
            .with_state(app_state),
    );

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    vote_service.shutdown().await;
    tracing::info!("vote-gateway stopped");

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

#[cfg(feature = "swagger-ui")]
fn with_api_docs(app: Router) -> Router {
    use utoipa::OpenApi;
    use utoipa_swagger_ui::SwaggerUi;

    app.merge(
        SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", api::openapi::ApiDoc::openapi()),
    )
}

#[cfg(not(feature = "swagger-ui"))]
fn with_api_docs(app: Router) -> Router {
    use axum::Json;
    use axum::routing::get;
    use utoipa::OpenApi;

    app.route(
        "/api-docs/openapi.json",
        get(|| async { Json(api::openapi::ApiDoc::openapi()) }),
    )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "unable to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "unable to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
