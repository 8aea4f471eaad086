use axum::{routing::get, routing::post, Router};
use std::sync::Arc;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::ClientError;
use crate::content::{Content, ContentError};
use crate::feeds::Feeds;
use crate::tracking::{log_health_changes, spawn_tracking_poller, TrackingStore};

use super::api::catalog as catalog_handlers;
use super::api::feeds as feed_handlers;
use super::api::operations as operation_handlers;
use super::api::tools as tool_handlers;
use super::api::tracking as tracking_handlers;
use super::api_doc::ApiDoc;
use super::config::Config;
use super::state::AppState;
use super::ui::handlers as ui_handlers;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to load site content: {0}")]
    Content(#[from] ContentError),
    #[error("failed to create backend client: {0}")]
    Client(#[from] ClientError),
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let static_dir = state.config.web.static_dir.clone();

    Router::new()
        // Pages
        .route("/", get(ui_handlers::landing))
        .route("/dashboard", get(ui_handlers::dashboard))
        .route("/catalog", get(ui_handlers::catalog))
        .route("/catalog/export.csv", get(ui_handlers::export_catalog))
        .route("/team", get(ui_handlers::team))
        .route("/resources", get(ui_handlers::resources))
        .route("/resources/whitepaper", get(ui_handlers::whitepaper))
        .route("/resources/{section}", get(ui_handlers::resource_section))
        .route("/technical", get(ui_handlers::technical))
        .route("/security", get(ui_handlers::security))
        .route("/tools", get(ui_handlers::tools))
        .route("/tools/{id}", get(ui_handlers::tool_detail))
        .route("/sitemap.xml", get(ui_handlers::sitemap))
        // Tracking
        .route("/api/health", get(tracking_handlers::health))
        .route("/api/tracking", get(tracking_handlers::tracking))
        .route("/api/globe", get(tracking_handlers::globe))
        .route("/api/satellites", get(tracking_handlers::satellites))
        // Widget feeds
        .route("/api/conjunctions", get(feed_handlers::conjunctions))
        .route("/api/intelligence", get(feed_handlers::intelligence))
        .route("/api/metrics", get(feed_handlers::metrics))
        // Catalog
        .route("/api/catalog", get(catalog_handlers::catalog))
        .route("/api/statistics", get(catalog_handlers::statistics))
        // Operations
        .route("/api/conjunctions/screen", post(operation_handlers::screen))
        .route("/api/tle/{norad_id}", get(operation_handlers::latest_tle))
        .route(
            "/api/maneuvers/detect",
            post(operation_handlers::detect_maneuvers),
        )
        // Tools
        .route("/api/tools", get(tool_handlers::list_tools))
        .route("/api/tools/{id}", get(tool_handlers::get_tool))
        // Static files
        .nest_service("/static", ServeDir::new(static_dir))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Config) -> Result<(), ServerError> {
    let bind_addr = config.web.bind.clone();
    let content = Content::load()?;
    let client = config.api.client()?;
    log::info!("Using SDA backend at {}", client.base_url());

    let (tracking_writer, tracking) = TrackingStore::new();
    let mut pollers = vec![spawn_tracking_poller(
        client.clone(),
        tracking_writer,
        config.polling.tracking,
        config.polling.alerts_limit,
    )];
    let (feeds, feed_pollers) = Feeds::spawn(
        &client,
        &config.polling.schedule(),
        config.conjunctions.fallback,
    );
    pollers.extend(feed_pollers);
    tokio::spawn(log_health_changes(tracking.clone()));
    feeds.log_transitions();

    let state = AppState {
        config: Arc::new(config),
        client,
        content: Arc::new(content),
        tracking,
        feeds,
    };
    let app = router(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    for poller in pollers {
        let name = poller.name();
        poller.stop().await;
        log::info!("Stopped {} poller", name);
    }
    Ok(served?)
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("Shutdown requested"),
        Err(e) => {
            log::error!("Cannot listen for Ctrl-C, running until killed: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
