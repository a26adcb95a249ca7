pub mod api;
mod config;
mod pipeline;
mod providers;
mod sync;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use config::Config;
use sync::SyncManager;

#[derive(OpenApi)]
#[openapi(
    info(title = "Vonatradar Live Train API", version = "0.3.0"),
    paths(
        api::vehicles::list_vehicles,
        api::health::health_check,
    ),
    components(schemas(
        api::vehicles::VehicleListResponse,
        api::health::HealthResponse,
        sync::FeedUpdate,
        sync::VehicleView,
        sync::StopRow,
    )),
    tags(
        (name = "vehicles", description = "Live vehicle view-models per refresh cycle"),
        (name = "health", description = "Service health check")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .init();

    let config = Config::load("config.yaml").expect("Failed to load config");
    tracing::info!(
        feed_url = %config.feed.url,
        interval_secs = config.feed.interval_secs,
        "Loaded configuration"
    );

    let cors_layer = build_cors_layer(&config);

    // The sync manager owns the view-model store; the HTTP side only reads
    let sync_manager =
        Arc::new(SyncManager::new(&config).expect("Failed to initialize sync manager"));
    let vehicle_store = sync_manager.vehicle_store();
    let vehicle_updates_tx = sync_manager.vehicle_updates_sender();
    tokio::spawn({
        let sync_manager = sync_manager.clone();
        async move { sync_manager.start().await }
    });

    let app = Router::new()
        .route("/", get(root))
        .nest("/api", api::router(vehicle_store, vehicle_updates_tx))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind to {}: {}", config.listen_addr, e));

    tracing::info!(addr = %config.listen_addr, "Server running");
    tracing::info!("Swagger UI: /swagger-ui");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    if config.cors_permissive {
        tracing::warn!(
            "CORS: Permissive mode explicitly enabled (all origins allowed) - DO NOT USE IN PRODUCTION"
        );
        return CorsLayer::permissive();
    }

    if config.cors_origins.is_empty() {
        panic!(
            "CORS configuration error: Either set 'cors_origins' with allowed origins, \
             or set 'cors_permissive: true' for development"
        );
    }

    tracing::info!(origins = ?config.cors_origins, "CORS: Restricting to configured origins");
    let origins: Vec<axum::http::HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([axum::http::Method::GET, axum::http::Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE])
}

async fn root() -> &'static str {
    "Vonatradar Live Train API"
}
