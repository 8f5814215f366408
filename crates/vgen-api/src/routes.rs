//! API routes.

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;

use crate::handlers::{
    generate_image_to_video, generate_text_to_video, get_video, health, list_styles, list_videos,
    ready,
};
use crate::metrics::metrics_middleware;
use crate::middleware::{cors_layer, request_id, request_logging, security_headers};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let generation_routes = Router::new()
        .route("/generate-text-to-video", post(generate_text_to_video))
        .route("/generate-image-to-video", post(generate_image_to_video));

    let video_routes = Router::new()
        .route("/video/:video_id", get(get_video))
        .route("/videos", get(list_videos));

    let style_routes = Router::new().route("/styles", get(list_styles));

    let api_routes = Router::new()
        .merge(generation_routes)
        .merge(video_routes)
        .merge(style_routes)
        // Stored source images
        .nest_service("/uploads", ServeDir::new(state.uploads.root()));

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route("/ready", get(ready));

    let metrics_routes = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        // Multipart uploads are bounded by the layer below instead of axum's 2MB default
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(request_logging))
        .layer(middleware::from_fn(request_id))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
