use axum::{routing::get, Json, Router};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

pub mod categories;
pub mod products;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service healthy"))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: health, both resources, swagger UI
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let categories = Router::new()
        .route("/categories", get(categories::list).post(categories::create))
        .route("/categories/:id", get(categories::get));

    let products = Router::new()
        .route("/products", get(products::list).post(products::create))
        .route(
            "/products/:id",
            get(products::get).put(products::update).delete(products::delete),
        );

    Router::new()
        .route("/health", get(health))
        .merge(categories)
        .merge(products)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", crate::openapi::ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
