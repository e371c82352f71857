use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use service::db::product_service;
use tracing::info;

use crate::errors::JsonApiError;
use crate::routes::AppState;

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateProductInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i32,
    #[serde(default)]
    pub category_id: Option<i32>,
}

/// Partial update body. Absent fields leave the row untouched.
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
    pub category_id: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[utoipa::path(
    get, path = "/products", tag = "products",
    responses((status = 200, description = "List OK"))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<models::product::Model>>, JsonApiError> {
    let rows = product_service::list_products(&state.db).await?;
    info!(count = rows.len(), "list products");
    Ok(Json(rows))
}

#[utoipa::path(
    post, path = "/products", tag = "products",
    request_body = crate::openapi::CreateProductInputDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 422, description = "Validation Error"),
        (status = 500, description = "Constraint violation or storage failure")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProductInput>,
) -> Result<(StatusCode, Json<models::product::Model>), JsonApiError> {
    let created = product_service::create_product(
        &state.db,
        &input.name,
        input.description,
        input.price,
        input.quantity,
        input.category_id,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "product id")),
    responses(
        (status = 200, description = "Found"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<models::product::Model>, JsonApiError> {
    let found = product_service::get_product(&state.db, id).await?;
    Ok(Json(found))
}

#[utoipa::path(
    put, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "product id")),
    request_body = crate::openapi::UpdateProductInputDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 404, description = "Not Found"),
        (status = 422, description = "Validation Error")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateProductInput>,
) -> Result<Json<models::product::Model>, JsonApiError> {
    let updated = product_service::update_product(
        &state.db,
        id,
        input.name.as_deref(),
        input.description,
        input.price,
        input.quantity,
        input.category_id.map(Some),
    )
    .await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "product id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, JsonApiError> {
    product_service::delete_product(&state.db, id).await?;
    Ok(Json(MessageResponse { message: "Product deleted successfully".to_string() }))
}
