use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use service::db::category_service;
use tracing::info;

use crate::errors::JsonApiError;
use crate::routes::AppState;

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateCategoryInput {
    pub name: String,
}

/// Category row plus its derived product list.
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub products: Vec<models::product::Model>,
}

impl CategoryResponse {
    fn from_row(category: models::category::Model, products: Vec<models::product::Model>) -> Self {
        Self { id: category.id, name: category.name, products }
    }
}

#[utoipa::path(
    get, path = "/categories", tag = "categories",
    responses((status = 200, description = "List OK"))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<CategoryResponse>>, JsonApiError> {
    let rows = category_service::list_categories(&state.db).await?;
    let body: Vec<CategoryResponse> = rows
        .into_iter()
        .map(|(category, products)| CategoryResponse::from_row(category, products))
        .collect();
    info!(count = body.len(), "list categories");
    Ok(Json(body))
}

#[utoipa::path(
    post, path = "/categories", tag = "categories",
    request_body = crate::openapi::CreateCategoryInputDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 409, description = "Duplicate name"),
        (status = 422, description = "Validation Error")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateCategoryInput>,
) -> Result<(StatusCode, Json<CategoryResponse>), JsonApiError> {
    let category = category_service::create_category(&state.db, &input.name).await?;
    Ok((StatusCode::CREATED, Json(CategoryResponse::from_row(category, Vec::new()))))
}

#[utoipa::path(
    get, path = "/categories/{id}", tag = "categories",
    params(("id" = i32, Path, description = "category id")),
    responses(
        (status = 200, description = "Found"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CategoryResponse>, JsonApiError> {
    let (category, products) = category_service::get_category(&state.db, id).await?;
    Ok(Json(CategoryResponse::from_row(category, products)))
}
