use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(utoipa::ToSchema)]
pub struct CreateCategoryInputDoc {
    pub name: String,
}

#[derive(utoipa::ToSchema)]
pub struct CreateProductInputDoc {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i32,
    pub category_id: Option<i32>,
}

#[derive(utoipa::ToSchema)]
pub struct UpdateProductInputDoc {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
    pub category_id: Option<i32>,
}

#[derive(utoipa::ToSchema)]
pub struct MessageResponseDoc {
    pub message: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::categories::list,
        crate::routes::categories::create,
        crate::routes::categories::get,
        crate::routes::products::list,
        crate::routes::products::create,
        crate::routes::products::get,
        crate::routes::products::update,
        crate::routes::products::delete,
    ),
    components(
        schemas(
            HealthResponse,
            CreateCategoryInputDoc,
            CreateProductInputDoc,
            UpdateProductInputDoc,
            MessageResponseDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "categories"),
        (name = "products")
    )
)]
pub struct ApiDoc;
