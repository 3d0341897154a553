// src/handlers/catalog.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    models::{
        catalog::{Category, ProductSummary},
        response::ApiResponse,
    },
};

// GET /api/category
#[utoipa::path(
    get,
    path = "/api/category",
    tag = "Catalog",
    responses(
        (status = 200, description = "Todas as categorias", body = ApiResponse<Vec<Category>>),
        (status = 500, description = "Falha ao consultar o banco")
    )
)]
pub async fn get_all_categories(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let categories = app_state
        .catalog_service
        .get_all_categories(&app_state.db_pool)
        .await
        .map_err(|app_err| app_err.to_api_error("Failed to get categories"))?;

    Ok((StatusCode::OK, Json(ApiResponse::ok(categories))))
}

// GET /api/product
#[utoipa::path(
    get,
    path = "/api/product",
    tag = "Catalog",
    responses(
        (status = 200, description = "Todos os produtos", body = ApiResponse<Vec<ProductSummary>>),
        (status = 500, description = "Falha ao consultar o banco")
    )
)]
pub async fn get_all_products(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let products = app_state
        .catalog_service
        .get_products(&app_state.db_pool, None)
        .await
        .map_err(|app_err| app_err.to_api_error("Failed to get products"))?;

    Ok((StatusCode::OK, Json(ApiResponse::ok(products))))
}

// GET /api/product/{category_id}
#[utoipa::path(
    get,
    path = "/api/product/{category_id}",
    tag = "Catalog",
    params(
        ("category_id" = i64, Path, description = "ID da categoria")
    ),
    responses(
        (status = 200, description = "Produtos da categoria", body = ApiResponse<Vec<ProductSummary>>),
        (status = 500, description = "Falha ao consultar o banco")
    )
)]
pub async fn get_products_by_category(
    State(app_state): State<AppState>,
    Path(category_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let products = app_state
        .catalog_service
        .get_products(&app_state.db_pool, Some(category_id))
        .await
        .map_err(|app_err| app_err.to_api_error("Failed to get products by category"))?;

    Ok((StatusCode::OK, Json(ApiResponse::ok(products))))
}
