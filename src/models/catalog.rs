// src/models/catalog.rs

use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Category {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Bebidas")]
    pub name: String,
}

// Listagem enxuta de produtos (dropdowns do front)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ProductSummary {
    #[schema(example = 10)]
    pub id: i64,
    #[schema(example = "Café gelado")]
    pub name: String,
}
