// src/db/catalog_repo.rs

use sqlx::{Executor, Postgres};
use crate::{
    common::error::AppError,
    models::catalog::{Category, ProductSummary},
};

// Leitura das tabelas 'categories' e 'products'
#[derive(Clone, Default)]
pub struct CatalogRepository;

impl CatalogRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn get_all_categories<'e, E>(&self, executor: E) -> Result<Vec<Category>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let categories = sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY id")
            .fetch_all(executor)
            .await?;
        Ok(categories)
    }

    pub async fn get_all_products<'e, E>(&self, executor: E) -> Result<Vec<ProductSummary>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let products = sqlx::query_as::<_, ProductSummary>("SELECT id, name FROM products ORDER BY id")
            .fetch_all(executor)
            .await?;
        Ok(products)
    }

    pub async fn get_products_by_category<'e, E>(
        &self,
        executor: E,
        category_id: i64,
    ) -> Result<Vec<ProductSummary>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let products = sqlx::query_as::<_, ProductSummary>(
            "SELECT id, name FROM products WHERE category_id = $1 ORDER BY id",
        )
            .bind(category_id)
            .fetch_all(executor)
            .await?;
        Ok(products)
    }
}
