// src/services/catalog_service.rs

use sqlx::{Executor, Postgres};
use crate::{
    common::error::AppError,
    db::CatalogRepository,
    models::catalog::{Category, ProductSummary},
};

#[derive(Clone)]
pub struct CatalogService {
    repo: CatalogRepository,
}

impl CatalogService {
    pub fn new(repo: CatalogRepository) -> Self {
        Self { repo }
    }

    pub async fn get_all_categories<'e, E>(&self, executor: E) -> Result<Vec<Category>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.get_all_categories(executor).await
    }

    // Sem categoria: todos os produtos
    pub async fn get_products<'e, E>(
        &self,
        executor: E,
        category_id: Option<i64>,
    ) -> Result<Vec<ProductSummary>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        match category_id {
            Some(category_id) => self.repo.get_products_by_category(executor, category_id).await,
            None => self.repo.get_all_products(executor).await,
        }
    }
}
