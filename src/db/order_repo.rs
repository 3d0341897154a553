// src/db/order_repo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};
use crate::{
    common::error::AppError,
    models::order::{OrderStatus, PricedLine, ProductPrice},
};

// Escrita de pedidos. Todas as funções recebem o executor da transação
// aberta pelo service.
#[derive(Clone, Default)]
pub struct OrderRepository;

impl OrderRepository {
    pub fn new() -> Self {
        Self
    }

    // Uma única consulta para todos os produtos do pedido
    pub async fn find_prices<'e, E>(
        &self,
        executor: E,
        product_ids: &[i64],
    ) -> Result<Vec<ProductPrice>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let prices = sqlx::query_as::<_, ProductPrice>(
            "SELECT id, price FROM products WHERE id = ANY($1)",
        )
            .bind(product_ids)
            .fetch_all(executor)
            .await?;
        Ok(prices)
    }

    pub async fn insert_order<'e, E>(
        &self,
        executor: E,
        customer_name: Option<&str>,
        status: OrderStatus,
        created_at: DateTime<Utc>,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO orders (customer_name, status, created_at)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
            .bind(customer_name)
            .bind(status.code())
            .bind(created_at)
            .fetch_one(executor)
            .await?;
        Ok(order_id)
    }

    // Insere todas as linhas de uma vez (UNNEST dos arrays)
    pub async fn insert_items<'e, E>(
        &self,
        executor: E,
        order_id: i64,
        lines: &[PricedLine],
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product_ids: Vec<i64> = lines.iter().map(|l| l.product_id).collect();
        let quantities: Vec<i32> = lines.iter().map(|l| l.quantity).collect();
        let prices: Vec<Decimal> = lines.iter().map(|l| l.price).collect();

        let result = sqlx::query(
            r#"
            INSERT INTO order_items (order_id, product_id, quantity, price)
            SELECT $1, item.product_id, item.quantity, item.price
            FROM UNNEST($2::BIGINT[], $3::INTEGER[], $4::NUMERIC[])
                AS item(product_id, quantity, price)
            "#,
        )
            .bind(order_id)
            .bind(&product_ids)
            .bind(&quantities)
            .bind(&prices)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn update_total<'e, E>(
        &self,
        executor: E,
        order_id: i64,
        total_amount: Decimal,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE orders SET total_amount = $2 WHERE id = $1")
            .bind(order_id)
            .bind(total_amount)
            .execute(executor)
            .await?;
        Ok(())
    }
}
