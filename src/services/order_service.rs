// src/services/order_service.rs

use std::collections::HashMap;

use chrono::Utc;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use sqlx::{Acquire, Executor, Postgres};

use crate::{
    common::error::AppError,
    db::OrderRepository,
    models::order::{CreateOrderPayload, OrderItemPayload, PricedLine},
};

#[derive(Clone)]
pub struct OrderService {
    repo: OrderRepository,
    // Fuso usado para `created_at` sem offset
    tz: Tz,
}

impl OrderService {
    pub fn new(repo: OrderRepository, tz: Tz) -> Self {
        Self { repo, tz }
    }

    /// Cria o pedido com os itens numa única transação.
    ///
    /// Qualquer erro (produto inexistente, falha de query) descarta tudo:
    /// cabeçalho, itens e total.
    pub async fn create_order<'e, E>(
        &self,
        executor: E,
        payload: &CreateOrderPayload,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        // 1. Preços de todos os produtos numa consulta só
        let product_ids = distinct_product_ids(&payload.items);
        let prices: HashMap<i64, Decimal> = self
            .repo
            .find_prices(&mut *tx, &product_ids)
            .await?
            .into_iter()
            .map(|row| (row.id, row.price))
            .collect();

        // 2. Precifica e soma (puro). Se faltar produto, o `tx` é descartado
        //    sem commit e o Postgres faz o rollback.
        let (lines, total_amount) = price_order_lines(&payload.items, &prices)?;

        // 3. Grava cabeçalho, itens e total
        let order_id = self
            .repo
            .insert_order(
                &mut *tx,
                payload.customer_name.as_deref(),
                payload.status.unwrap_or_default(),
                payload
                    .created_at
                    .map_or_else(Utc::now, |created_at| created_at.resolve(&self.tz)),
            )
            .await?;

        self.repo.insert_items(&mut *tx, order_id, &lines).await?;
        self.repo.update_total(&mut *tx, order_id, total_amount).await?;

        tx.commit().await?;

        tracing::info!(order_id, items = lines.len(), %total_amount, "Pedido criado");
        Ok(order_id)
    }
}

fn distinct_product_ids(items: &[OrderItemPayload]) -> Vec<i64> {
    let mut ids: Vec<i64> = items.iter().map(|item| item.product_id).collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Associa cada item ao preço atual do produto e acumula o total.
pub fn price_order_lines(
    items: &[OrderItemPayload],
    prices: &HashMap<i64, Decimal>,
) -> Result<(Vec<PricedLine>, Decimal), AppError> {
    let lines = items
        .iter()
        .map(|item| {
            prices
                .get(&item.product_id)
                .map(|&price| PricedLine {
                    product_id: item.product_id,
                    quantity: item.quantity,
                    price,
                })
                .ok_or(AppError::ProductNotFound(item.product_id))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let total = lines.iter().map(PricedLine::subtotal).sum();
    Ok((lines, total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::PgPool;

    fn item(product_id: i64, quantity: i32) -> OrderItemPayload {
        OrderItemPayload { product_id, quantity }
    }

    fn price_map() -> HashMap<i64, Decimal> {
        HashMap::from([(1, Decimal::new(1000, 2)), (2, Decimal::new(500, 2))])
    }

    #[test]
    fn total_is_sum_of_quantity_times_price() {
        let (lines, total) =
            price_order_lines(&[item(1, 2), item(2, 1)], &price_map()).unwrap();

        assert_eq!(total, Decimal::new(2500, 2));
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].price, Decimal::new(1000, 2));
        assert_eq!(lines[1].subtotal(), Decimal::new(500, 2));
    }

    #[test]
    fn missing_product_fails_the_whole_order() {
        let prices = HashMap::from([(1, Decimal::new(1000, 2))]);
        let result = price_order_lines(&[item(1, 2), item(2, 1)], &prices);

        assert!(matches!(result, Err(AppError::ProductNotFound(2))));
    }

    #[test]
    fn repeated_products_are_priced_per_line() {
        let (lines, total) =
            price_order_lines(&[item(2, 1), item(2, 3)], &price_map()).unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(total, Decimal::new(2000, 2));
    }

    #[test]
    fn product_ids_are_looked_up_once() {
        assert_eq!(distinct_product_ids(&[item(3, 1), item(1, 1), item(3, 2)]), vec![1, 3]);
    }

    // --- Contra o Postgres (DATABASE_URL) ---

    fn service() -> OrderService {
        OrderService::new(OrderRepository::new(), chrono_tz::Asia::Ho_Chi_Minh)
    }

    fn payload(items: Vec<OrderItemPayload>) -> CreateOrderPayload {
        CreateOrderPayload {
            customer_name: Some("Nguyen Van A".into()),
            status: None,
            created_at: None,
            items,
        }
    }

    async fn seed_catalog(pool: &PgPool) {
        sqlx::query("INSERT INTO categories (id, name) VALUES (1, 'Drinks')")
            .execute(pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO products (id, category_id, name, price) VALUES (1, 1, 'Coffee', 10.00), (2, 1, 'Tea', 5.00)")
            .execute(pool)
            .await
            .unwrap();
    }

    async fn row_counts(pool: &PgPool) -> (i64, i64) {
        let orders = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders")
            .fetch_one(pool)
            .await
            .unwrap();
        let items = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM order_items")
            .fetch_one(pool)
            .await
            .unwrap();
        (orders, items)
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn creates_order_with_items_and_total(pool: PgPool) {
        seed_catalog(&pool).await;

        let order_id = service()
            .create_order(&pool, &payload(vec![item(1, 2), item(2, 1)]))
            .await
            .unwrap();

        let (status, total) = sqlx::query_as::<_, (String, Decimal)>(
            "SELECT status, total_amount FROM orders WHERE id = $1",
        )
            .bind(order_id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(status, "1");
        assert_eq!(total, Decimal::new(2500, 2));
        assert_eq!(row_counts(&pool).await, (1, 2));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn unknown_product_leaves_no_rows(pool: PgPool) {
        seed_catalog(&pool).await;

        let result = service()
            .create_order(&pool, &payload(vec![item(1, 2), item(999, 1)]))
            .await;

        assert!(matches!(result, Err(AppError::ProductNotFound(999))));
        assert_eq!(row_counts(&pool).await, (0, 0));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn failure_after_header_insert_rolls_back(pool: PgPool) {
        seed_catalog(&pool).await;

        // quantity 0 passa do preço mas viola o CHECK de order_items
        let result = service()
            .create_order(&pool, &payload(vec![item(1, 2), item(2, 0)]))
            .await;

        assert!(matches!(result, Err(AppError::DatabaseError(_))));
        assert_eq!(row_counts(&pool).await, (0, 0));
    }
}
