// src/db/dashboard_repo.rs

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use sqlx::PgPool;
use crate::{
    common::{error::AppError, labels::Granularity, sort::SortSpec},
    models::{
        dashboard::{BarEntry, OrderCounts, RevenueBucketRow, StatusCountRow, TopProductEntry},
        order::OrderStatus,
    },
};

// Intervalo semiaberto [start, end) já convertido para UTC
pub type Bounds = (DateTime<Utc>, DateTime<Utc>);

// Consultas de leitura do dashboard. Usa a pool direto (e não um executor
// emprestado) porque o service dispara várias delas em paralelo e cada uma
// precisa da sua própria conexão.
#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Unidades vendidas (itens de pedidos concluídos)
    pub async fn count_total_sales(&self, (start, end): Bounds) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COALESCE(SUM(oi.quantity), 0)::BIGINT
            FROM order_items oi
            JOIN orders o ON oi.order_id = o.id
            WHERE o.status = $1
              AND o.created_at >= $2 AND o.created_at < $3
            "#,
        )
            .bind(OrderStatus::Completed.code())
            .bind(start)
            .bind(end)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::aggregation("count_total_sales"))
    }

    // Pedidos de qualquer status
    pub async fn count_total_orders(&self, (start, end): Bounds) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM orders
            WHERE created_at >= $1 AND created_at < $2
            "#,
        )
            .bind(start)
            .bind(end)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::aggregation("count_total_orders"))
    }

    pub async fn calculate_total_revenue(&self, (start, end): Bounds) -> Result<Decimal, AppError> {
        sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(total_amount), 0)
            FROM orders
            WHERE status = $1
              AND created_at >= $2 AND created_at < $3
            "#,
        )
            .bind(OrderStatus::Completed.code())
            .bind(start)
            .bind(end)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::aggregation("calculate_total_revenue"))
    }

    // Total e concluídos numa única leitura (base da taxa de atendimento)
    pub async fn count_orders_by_completion(&self, (start, end): Bounds) -> Result<OrderCounts, AppError> {
        sqlx::query_as::<_, OrderCounts>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = $1) AS completed
            FROM orders
            WHERE created_at >= $2 AND created_at < $3
            "#,
        )
            .bind(OrderStatus::Completed.code())
            .bind(start)
            .bind(end)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::aggregation("count_orders_by_completion"))
    }

    // Receita de pedidos concluídos agrupada por dia/mês no fuso do negócio
    pub async fn revenue_by_bucket(
        &self,
        (start, end): Bounds,
        granularity: Granularity,
        tz: &Tz,
    ) -> Result<Vec<RevenueBucketRow>, AppError> {
        sqlx::query_as::<_, RevenueBucketRow>(
            r#"
            SELECT
                date_trunc($1::TEXT, created_at AT TIME ZONE $2::TEXT)::DATE AS bucket,
                SUM(total_amount) AS total,
                AVG(total_amount) AS avg
            FROM orders
            WHERE status = $3
              AND created_at >= $4 AND created_at < $5
            GROUP BY 1
            ORDER BY 1
            "#,
        )
            .bind(granularity.sql_unit())
            .bind(tz.name())
            .bind(OrderStatus::Completed.code())
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::aggregation("revenue_by_bucket"))
    }

    // Pedidos de TODOS os status, agrupados por status
    pub async fn count_by_status(&self, (start, end): Bounds) -> Result<Vec<StatusCountRow>, AppError> {
        sqlx::query_as::<_, StatusCountRow>(
            r#"
            SELECT status, COUNT(*) AS count
            FROM orders
            WHERE created_at >= $1 AND created_at < $2
            GROUP BY status
            ORDER BY status
            "#,
        )
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::aggregation("count_by_status"))
    }

    pub async fn revenue_by_category(&self, (start, end): Bounds) -> Result<Vec<BarEntry>, AppError> {
        sqlx::query_as::<_, BarEntry>(
            r#"
            SELECT
                c.name AS label,
                SUM(oi.price * oi.quantity) AS total
            FROM order_items oi
            JOIN orders o ON oi.order_id = o.id
            JOIN products p ON oi.product_id = p.id
            JOIN categories c ON p.category_id = c.id
            WHERE o.status = $1
              AND o.created_at >= $2 AND o.created_at < $3
            GROUP BY c.name
            ORDER BY total DESC, c.name ASC
            "#,
        )
            .bind(OrderStatus::Completed.code())
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::aggregation("revenue_by_category"))
    }

    // Ranking de produtos. Só o ORDER BY é interpolado, e ele vem de enums
    // fechados (SortKey/SortDirection); todo o resto é parâmetro.
    pub async fn top_products(
        &self,
        (start, end): Bounds,
        sort: SortSpec,
        category_id: Option<i64>,
        limit: i64,
    ) -> Result<Vec<TopProductEntry>, AppError> {
        let sql = format!(
            r#"
            SELECT
                p.name AS product_name,
                p.price AS price,
                c.name AS category_name,
                SUM(oi.quantity)::BIGINT AS total_quantity,
                SUM(oi.quantity * oi.price) AS total_amount
            FROM order_items oi
            JOIN orders o ON oi.order_id = o.id
            JOIN products p ON oi.product_id = p.id
            JOIN categories c ON p.category_id = c.id
            WHERE o.status = $1
              AND o.created_at >= $2 AND o.created_at < $3
              AND ($4::BIGINT IS NULL OR p.category_id = $4)
            GROUP BY p.id, p.name, p.price, c.name
            ORDER BY {}, p.id ASC
            LIMIT $5
            "#,
            sort.order_by()
        );

        sqlx::query_as::<_, TopProductEntry>(&sql)
            .bind(OrderStatus::Completed.code())
            .bind(start)
            .bind(end)
            .bind(category_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::aggregation("top_products"))
    }
}
