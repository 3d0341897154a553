// src/models/dashboard.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::common::metrics::calc_percent_change;

// 1. Resumo (os cards do topo)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummaryTotal {
    #[schema(example = 120)]
    pub total_sales: i64,       // Unidades vendidas em pedidos concluídos
    #[schema(example = 48)]
    pub total_orders: i64,      // Pedidos de qualquer status
    #[schema(example = 2500.5)]
    pub total_revenue: Decimal, // Receita dos pedidos concluídos
    #[schema(example = 80.0)]
    pub fulfillment_rate: Decimal,
    pub comparisons: Comparisons,
}

// Variação percentual contra o período anterior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comparisons {
    pub sales_change: Decimal,
    pub orders_change: Decimal,
    pub revenue_change: Decimal,
    pub fulfillment_rate_change: Decimal,
}

// As quatro métricas de um período, antes da comparação
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodMetrics {
    pub total_sales: i64,
    pub total_orders: i64,
    pub total_revenue: Decimal,
    pub fulfillment_rate: Decimal,
}

impl PeriodMetrics {
    pub fn compare_with(&self, previous: &PeriodMetrics) -> Comparisons {
        Comparisons {
            sales_change: calc_percent_change(
                Decimal::from(self.total_sales),
                Decimal::from(previous.total_sales),
            ),
            orders_change: calc_percent_change(
                Decimal::from(self.total_orders),
                Decimal::from(previous.total_orders),
            ),
            revenue_change: calc_percent_change(self.total_revenue, previous.total_revenue),
            fulfillment_rate_change: calc_percent_change(
                self.fulfillment_rate,
                previous.fulfillment_rate,
            ),
        }
    }

    pub fn into_summary(self, comparisons: Comparisons) -> SummaryTotal {
        SummaryTotal {
            total_sales: self.total_sales,
            total_orders: self.total_orders,
            total_revenue: self.total_revenue,
            fulfillment_rate: self.fulfillment_rate,
            comparisons,
        }
    }
}

// 2. Gráfico de linha (receita por dia/mês)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct LineChartPoint {
    #[schema(example = "27/07")]
    pub label: String,
    pub total: Decimal,
    pub avg: Decimal,
}

// 3. Pizza (participação de cada status)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PieSlice {
    #[schema(example = "2")]
    pub label: String, // código do status
    #[schema(example = 62.5)]
    pub value: Decimal,
}

// 4. Barras (receita por categoria)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct BarEntry {
    #[schema(example = "Bebidas")]
    pub label: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub summary_total: SummaryTotal,
    pub line_chart_data: Vec<LineChartPoint>,
    pub pie_chart_data: Vec<PieSlice>,
    pub bar_chart_data: Vec<BarEntry>,
}

// 5. Ranking de produtos
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct TopProductEntry {
    #[sqlx(rename = "product_name")]
    #[schema(example = "Café gelado")]
    pub name: String,
    pub price: Decimal,
    #[sqlx(rename = "category_name")]
    #[schema(example = "Bebidas")]
    pub category: String,
    #[sqlx(rename = "total_quantity")]
    pub quantity: i64,
    #[sqlx(rename = "total_amount")]
    pub amount: Decimal,
}

// --- Linhas cruas das agregações ---

#[derive(Debug, Clone, FromRow)]
pub struct RevenueBucketRow {
    pub bucket: NaiveDate,
    pub total: Decimal,
    pub avg: Decimal,
}

#[derive(Debug, Clone, FromRow)]
pub struct StatusCountRow {
    pub status: String,
    pub count: i64,
}

#[derive(Debug, Clone, Copy, FromRow)]
pub struct OrderCounts {
    pub total: i64,
    pub completed: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(sales: i64, orders: i64, revenue: i64, rate: i64) -> PeriodMetrics {
        PeriodMetrics {
            total_sales: sales,
            total_orders: orders,
            total_revenue: Decimal::from(revenue),
            fulfillment_rate: Decimal::from(rate),
        }
    }

    #[test]
    fn compares_every_metric_with_the_same_rule() {
        let current = metrics(150, 10, 50, 80);
        let previous = metrics(100, 0, 100, 80);

        let comparisons = current.compare_with(&previous);
        assert_eq!(comparisons.sales_change, Decimal::from(50));
        assert_eq!(comparisons.orders_change, Decimal::from(100));
        assert_eq!(comparisons.revenue_change, Decimal::from(-50));
        assert_eq!(comparisons.fulfillment_rate_change, Decimal::ZERO);
    }

    #[test]
    fn summary_serializes_in_camel_case() {
        let current = metrics(3, 2, 25, 50);
        let summary = current.into_summary(current.compare_with(&metrics(0, 0, 0, 0)));
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["totalSales"], 3);
        assert_eq!(json["fulfillmentRate"], 50.0);
        assert_eq!(json["comparisons"]["revenueChange"], 100.0);
        assert_eq!(json["comparisons"]["fulfillmentRateChange"], 100.0);
    }
}
