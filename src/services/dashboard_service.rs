// src/services/dashboard_service.rs

use std::collections::HashMap;

use chrono::NaiveDate;
use chrono_tz::Tz;
use rust_decimal::Decimal;

use crate::{
    common::{
        error::AppError,
        labels::{chart_buckets, Granularity},
        metrics::{fulfillment_rate, round_whole, share_percent},
        period::{business_today, current_period, previous_period, Period, RangeSelector},
        sort::SortSpec,
    },
    db::{dashboard_repo::Bounds, DashboardRepository},
    models::dashboard::{
        BarEntry, DashboardData, LineChartPoint, PeriodMetrics, PieSlice, RevenueBucketRow,
        StatusCountRow, SummaryTotal, TopProductEntry,
    },
};

// Quantidade de linhas do ranking de produtos
pub const TOP_PRODUCTS_LIMIT: i64 = 20;

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
    tz: Tz,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository, tz: Tz) -> Self {
        Self { repo, tz }
    }

    pub fn resolve_period(&self, range: RangeSelector) -> Period {
        current_period(range, business_today(&self.tz))
    }

    fn bounds(&self, period: &Period) -> Bounds {
        period.bounds(&self.tz)
    }

    // --- DASHBOARD COMPLETO ---

    /// Resumo + três gráficos. As quatro leituras são independentes e rodam
    /// em paralelo; a primeira que falhar derruba a resposta inteira.
    pub async fn get_dashboard(&self, range: RangeSelector) -> Result<DashboardData, AppError> {
        let period = self.resolve_period(range);
        tracing::debug!(range = range.code(), ?period, "Montando dashboard");

        let (summary_total, line_chart_data, pie_chart_data, bar_chart_data) = tokio::try_join!(
            self.fetch_summary_total(range, &period),
            self.fetch_line_chart_data(range, &period),
            self.fetch_pie_chart_data(&period),
            self.fetch_bar_chart_data(&period),
        )?;

        Ok(DashboardData {
            summary_total,
            line_chart_data,
            pie_chart_data,
            bar_chart_data,
        })
    }

    // --- RESUMO ---

    pub async fn fetch_summary_total(
        &self,
        range: RangeSelector,
        period: &Period,
    ) -> Result<SummaryTotal, AppError> {
        // Período anterior calculado na hora; as duas leituras correm juntas
        let previous = previous_period(range, period);
        tracing::debug!(?previous, "Período de comparação");

        let (current, previous) =
            tokio::try_join!(self.period_metrics(period), self.period_metrics(&previous))?;

        Ok(current.into_summary(current.compare_with(&previous)))
    }

    pub async fn period_metrics(&self, period: &Period) -> Result<PeriodMetrics, AppError> {
        let bounds = self.bounds(period);

        let (total_sales, total_orders, total_revenue, fulfillment_rate) = tokio::try_join!(
            self.repo.count_total_sales(bounds),
            self.repo.count_total_orders(bounds),
            self.repo.calculate_total_revenue(bounds),
            self.calculate_fulfillment_rate(bounds),
        )?;

        Ok(PeriodMetrics {
            total_sales,
            total_orders,
            total_revenue,
            fulfillment_rate,
        })
    }

    async fn calculate_fulfillment_rate(&self, bounds: Bounds) -> Result<Decimal, AppError> {
        let counts = self.repo.count_orders_by_completion(bounds).await?;
        Ok(fulfillment_rate(counts.completed, counts.total))
    }

    // --- GRÁFICOS ---

    pub async fn fetch_line_chart_data(
        &self,
        range: RangeSelector,
        period: &Period,
    ) -> Result<Vec<LineChartPoint>, AppError> {
        let granularity = Granularity::from(range);
        let rows = self
            .repo
            .revenue_by_bucket(self.bounds(period), granularity, &self.tz)
            .await?;

        Ok(fill_line_chart(&chart_buckets(period, granularity), granularity, rows))
    }

    pub async fn fetch_pie_chart_data(&self, period: &Period) -> Result<Vec<PieSlice>, AppError> {
        let rows = self.repo.count_by_status(self.bounds(period)).await?;
        Ok(pie_slices(&rows))
    }

    pub async fn fetch_bar_chart_data(&self, period: &Period) -> Result<Vec<BarEntry>, AppError> {
        self.repo.revenue_by_category(self.bounds(period)).await
    }

    // --- RANKING ---

    pub async fn get_top_products(
        &self,
        range: RangeSelector,
        sort: SortSpec,
        category_id: Option<i64>,
    ) -> Result<Vec<TopProductEntry>, AppError> {
        let period = self.resolve_period(range);
        tracing::debug!(range = range.code(), ?period, ?sort, ?category_id, "Ranking de produtos");

        self.repo
            .top_products(self.bounds(&period), sort, category_id, TOP_PRODUCTS_LIMIT)
            .await
    }
}

/// Uma entrada por bucket, na ordem do eixo X; buckets sem venda ficam zerados.
pub fn fill_line_chart(
    buckets: &[NaiveDate],
    granularity: Granularity,
    rows: Vec<RevenueBucketRow>,
) -> Vec<LineChartPoint> {
    let by_bucket: HashMap<NaiveDate, RevenueBucketRow> = rows
        .into_iter()
        .map(|row| (granularity.bucket_of(row.bucket), row))
        .collect();

    buckets
        .iter()
        .map(|bucket| {
            let (total, avg) = by_bucket
                .get(bucket)
                .map(|row| (round_whole(row.total), round_whole(row.avg)))
                .unwrap_or((Decimal::ZERO, Decimal::ZERO));

            LineChartPoint {
                label: granularity.label(*bucket),
                total,
                avg,
            }
        })
        .collect()
}

pub fn pie_slices(rows: &[StatusCountRow]) -> Vec<PieSlice> {
    let total: i64 = rows.iter().map(|row| row.count).sum();

    rows.iter()
        .map(|row| PieSlice {
            label: row.status.clone(),
            value: share_percent(row.count, total),
        })
        .collect()
}
