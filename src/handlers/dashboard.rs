// src/handlers/dashboard.rs

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::{
        error::{ApiError, AppError},
        period::RangeSelector,
        sort::SortSpec,
    },
    config::AppState,
    models::{
        dashboard::{DashboardData, TopProductEntry},
        response::ApiResponse,
    },
    services::export_service::{top_products_spreadsheet, CSV_CONTENT_TYPE, TOP_PRODUCTS_FILENAME},
};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    /// "7" últimos 7 dias (padrão), "01" ano até hoje, "02" mês até hoje
    #[param(example = "7")]
    pub range: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TopProductsQuery {
    /// "7" últimos 7 dias (padrão), "01" ano até hoje, "02" mês até hoje
    #[param(example = "7")]
    pub range: Option<String>,
    /// "<chave>-<direção>": name, price, category, quantity, amount / asc, desc
    #[param(example = "amount-desc")]
    pub sort: Option<String>,
    #[param(example = "1")]
    pub category_id: Option<String>,
}

// Filtros já validados do ranking
struct TopProductsFilter {
    range: RangeSelector,
    sort: SortSpec,
    category_id: Option<i64>,
}

impl TopProductsQuery {
    fn to_filter(&self) -> Result<TopProductsFilter, AppError> {
        let category_id = match self.category_id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                raw.parse::<i64>()
                    .map_err(|_| AppError::BadRequest(format!("Invalid category_id: '{raw}'")))?,
            ),
        };

        Ok(TopProductsFilter {
            range: RangeSelector::from_query(self.range.as_deref())?,
            sort: SortSpec::from_query(self.sort.as_deref()),
            category_id,
        })
    }

    // Entradas cruas, como chegaram na query string
    fn log_failure(&self, message: &str) {
        tracing::error!(
            range = ?self.range,
            sort = ?self.sort,
            category_id = ?self.category_id,
            "{}",
            message
        );
    }
}

// GET /api/dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Resumo + gráficos de linha, pizza e barras", body = ApiResponse<DashboardData>),
        (status = 500, description = "Range desconhecido ou falha em alguma agregação")
    )
)]
pub async fn get_dashboard(
    State(app_state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let range = RangeSelector::from_query(query.range.as_deref()).map_err(|app_err| {
        tracing::error!(range = ?query.range, "Falha ao montar o dashboard");
        app_err.to_api_error("Internal Server Error")
    })?;

    let dashboard = app_state
        .dashboard_service
        .get_dashboard(range)
        .await
        .map_err(|app_err| {
            tracing::error!(range = range.code(), "Falha ao montar o dashboard");
            app_err.to_api_error("Internal Server Error").without_detail()
        })?;

    Ok((StatusCode::OK, Json(ApiResponse::ok(dashboard))))
}

// GET /api/dashboard/top-products
#[utoipa::path(
    get,
    path = "/api/dashboard/top-products",
    tag = "Dashboard",
    params(TopProductsQuery),
    responses(
        (status = 200, description = "Ranking dos produtos mais vendidos (até 20)", body = ApiResponse<Vec<TopProductEntry>>),
        (status = 400, description = "category_id inválido"),
        (status = 500, description = "Range desconhecido ou falha na agregação")
    )
)]
pub async fn get_top_products(
    State(app_state): State<AppState>,
    Query(query): Query<TopProductsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let products = load_top_products(&app_state, &query)
        .await
        .map_err(|app_err| {
            query.log_failure("Falha ao montar o ranking de produtos");
            app_err.to_api_error("Internal Server Error").without_detail()
        })?;

    Ok((StatusCode::OK, Json(ApiResponse::ok(products))))
}

// GET /api/dashboard/export-top-products
#[utoipa::path(
    get,
    path = "/api/dashboard/export-top-products",
    tag = "Dashboard",
    params(TopProductsQuery),
    responses(
        (status = 200, description = "Planilha CSV do ranking", content_type = "text/csv", body = Vec<u8>),
        (status = 204, description = "Nenhum produto no período"),
        (status = 400, description = "category_id inválido"),
        (status = 500, description = "Range desconhecido, falha na agregação ou na exportação")
    )
)]
pub async fn export_top_products(
    State(app_state): State<AppState>,
    Query(query): Query<TopProductsQuery>,
) -> Result<Response, ApiError> {
    let products = load_top_products(&app_state, &query)
        .await
        .map_err(|app_err| {
            query.log_failure("Falha ao montar o ranking para exportação");
            app_err.to_api_error("Internal Server Error").without_detail()
        })?;

    if products.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let bytes = top_products_spreadsheet(&products).map_err(|app_err| {
        query.log_failure("Falha ao gerar a planilha de produtos");
        app_err.to_api_error("Internal Server Error").without_detail()
    })?;

    // Headers para o navegador baixar o arquivo
    let headers = [
        (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={TOP_PRODUCTS_FILENAME}"),
        ),
    ];

    Ok((headers, bytes).into_response())
}

async fn load_top_products(
    app_state: &AppState,
    query: &TopProductsQuery,
) -> Result<Vec<TopProductEntry>, AppError> {
    let filter = query.to_filter()?;
    app_state
        .dashboard_service
        .get_top_products(filter.range, filter.sort, filter.category_id)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::sort::{SortDirection, SortKey};
    use axum::http::Uri;

    fn top_query(uri: &str) -> TopProductsQuery {
        let uri: Uri = uri.parse().unwrap();
        Query::<TopProductsQuery>::try_from_uri(&uri).unwrap().0
    }

    #[test]
    fn top_products_defaults() {
        let filter = top_query("/api/dashboard/top-products").to_filter().unwrap();

        assert_eq!(filter.range, RangeSelector::LastSevenDays);
        assert_eq!(filter.sort, SortSpec::default());
        assert_eq!(filter.category_id, None);
    }

    #[test]
    fn top_products_full_query() {
        let filter = top_query("/x?range=02&sort=quantity-asc&category_id=3")
            .to_filter()
            .unwrap();

        assert_eq!(filter.range, RangeSelector::MonthToDate);
        assert_eq!(filter.sort.key, SortKey::Quantity);
        assert_eq!(filter.sort.direction, SortDirection::Asc);
        assert_eq!(filter.category_id, Some(3));
    }

    #[test]
    fn empty_category_means_no_filter() {
        let filter = top_query("/x?category_id=&range=").to_filter().unwrap();
        assert_eq!(filter.category_id, None);
        assert_eq!(filter.range, RangeSelector::LastSevenDays);
    }

    #[test]
    fn bad_inputs_are_rejected() {
        assert!(matches!(
            top_query("/x?range=99").to_filter(),
            Err(AppError::InvalidRange(_))
        ));
        assert!(matches!(
            top_query("/x?category_id=abc").to_filter(),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn unknown_range_answers_generic_500() {
        let Err(app_err) = top_query("/x?range=30").to_filter() else {
            panic!("range 30 should not parse");
        };
        let api = app_err.to_api_error("Internal Server Error").without_detail();

        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.message, "Internal Server Error");
        assert!(api.error.is_none());
    }
}
