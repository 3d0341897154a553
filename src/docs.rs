// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Catálogo ---
        handlers::catalog::get_all_categories,
        handlers::catalog::get_all_products,
        handlers::catalog::get_products_by_category,

        // --- Pedidos ---
        handlers::order::create_order,

        // --- Dashboard ---
        handlers::dashboard::get_dashboard,
        handlers::dashboard::get_top_products,
        handlers::dashboard::export_top_products,
    ),
    components(
        schemas(
            // --- Catálogo ---
            models::catalog::Category,
            models::catalog::ProductSummary,

            // --- Pedidos ---
            models::order::CreateOrderPayload,
            models::order::OrderItemPayload,
            models::order::CreateOrderResponse,

            // --- Dashboard ---
            models::dashboard::DashboardData,
            models::dashboard::SummaryTotal,
            models::dashboard::Comparisons,
            models::dashboard::LineChartPoint,
            models::dashboard::PieSlice,
            models::dashboard::BarEntry,
            models::dashboard::TopProductEntry,
        )
    ),
    tags(
        (name = "Catalog", description = "Categorias e Produtos"),
        (name = "Orders", description = "Criação de Pedidos"),
        (name = "Dashboard", description = "Indicadores e Gráficos de Vendas")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/api/category",
            "/api/product",
            "/api/product/{category_id}",
            "/api/order",
            "/api/dashboard",
            "/api/dashboard/top-products",
            "/api/dashboard/export-top-products",
        ] {
            assert!(paths.contains(&expected), "faltando {expected}");
        }
    }
}
