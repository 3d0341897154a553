pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod order_repo;
pub use order_repo::OrderRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
