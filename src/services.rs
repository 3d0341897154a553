pub mod catalog_service;
pub mod dashboard_service;
pub mod export_service;
pub mod order_service;
