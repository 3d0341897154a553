pub mod catalog;
pub mod dashboard;
pub mod order;
