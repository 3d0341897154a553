pub mod error;
pub mod labels;
pub mod metrics;
pub mod period;
pub mod sort;
