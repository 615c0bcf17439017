//! Entities module
pub mod product;
pub mod trend;

pub use product::{Product, SalesRecord};
pub use trend::{ProductTrend, RestockPlan, TrendDirection};
