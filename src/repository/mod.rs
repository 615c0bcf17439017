//! Read-only access to products and sales history.
//!
//! The advisor never writes. Implementations only need to guarantee that a
//! single call sees a consistent read.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::{Product, SalesRecord};

pub mod memory;
pub mod postgres;

pub use memory::StaticInventorySource;
pub use postgres::PgInventorySource;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid row: {0}")]
    InvalidRow(String),

    #[error("Source unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait InventorySource: Send + Sync {
    /// Active products, optionally restricted to one category.
    async fn products(&self, category: Option<&str>) -> Result<Vec<Product>, RepositoryError>;

    /// Per-day unit sales for `product_id` between `start` and `end`, both inclusive.
    async fn sales_history(&self, product_id: Uuid, start: NaiveDate, end: NaiveDate) -> Result<Vec<SalesRecord>, RepositoryError>;
}
