//! In-memory snapshot source.
//!
//! Test fixture and sample-data backend. It holds whatever it was built with
//! and never generates data on its own.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashSet;
use uuid::Uuid;

use super::{InventorySource, RepositoryError};
use crate::domain::entities::{Product, SalesRecord};

#[derive(Clone, Debug, Default)]
pub struct StaticInventorySource {
    products: Vec<Product>,
    sales: Vec<SalesRecord>,
    broken_history: HashSet<Uuid>,
    offline: bool,
}

impl StaticInventorySource {
    pub fn new(products: Vec<Product>, sales: Vec<SalesRecord>) -> Self {
        Self { products, sales, ..Self::default() }
    }

    /// Makes `sales_history` fail for one product.
    pub fn with_broken_history(mut self, product_id: Uuid) -> Self {
        self.broken_history.insert(product_id);
        self
    }

    /// Makes every call fail as if the database were down.
    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    fn check_online(&self) -> Result<(), RepositoryError> {
        if self.offline { return Err(RepositoryError::Unavailable("inventory snapshot offline".into())); }
        Ok(())
    }
}

#[async_trait]
impl InventorySource for StaticInventorySource {
    async fn products(&self, category: Option<&str>) -> Result<Vec<Product>, RepositoryError> {
        self.check_online()?;
        Ok(self.products.iter()
            .filter(|p| category.map_or(true, |c| p.category.eq_ignore_ascii_case(c)))
            .cloned()
            .collect())
    }

    async fn sales_history(&self, product_id: Uuid, start: NaiveDate, end: NaiveDate) -> Result<Vec<SalesRecord>, RepositoryError> {
        self.check_online()?;
        if self.broken_history.contains(&product_id) {
            return Err(RepositoryError::Unavailable(format!("sales history for {product_id}")));
        }
        Ok(self.sales.iter()
            .filter(|s| s.product_id == product_id && s.date >= start && s.date <= end)
            .cloned()
            .collect())
    }
}
