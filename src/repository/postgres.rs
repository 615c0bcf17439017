//! PostgreSQL source over the storefront schema (`products`, `categories`, `orders`, `order_items`).
//!
//! Prices are stored as integer minor units alongside a currency code. The
//! schema has no cost column; unit cost is read from `metadata.cost` in the
//! same minor units and treated as zero when absent or not an integer.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use super::{InventorySource, RepositoryError};
use crate::domain::entities::{Product, SalesRecord};
use crate::domain::value_objects::Money;

const PRODUCTS_SQL: &str = "\
    SELECT p.id, p.name, COALESCE(p.metadata->>'brand', '') AS brand, COALESCE(c.name, 'uncategorized') AS category, \
           p.inventory_quantity, \
           CASE WHEN p.metadata->>'cost' ~ '^[0-9]{1,18}$' THEN (p.metadata->>'cost')::bigint END AS cost, \
           p.price, p.currency \
    FROM products p LEFT JOIN categories c ON c.id = p.category_id \
    WHERE p.status = 'active' AND ($1::text IS NULL OR lower(c.slug) = lower($1) OR lower(c.name) = lower($1)) \
    ORDER BY p.name, p.id";

// Only finalized orders count; pending/cancelled/refunded ones can still change.
const SALES_SQL: &str = "\
    SELECT oi.product_id, o.created_at::date AS day, SUM(oi.quantity)::bigint AS units \
    FROM order_items oi JOIN orders o ON o.id = oi.order_id \
    WHERE oi.product_id = $1 AND o.status NOT IN ('pending', 'cancelled', 'refunded') \
      AND o.created_at::date BETWEEN $2 AND $3 \
    GROUP BY oi.product_id, day ORDER BY day";

#[derive(Debug, sqlx::FromRow)]
struct ProductRow { id: Uuid, name: String, brand: String, category: String, inventory_quantity: i32, cost: Option<i64>, price: i64, currency: String }

impl From<ProductRow> for Product {
    fn from(r: ProductRow) -> Self {
        Self {
            id: r.id, name: r.name, brand: r.brand, category: r.category,
            // Oversold rows can go negative in the storefront; nothing is on hand.
            current_stock: u32::try_from(r.inventory_quantity).unwrap_or(0),
            unit_cost: Money::new(Decimal::new(r.cost.unwrap_or(0), 2), &r.currency),
            unit_price: Money::new(Decimal::new(r.price, 2), &r.currency),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SalesRow { product_id: Uuid, day: NaiveDate, units: Option<i64> }

impl TryFrom<SalesRow> for SalesRecord {
    type Error = RepositoryError;
    fn try_from(r: SalesRow) -> Result<Self, Self::Error> {
        let units = r.units.unwrap_or(0);
        let units_sold = u32::try_from(units)
            .map_err(|_| RepositoryError::InvalidRow(format!("units sold {units} for product {} on {}", r.product_id, r.day)))?;
        Ok(SalesRecord::new(r.product_id, r.day, units_sold))
    }
}

#[derive(Clone)]
pub struct PgInventorySource { pool: PgPool }

impl PgInventorySource {
    pub fn new(pool: PgPool) -> Self { Self { pool } }
}

#[async_trait]
impl InventorySource for PgInventorySource {
    #[instrument(skip(self))]
    async fn products(&self, category: Option<&str>) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(PRODUCTS_SQL).bind(category).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    #[instrument(skip(self))]
    async fn sales_history(&self, product_id: Uuid, start: NaiveDate, end: NaiveDate) -> Result<Vec<SalesRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, SalesRow>(SALES_SQL).bind(product_id).bind(start).bind(end).fetch_all(&self.pool).await?;
        rows.into_iter().map(SalesRecord::try_from).collect()
    }
}
