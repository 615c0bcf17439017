//! Catalog entities read from the storefront database.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::Money;

/// A sellable product as the advisor sees it: identity, stock on hand and pricing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub current_stock: u32,
    pub unit_cost: Money,
    pub unit_price: Money,
}

/// Units of one product sold on one calendar day, from finalized orders.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesRecord {
    pub product_id: Uuid,
    pub date: NaiveDate,
    pub units_sold: u32,
}

impl SalesRecord {
    pub fn new(product_id: Uuid, date: NaiveDate, units_sold: u32) -> Self { Self { product_id, date, units_sold } }
}
