//! Computed advisor output. Recomputed per request and never persisted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::Money;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Rising,
    #[default]
    Stable,
    Declining,
}

/// Trend, stockout projection and restock advice for a single product.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTrend {
    pub product_id: Uuid,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub current_stock: u32,
    pub unit_cost: Money,
    /// Mean units sold per day over the lookback window.
    pub sales_velocity: f64,
    pub seasonal_impact: f64,
    pub trend: TrendDirection,
    /// `None` when nothing is selling: no foreseeable stockout.
    pub days_until_stockout: Option<u32>,
    pub restock_recommendation: u32,
    pub confidence: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestockPlan {
    pub total_items: u64,
    pub total_estimated_cost: Money,
    pub recommendations: Vec<ProductTrend>,
}

impl RestockPlan {
    pub fn empty(currency: &str) -> Self {
        Self { total_items: 0, total_estimated_cost: Money::zero(currency), recommendations: vec![] }
    }

    pub fn is_empty(&self) -> bool { self.recommendations.is_empty() }
}
