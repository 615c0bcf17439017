//! Alert list and restock plan over already-computed product trends.

use crate::domain::entities::{ProductTrend, RestockPlan};
use crate::domain::value_objects::{Money, MoneyError};

/// Products projected to stock out within `threshold_days`, soonest first.
///
/// Ties are broken by descending sales velocity. Products with no
/// foreseeable stockout never alert.
pub fn alerts(trends: &[ProductTrend], threshold_days: u32) -> Vec<ProductTrend> {
    let mut out: Vec<ProductTrend> = trends.iter()
        .filter(|t| t.days_until_stockout.is_some_and(|d| d <= threshold_days))
        .cloned()
        .collect();
    out.sort_by(|a, b| a.days_until_stockout.cmp(&b.days_until_stockout).then_with(|| b.sales_velocity.total_cmp(&a.sales_velocity)));
    out
}

/// A product left out of the plan because its cost is not in the plan currency.
#[derive(Clone, Debug, PartialEq)]
pub struct RejectedRestock {
    pub trend: ProductTrend,
    pub error: MoneyError,
}

/// Aggregates every product with a positive recommendation into a plan, largest order first.
///
/// Costs are summed as `recommendation × unit cost` in `currency`. Products
/// costed in another currency are returned separately and not counted.
pub fn restock_plan(trends: &[ProductTrend], currency: &str) -> (RestockPlan, Vec<RejectedRestock>) {
    let mut total = Money::zero(currency);
    let mut recommendations = Vec::new();
    let mut rejected = Vec::new();
    for t in trends.iter().filter(|t| t.restock_recommendation > 0) {
        match total.add(&t.unit_cost.multiply(t.restock_recommendation)) {
            Ok(sum) => { total = sum; recommendations.push(t.clone()); }
            Err(error) => rejected.push(RejectedRestock { trend: t.clone(), error }),
        }
    }
    recommendations.sort_by(|a, b| b.restock_recommendation.cmp(&a.restock_recommendation).then_with(|| a.name.cmp(&b.name)));
    let total_items = recommendations.iter().map(|t| u64::from(t.restock_recommendation)).sum();

    (RestockPlan { total_items, total_estimated_cost: total, recommendations }, rejected)
}
