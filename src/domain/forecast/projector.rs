//! Stockout projection and restock quantity.

use crate::domain::value_objects::HorizonDays;

/// Velocities at or below this are treated as "not selling".
const MIN_VELOCITY: f64 = 1e-9;
/// Absorbs float noise so e.g. 2.0 * 30 * 1.1 rounds up to 66, not 67.
const DEMAND_EPSILON: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StockoutProjection {
    pub days_until_stockout: Option<u32>,
    pub restock_recommendation: u32,
}

impl StockoutProjection {
    pub fn no_stockout() -> Self { Self { days_until_stockout: None, restock_recommendation: 0 } }
}

/// Units needed on hand to cover `horizon` days of demand plus the safety margin.
pub fn target_cover(velocity: f64, horizon: HorizonDays, safety_margin_fraction: f64) -> u64 {
    let demand = velocity * f64::from(horizon.get()) * (1.0 + safety_margin_fraction.max(0.0));
    (demand - DEMAND_EPSILON).ceil().max(0.0) as u64
}

/// Projects when `current_stock` runs out at `velocity` units/day and how much to reorder.
///
/// The recommendation tops stock up to [`target_cover`] and is zero whenever
/// stock already covers it.
pub fn project(current_stock: u32, velocity: f64, horizon: HorizonDays, safety_margin_fraction: f64) -> StockoutProjection {
    if !velocity.is_finite() || velocity <= MIN_VELOCITY { return StockoutProjection::no_stockout(); }

    let days = (f64::from(current_stock) / velocity).floor();
    let days_until_stockout = Some(if days >= f64::from(u32::MAX) { u32::MAX } else { days as u32 });

    let shortfall = target_cover(velocity, horizon, safety_margin_fraction).saturating_sub(u64::from(current_stock));
    let restock_recommendation = u32::try_from(shortfall).unwrap_or(u32::MAX);

    StockoutProjection { days_until_stockout, restock_recommendation }
}
