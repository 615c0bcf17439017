//! Inventory forecasting: sales aggregation, trend classification,
//! stockout projection and restock planning.
//!
//! Everything here is a pure function of its inputs. Data fetching lives in
//! [`crate::repository`] and orchestration in [`crate::advisor`].

pub mod classifier;
pub mod planner;
pub mod projector;
pub mod sales_history;
pub mod settings;

pub use classifier::{classify, TrendSignal};
pub use planner::{alerts, restock_plan, RejectedRestock};
pub use projector::{project, StockoutProjection};
pub use sales_history::{aggregate, window_bounds, DailySeries};
pub use settings::{ForecastSettings, SeasonalTable};

use chrono::NaiveDate;

use crate::domain::entities::{Product, ProductTrend, SalesRecord};
use crate::domain::value_objects::{HorizonDays, LookbackDays};

/// Runs aggregation, classification and projection for one product.
pub fn evaluate_product(
    product: &Product,
    history: &[SalesRecord],
    lookback: LookbackDays,
    horizon: HorizonDays,
    as_of: NaiveDate,
    settings: &ForecastSettings,
    seasonal: &SeasonalTable,
) -> ProductTrend {
    let series = aggregate(history, product.id, lookback, as_of);
    let signal = classify(&series, &product.category, settings, seasonal);
    let projection = project(product.current_stock, signal.sales_velocity, horizon, settings.safety_margin_fraction);

    ProductTrend {
        product_id: product.id,
        name: product.name.clone(),
        brand: product.brand.clone(),
        category: product.category.clone(),
        current_stock: product.current_stock,
        unit_cost: product.unit_cost.clone(),
        sales_velocity: signal.sales_velocity,
        seasonal_impact: signal.seasonal_impact,
        trend: signal.trend,
        days_until_stockout: projection.days_until_stockout,
        restock_recommendation: projection.restock_recommendation,
        confidence: signal.confidence,
    }
}
