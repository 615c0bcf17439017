//! Request-scoped orchestration: fetch a snapshot, evaluate every product,
//! then filter or aggregate.
//!
//! Nothing is cached between calls. A failed sales-history fetch for one
//! product is reported alongside the results instead of failing the batch.

use chrono::{NaiveDate, Utc};
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::domain::entities::{ProductTrend, RestockPlan};
use crate::domain::forecast::{self, window_bounds, ForecastSettings, SeasonalTable};
use crate::domain::value_objects::{HorizonDays, LookbackDays};
use crate::error::Result;
use crate::repository::InventorySource;

/// Validated parameters for one advisor call.
#[derive(Clone, Debug, PartialEq)]
pub struct ForecastQuery {
    pub category: Option<String>,
    pub horizon: HorizonDays,
    pub lookback: LookbackDays,
    pub as_of: NaiveDate,
}

/// A product left out of the results because its data could not be read.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFailure {
    pub product_id: Uuid,
    pub name: String,
    pub error: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendReport {
    pub as_of: NaiveDate,
    pub horizon_days: HorizonDays,
    pub lookback_days: LookbackDays,
    pub trends: Vec<ProductTrend>,
    pub failures: Vec<ItemFailure>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertReport {
    pub as_of: NaiveDate,
    pub threshold_days: u32,
    pub alerts: Vec<ProductTrend>,
    pub failures: Vec<ItemFailure>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestockReport {
    pub as_of: NaiveDate,
    pub horizon_days: HorizonDays,
    pub plan: RestockPlan,
    pub failures: Vec<ItemFailure>,
}

pub struct Advisor {
    source: Arc<dyn InventorySource>,
    settings: ForecastSettings,
    seasonal: SeasonalTable,
    currency: String,
    default_lookback: LookbackDays,
    default_horizon: HorizonDays,
    fixed_today: Option<NaiveDate>,
}

impl Advisor {
    pub fn new(
        source: Arc<dyn InventorySource>,
        settings: ForecastSettings,
        seasonal: SeasonalTable,
        currency: &str,
        default_lookback: LookbackDays,
        default_horizon: HorizonDays,
    ) -> Self {
        Self { source, settings, seasonal, currency: currency.to_uppercase(), default_lookback, default_horizon, fixed_today: None }
    }

    /// Pins "today" for [`Advisor::query_now`] instead of reading the UTC clock.
    pub fn with_fixed_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    pub fn settings(&self) -> &ForecastSettings { &self.settings }

    pub fn today(&self) -> NaiveDate { self.fixed_today.unwrap_or_else(|| Utc::now().date_naive()) }

    /// Validates raw parameters, filling in defaults. Runs before any fetch.
    pub fn query(&self, category: Option<String>, horizon_days: Option<u32>, lookback_days: Option<u32>, as_of: NaiveDate) -> Result<ForecastQuery> {
        let horizon = horizon_days.map(HorizonDays::new).transpose()?.unwrap_or(self.default_horizon);
        let lookback = lookback_days.map(LookbackDays::new).transpose()?.unwrap_or(self.default_lookback);
        let category = category.map(|c| c.trim().to_string()).filter(|c| !c.is_empty());
        Ok(ForecastQuery { category, horizon, lookback, as_of })
    }

    /// Same as [`Advisor::query`] with `as_of` set to [`Advisor::today`].
    pub fn query_now(&self, category: Option<String>, horizon_days: Option<u32>, lookback_days: Option<u32>) -> Result<ForecastQuery> {
        self.query(category, horizon_days, lookback_days, self.today())
    }

    #[instrument(skip(self), fields(category = ?q.category, horizon = %q.horizon, lookback = %q.lookback))]
    pub async fn trends(&self, q: &ForecastQuery) -> Result<TrendReport> {
        let (trends, failures) = self.evaluate(q).await?;
        Ok(TrendReport { as_of: q.as_of, horizon_days: q.horizon, lookback_days: q.lookback, trends, failures })
    }

    #[instrument(skip(self), fields(category = ?q.category))]
    pub async fn alerts(&self, q: &ForecastQuery, threshold_days: Option<u32>) -> Result<AlertReport> {
        let threshold_days = threshold_days.unwrap_or(self.settings.alert_threshold_days);
        let (trends, failures) = self.evaluate(q).await?;
        let alerts = forecast::alerts(&trends, threshold_days);
        info!(alerts = alerts.len(), threshold_days, "stockout alerts computed");
        Ok(AlertReport { as_of: q.as_of, threshold_days, alerts, failures })
    }

    #[instrument(skip(self), fields(category = ?q.category, horizon = %q.horizon))]
    pub async fn restock_plan(&self, q: &ForecastQuery) -> Result<RestockReport> {
        let (trends, mut failures) = self.evaluate(q).await?;
        let (plan, rejected) = forecast::restock_plan(&trends, &self.currency);
        for r in rejected {
            warn!(product_id = %r.trend.product_id, error = %r.error, "leaving product out of restock plan");
            failures.push(ItemFailure { product_id: r.trend.product_id, name: r.trend.name, error: r.error.to_string() });
        }
        info!(items = plan.total_items, cost = %plan.total_estimated_cost, "restock plan computed");
        Ok(RestockReport { as_of: q.as_of, horizon_days: q.horizon, plan, failures })
    }

    async fn evaluate(&self, q: &ForecastQuery) -> Result<(Vec<ProductTrend>, Vec<ItemFailure>)> {
        let products = self.source.products(q.category.as_deref()).await?;
        let (start, end) = window_bounds(q.lookback, q.as_of);
        debug!(products = products.len(), %start, %end, "evaluating snapshot");

        let histories = join_all(products.iter().map(|p| self.source.sales_history(p.id, start, end))).await;

        let mut trends = Vec::with_capacity(products.len());
        let mut failures = Vec::new();
        for (product, history) in products.iter().zip(histories) {
            match history {
                Ok(history) => trends.push(forecast::evaluate_product(product, &history, q.lookback, q.horizon, q.as_of, &self.settings, &self.seasonal)),
                Err(e) => {
                    warn!(product_id = %product.id, error = %e, "skipping product, sales history unavailable");
                    failures.push(ItemFailure { product_id: product.id, name: product.name.clone(), error: e.to_string() });
                }
            }
        }
        Ok((trends, failures))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Product, SalesRecord};
    use crate::domain::value_objects::Money;
    use crate::error::AdvisorError;
    use crate::repository::{RepositoryError, StaticInventorySource};
    use chrono::Days;
    use rust_decimal::Decimal;

    fn as_of() -> NaiveDate { NaiveDate::from_ymd_opt(2024, 11, 30).unwrap() }

    fn product(name: &str, stock: u32, cost_cents: i64) -> Product {
        Product {
            id: Uuid::new_v4(), name: name.into(), brand: "Aso".into(), category: "dresses".into(),
            current_stock: stock, unit_cost: Money::usd(Decimal::new(cost_cents, 2)), unit_price: Money::usd(Decimal::new(cost_cents * 2, 2)),
        }
    }

    fn daily(p: &Product, per_day: u32) -> Vec<SalesRecord> {
        (0..90).map(|i| SalesRecord::new(p.id, as_of().checked_sub_days(Days::new(i)).unwrap(), per_day)).collect()
    }

    fn advisor(source: StaticInventorySource) -> Advisor {
        Advisor::new(Arc::new(source), ForecastSettings::default(), SeasonalTable::new(), "usd",
            LookbackDays::new(90).unwrap(), HorizonDays::new(30).unwrap())
    }

    #[test]
    fn test_query_defaults_and_validation() {
        let a = advisor(StaticInventorySource::default());
        let q = a.query(Some("  ".into()), None, None, as_of()).unwrap();
        assert_eq!(q.category, None);
        assert_eq!(q.horizon.get(), 30);
        assert_eq!(q.lookback.get(), 90);
        assert!(matches!(a.query(None, Some(0), None, as_of()), Err(AdvisorError::InvalidArgument(_))));
        assert!(matches!(a.query(None, None, Some(0), as_of()), Err(AdvisorError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_report_pipeline() {
        let tee = product("tee", 20, 1000);
        let coat = product("coat", 1000, 5000);
        let mut sales = daily(&tee, 2);
        sales.extend(daily(&coat, 1));
        let a = advisor(StaticInventorySource::new(vec![tee.clone(), coat.clone()], sales));
        let q = a.query(None, None, None, as_of()).unwrap();

        let trends = a.trends(&q).await.unwrap();
        assert_eq!(trends.trends.len(), 2);
        assert!(trends.failures.is_empty());

        let alerts = a.alerts(&q, None).await.unwrap();
        assert_eq!(alerts.alerts.len(), 1);
        assert_eq!(alerts.alerts[0].product_id, tee.id);

        let report = a.restock_plan(&q).await.unwrap();
        assert_eq!(report.plan.total_items, 46);
        assert_eq!(report.plan.total_estimated_cost, Money::usd(Decimal::new(460, 0)));
    }

    #[tokio::test]
    async fn test_idempotent_over_same_snapshot() {
        let tee = product("tee", 20, 1000);
        let a = advisor(StaticInventorySource::new(vec![tee.clone()], daily(&tee, 2)));
        let q = a.query(None, Some(21), Some(60), as_of()).unwrap();
        assert_eq!(a.trends(&q).await.unwrap(), a.trends(&q).await.unwrap());
        assert_eq!(a.alerts(&q, Some(7)).await.unwrap(), a.alerts(&q, Some(7)).await.unwrap());
        assert_eq!(a.restock_plan(&q).await.unwrap(), a.restock_plan(&q).await.unwrap());
    }

    #[tokio::test]
    async fn test_per_item_failure_is_isolated() {
        let tee = product("tee", 20, 1000);
        let skirt = product("skirt", 5, 1500);
        let mut sales = daily(&tee, 2);
        sales.extend(daily(&skirt, 1));
        let source = StaticInventorySource::new(vec![tee.clone(), skirt.clone()], sales).with_broken_history(skirt.id);
        let a = advisor(source);
        let q = a.query(None, None, None, as_of()).unwrap();

        let report = a.trends(&q).await.unwrap();
        assert_eq!(report.trends.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].product_id, skirt.id);
    }

    #[test]
    fn test_query_now_uses_pinned_today() {
        let a = advisor(StaticInventorySource::default()).with_fixed_today(as_of());
        assert_eq!(a.query_now(None, None, None).unwrap().as_of, as_of());
    }

    #[tokio::test]
    async fn test_foreign_currency_cost_becomes_failure() {
        let tee = product("tee", 20, 1000);
        let mut agbada = product("agbada", 20, 1000);
        agbada.unit_cost = Money::new(Decimal::new(5000, 0), "NGN");
        let mut sales = daily(&tee, 2);
        sales.extend(daily(&agbada, 2));
        let a = advisor(StaticInventorySource::new(vec![tee.clone(), agbada.clone()], sales));
        let q = a.query(None, None, None, as_of()).unwrap();

        let report = a.restock_plan(&q).await.unwrap();
        assert_eq!(report.plan.total_items, 46);
        assert_eq!(report.plan.total_estimated_cost, Money::usd(Decimal::new(460, 0)));
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].product_id, agbada.id);
    }

    /// Every history call parks on a barrier sized to the product count, so
    /// the batch only completes when all fetches are in flight together.
    struct RendezvousSource {
        inner: StaticInventorySource,
        barrier: tokio::sync::Barrier,
    }

    #[async_trait::async_trait]
    impl InventorySource for RendezvousSource {
        async fn products(&self, category: Option<&str>) -> std::result::Result<Vec<Product>, RepositoryError> {
            self.inner.products(category).await
        }

        async fn sales_history(&self, product_id: Uuid, start: NaiveDate, end: NaiveDate) -> std::result::Result<Vec<SalesRecord>, RepositoryError> {
            self.barrier.wait().await;
            self.inner.sales_history(product_id, start, end).await
        }
    }

    #[tokio::test]
    async fn test_histories_are_fetched_concurrently() {
        let products: Vec<Product> = (0..4).map(|i| product(&format!("item-{i}"), 20, 1000)).collect();
        let sales = products.iter().flat_map(|p| daily(p, 2)).collect();
        let source = RendezvousSource {
            inner: StaticInventorySource::new(products.clone(), sales),
            barrier: tokio::sync::Barrier::new(products.len()),
        };
        let a = Advisor::new(Arc::new(source), ForecastSettings::default(), SeasonalTable::new(), "usd",
            LookbackDays::new(90).unwrap(), HorizonDays::new(30).unwrap());
        let q = a.query(None, None, None, as_of()).unwrap();

        let report = tokio::time::timeout(std::time::Duration::from_secs(5), a.trends(&q))
            .await
            .expect("history fetches ran one at a time")
            .unwrap();
        assert_eq!(report.trends.len(), 4);
        let names: Vec<&str> = report.trends.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["item-0", "item-1", "item-2", "item-3"]);
    }

    #[tokio::test]
    async fn test_product_fetch_failure_propagates() {
        let a = advisor(StaticInventorySource::default().offline());
        let q = a.query(None, None, None, as_of()).unwrap();
        let err = a.restock_plan(&q).await.unwrap_err();
        assert!(err.is_retryable());
    }
}
