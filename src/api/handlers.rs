use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use validator::Validate;

use super::access::{Capability, StaffRole};
use super::AppState;
use crate::advisor::{AlertReport, RestockReport, TrendReport};
use crate::error::Result;

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ForecastParams {
    pub category: Option<String>,
    #[validate(range(min = 1, max = 365))]
    pub horizon_days: Option<u32>,
    #[validate(range(min = 1, max = 730))]
    pub lookback_days: Option<u32>,
    #[validate(range(max = 365))]
    pub threshold_days: Option<u32>,
}

pub async fn trends(State(s): State<AppState>, role: StaffRole, Query(p): Query<ForecastParams>) -> Result<Json<TrendReport>> {
    role.require(Capability::ViewTrends)?;
    p.validate()?;
    let q = s.advisor.query_now(p.category, p.horizon_days, p.lookback_days)?;
    Ok(Json(s.advisor.trends(&q).await?))
}

pub async fn alerts(State(s): State<AppState>, role: StaffRole, Query(p): Query<ForecastParams>) -> Result<Json<AlertReport>> {
    role.require(Capability::ViewAlerts)?;
    p.validate()?;
    let q = s.advisor.query_now(p.category, p.horizon_days, p.lookback_days)?;
    Ok(Json(s.advisor.alerts(&q, p.threshold_days).await?))
}

pub async fn restock_plan(State(s): State<AppState>, role: StaffRole, Query(p): Query<ForecastParams>) -> Result<Json<RestockReport>> {
    role.require(Capability::ViewRestockPlan)?;
    p.validate()?;
    let q = s.advisor.query_now(p.category, p.horizon_days, p.lookback_days)?;
    Ok(Json(s.advisor.restock_plan(&q).await?))
}
