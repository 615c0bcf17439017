//! Advisor configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DATABASE_URL` - `PostgreSQL` connection string for the storefront database
//!
//! ## Optional
//! - `PORT` - Listen port (default: 8083)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 10)
//! - `ADVISOR_CURRENCY` - Currency of restock cost totals (default: USD)
//! - `ADVISOR_LOOKBACK_DAYS` - Default sales history window (default: 90)
//! - `ADVISOR_HORIZON_DAYS` - Default restock horizon (default: 30)
//! - `ADVISOR_ALERT_THRESHOLD_DAYS` - Alert when stockout is this close (default: 14)
//! - `ADVISOR_SAFETY_MARGIN` - Extra cover fraction (default: 0.1)
//! - `ADVISOR_STABLE_BAND` - ±relative change classified as stable (default: 0.05)
//! - `ADVISOR_RECENT_WINDOW_DAYS` - Recent sub-window for trend detection (default: 14)
//! - `ADVISOR_FULL_CONFIDENCE_DAYS` - Days with sales for full confidence (default: 30)
//! - `ADVISOR_SEASONAL_FACTORS` - `category=factor` pairs, comma separated

use std::str::FromStr;
use thiserror::Error;

use crate::domain::forecast::settings::{
    ForecastSettings, SeasonalTable, DEFAULT_ALERT_THRESHOLD_DAYS, DEFAULT_FULL_CONFIDENCE_DAYS, DEFAULT_HORIZON_DAYS,
    DEFAULT_LOOKBACK_DAYS, DEFAULT_RECENT_WINDOW_DAYS, DEFAULT_SAFETY_MARGIN, DEFAULT_STABLE_BAND,
};
use crate::domain::value_objects::{HorizonDays, LookbackDays};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    pub database_url: String,
    pub port: u16,
    pub max_connections: u32,
    pub currency: String,
    pub default_lookback: LookbackDays,
    pub default_horizon: HorizonDays,
    pub forecast: ForecastSettings,
    pub seasonal: SeasonalTable,
}

impl AdvisorConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes `std::env::var`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".into()))?;
        let port = parse_or(&lookup, "PORT", 8083u16)?;
        let max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", 10u32)?;
        let currency = lookup("ADVISOR_CURRENCY").map(|c| c.trim().to_uppercase()).unwrap_or_else(|| "USD".into());
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidEnvVar("ADVISOR_CURRENCY".into(), format!("expected ISO 4217 code, got {currency:?}")));
        }

        let default_lookback = LookbackDays::new(parse_or(&lookup, "ADVISOR_LOOKBACK_DAYS", DEFAULT_LOOKBACK_DAYS)?)
            .map_err(|e| ConfigError::InvalidEnvVar("ADVISOR_LOOKBACK_DAYS".into(), e.to_string()))?;
        let default_horizon = HorizonDays::new(parse_or(&lookup, "ADVISOR_HORIZON_DAYS", DEFAULT_HORIZON_DAYS)?)
            .map_err(|e| ConfigError::InvalidEnvVar("ADVISOR_HORIZON_DAYS".into(), e.to_string()))?;

        let forecast = ForecastSettings {
            recent_window_days: parse_or(&lookup, "ADVISOR_RECENT_WINDOW_DAYS", DEFAULT_RECENT_WINDOW_DAYS)?,
            stable_band: non_negative(&lookup, "ADVISOR_STABLE_BAND", DEFAULT_STABLE_BAND)?,
            full_confidence_active_days: parse_or(&lookup, "ADVISOR_FULL_CONFIDENCE_DAYS", DEFAULT_FULL_CONFIDENCE_DAYS)?,
            safety_margin_fraction: non_negative(&lookup, "ADVISOR_SAFETY_MARGIN", DEFAULT_SAFETY_MARGIN)?,
            alert_threshold_days: parse_or(&lookup, "ADVISOR_ALERT_THRESHOLD_DAYS", DEFAULT_ALERT_THRESHOLD_DAYS)?,
        };
        if forecast.recent_window_days == 0 || forecast.full_confidence_active_days == 0 {
            return Err(ConfigError::InvalidEnvVar("ADVISOR_RECENT_WINDOW_DAYS/ADVISOR_FULL_CONFIDENCE_DAYS".into(), "must be positive".into()));
        }

        let seasonal = match lookup("ADVISOR_SEASONAL_FACTORS") {
            Some(raw) => parse_seasonal(&raw)?,
            None => SeasonalTable::new(),
        };

        Ok(Self { database_url, port, max_connections, currency, default_lookback, default_horizon, forecast, seasonal })
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.into(), e.to_string())),
        None => Ok(default),
    }
}

fn non_negative(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: f64) -> Result<f64, ConfigError> {
    let value: f64 = parse_or(lookup, key, default)?;
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidEnvVar(key.into(), format!("must be a non-negative number, got {value}")));
    }
    Ok(value)
}

/// Parses `outerwear=1.3,swimwear=0.7`.
fn parse_seasonal(raw: &str) -> Result<SeasonalTable, ConfigError> {
    let invalid = |msg: String| ConfigError::InvalidEnvVar("ADVISOR_SEASONAL_FACTORS".into(), msg);
    raw.split(',').map(str::trim).filter(|pair| !pair.is_empty()).try_fold(SeasonalTable::new(), |table, pair| {
        let (category, factor) = pair.split_once('=').ok_or_else(|| invalid(format!("expected category=factor, got {pair:?}")))?;
        let factor: f64 = factor.trim().parse().map_err(|_| invalid(format!("bad factor in {pair:?}")))?;
        if category.trim().is_empty() || !factor.is_finite() {
            return Err(invalid(format!("bad entry {pair:?}")));
        }
        Ok(table.with_factor(category, factor))
    })
}
