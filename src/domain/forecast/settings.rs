//! Tunable constants for trend classification and restock projection.
//!
//! None of these are derived; they are operator-facing knobs and are read
//! from the environment by [`crate::config::AdvisorConfig`].

use std::collections::HashMap;

pub const DEFAULT_LOOKBACK_DAYS: u32 = 90;
pub const DEFAULT_HORIZON_DAYS: u32 = 30;
pub const DEFAULT_ALERT_THRESHOLD_DAYS: u32 = 14;
pub const DEFAULT_RECENT_WINDOW_DAYS: u32 = 14;
pub const DEFAULT_STABLE_BAND: f64 = 0.05;
pub const DEFAULT_SAFETY_MARGIN: f64 = 0.10;
pub const DEFAULT_FULL_CONFIDENCE_DAYS: u32 = 30;

#[derive(Clone, Debug, PartialEq)]
pub struct ForecastSettings {
    /// Length of the "recent" sub-window compared against the prior one.
    pub recent_window_days: u32,
    /// Relative change within ±band is classified as stable.
    pub stable_band: f64,
    /// Days with sales needed for full (1.0) confidence.
    pub full_confidence_active_days: u32,
    /// Extra cover on top of horizon demand, as a fraction (0.1 = 10%).
    pub safety_margin_fraction: f64,
    pub alert_threshold_days: u32,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            recent_window_days: DEFAULT_RECENT_WINDOW_DAYS,
            stable_band: DEFAULT_STABLE_BAND,
            full_confidence_active_days: DEFAULT_FULL_CONFIDENCE_DAYS,
            safety_margin_fraction: DEFAULT_SAFETY_MARGIN,
            alert_threshold_days: DEFAULT_ALERT_THRESHOLD_DAYS,
        }
    }
}

/// Per-category multiplier applied to the seasonal deviation.
///
/// Categories are matched case-insensitively; unknown categories get 1.0.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeasonalTable {
    factors: HashMap<String, f64>,
}

impl SeasonalTable {
    pub fn new() -> Self { Self::default() }

    pub fn with_factor(mut self, category: &str, factor: f64) -> Self {
        self.factors.insert(category.trim().to_lowercase(), factor);
        self
    }

    pub fn factor(&self, category: &str) -> f64 {
        self.factors.get(&category.trim().to_lowercase()).copied().unwrap_or(1.0)
    }

    pub fn len(&self) -> usize { self.factors.len() }
    pub fn is_empty(&self) -> bool { self.factors.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seasonal_lookup_is_case_insensitive() {
        let table = SeasonalTable::new().with_factor("Outerwear", 1.5).with_factor("swimwear", 0.5);
        assert_eq!(table.factor("outerwear"), 1.5);
        assert_eq!(table.factor(" SWIMWEAR "), 0.5);
        assert_eq!(table.factor("dresses"), 1.0);
        assert_eq!(table.len(), 2);
    }
}
