//! Trend classification over a daily sales series.

use crate::domain::entities::TrendDirection;
use crate::domain::forecast::sales_history::DailySeries;
use crate::domain::forecast::settings::{ForecastSettings, SeasonalTable};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrendSignal {
    pub sales_velocity: f64,
    pub seasonal_impact: f64,
    pub trend: TrendDirection,
    pub confidence: f64,
}

impl TrendSignal {
    /// What an empty or all-zero history classifies as.
    pub fn flat() -> Self {
        Self { sales_velocity: 0.0, seasonal_impact: 0.0, trend: TrendDirection::Stable, confidence: 0.0 }
    }
}

fn mean(units: &[u32]) -> f64 {
    if units.is_empty() { return 0.0; }
    units.iter().map(|u| f64::from(*u)).sum::<f64>() / units.len() as f64
}

/// Classifies a product's sales series. Never fails: degenerate input yields [`TrendSignal::flat`].
pub fn classify(series: &DailySeries, category: &str, settings: &ForecastSettings, seasonal: &SeasonalTable) -> TrendSignal {
    let daily: Vec<u32> = series.iter().map(|(_, units)| units).collect();
    let active_days = daily.iter().filter(|u| **u > 0).count();
    if active_days == 0 { return TrendSignal::flat(); }

    let sales_velocity = mean(&daily);
    let confidence = (active_days as f64 / f64::from(settings.full_confidence_active_days.max(1))).clamp(0.0, 1.0);

    // Recent and prior sub-windows must both fit inside the series.
    let window = (settings.recent_window_days as usize).min(daily.len() / 2);
    if window == 0 {
        return TrendSignal { sales_velocity, seasonal_impact: 0.0, trend: TrendDirection::Stable, confidence };
    }
    let (head, recent) = daily.split_at(daily.len() - window);
    let (_, prior) = head.split_at(head.len() - window);
    let recent_mean = mean(recent);
    let prior_mean = mean(prior);

    let seasonal_impact = (((recent_mean - sales_velocity) / sales_velocity) * seasonal.factor(category)).clamp(-1.0, 1.0);

    let trend = if prior_mean == 0.0 {
        if recent_mean > 0.0 { TrendDirection::Rising } else { TrendDirection::Stable }
    } else {
        let change = (recent_mean - prior_mean) / prior_mean;
        if change > settings.stable_band {
            TrendDirection::Rising
        } else if change < -settings.stable_band {
            TrendDirection::Declining
        } else {
            TrendDirection::Stable
        }
    };

    TrendSignal { sales_velocity, seasonal_impact, trend, confidence }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::SalesRecord;
    use crate::domain::forecast::sales_history::{aggregate, window_bounds};
    use crate::domain::value_objects::LookbackDays;
    use chrono::{Days, NaiveDate};
    use uuid::Uuid;

    fn as_of() -> NaiveDate { NaiveDate::from_ymd_opt(2024, 6, 30).unwrap() }

    /// Builds a series from per-day units, oldest first.
    fn series(units: &[u32]) -> DailySeries {
        let p = Uuid::nil();
        let lookback = LookbackDays::new(units.len() as u32).unwrap();
        let (start, _) = window_bounds(lookback, as_of());
        let records: Vec<SalesRecord> = units.iter().enumerate()
            .map(|(i, u)| SalesRecord::new(p, start.checked_add_days(Days::new(i as u64)).unwrap(), *u))
            .collect();
        aggregate(&records, p, lookback, as_of())
    }

    fn run(units: &[u32]) -> TrendSignal { classify(&series(units), "dresses", &ForecastSettings::default(), &SeasonalTable::new()) }

    #[test]
    fn test_all_zero_is_flat() {
        let signal = run(&[0; 90]);
        assert_eq!(signal.sales_velocity, 0.0);
        assert_eq!(signal.trend, TrendDirection::Stable);
        assert!(signal.confidence <= 0.3);
    }

    #[test]
    fn test_even_sales_velocity() {
        let signal = run(&[2; 90]);
        assert_eq!(signal.sales_velocity, 2.0);
        assert_eq!(signal.trend, TrendDirection::Stable);
        assert_eq!(signal.seasonal_impact, 0.0);
        assert_eq!(signal.confidence, 1.0);
    }

    #[test]
    fn test_rising_and_declining() {
        let mut units = vec![1; 76];
        units.extend([3; 14]);
        let rising = run(&units);
        assert_eq!(rising.trend, TrendDirection::Rising);
        assert!(rising.seasonal_impact > 0.0);

        let mut units = vec![4; 76];
        units.extend([1; 14]);
        let declining = run(&units);
        assert_eq!(declining.trend, TrendDirection::Declining);
        assert!(declining.seasonal_impact < 0.0);
    }

    #[test]
    fn test_small_change_within_band_is_stable() {
        // prior mean 20, recent mean 20.5: +2.5%
        let mut units = vec![20; 76];
        units.extend([20, 21].repeat(7));
        assert_eq!(run(&units).trend, TrendDirection::Stable);
    }

    #[test]
    fn test_sales_after_silence_is_rising() {
        let mut units = vec![0; 76];
        units.extend([1; 14]);
        assert_eq!(run(&units).trend, TrendDirection::Rising);
    }

    #[test]
    fn test_sparse_history_has_low_confidence() {
        let mut units = vec![0; 90];
        for i in [3, 20, 41, 60, 88] { units[i] = 6; }
        let signal = run(&units);
        assert!(signal.confidence <= 0.3);
        assert!(signal.confidence > 0.0);
    }

    #[test]
    fn test_confidence_grows_with_active_days() {
        let mut prev = 0.0;
        for active in [1usize, 5, 10, 20, 40] {
            let mut units = vec![0; 90];
            for u in units.iter_mut().take(active) { *u = 1; }
            let c = run(&units).confidence;
            assert!(c >= prev);
            assert!((0.0..=1.0).contains(&c));
            prev = c;
        }
    }

    #[test]
    fn test_seasonal_factor_scales_and_clamps() {
        let mut units = vec![2; 76];
        units.extend([3; 14]);
        let s = series(&units);
        let settings = ForecastSettings::default();
        let base = classify(&s, "outerwear", &settings, &SeasonalTable::new()).seasonal_impact;
        let scaled = classify(&s, "outerwear", &settings, &SeasonalTable::new().with_factor("outerwear", 0.5)).seasonal_impact;
        assert!((scaled - base * 0.5).abs() < 1e-12);
        let clamped = classify(&s, "outerwear", &settings, &SeasonalTable::new().with_factor("outerwear", 10.0)).seasonal_impact;
        assert_eq!(clamped, 1.0);
    }

    #[test]
    fn test_single_day_window() {
        let signal = run(&[4]);
        assert_eq!(signal.sales_velocity, 4.0);
        assert_eq!(signal.trend, TrendDirection::Stable);
    }
}
