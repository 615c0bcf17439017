//! Sales history aggregation: raw per-day sales records into a dense daily series.

use chrono::{Days, NaiveDate};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::domain::entities::SalesRecord;
use crate::domain::value_objects::LookbackDays;

/// First and last day (inclusive) of a lookback window ending at `as_of`.
pub fn window_bounds(lookback: LookbackDays, as_of: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = as_of.checked_sub_days(Days::new(u64::from(lookback.get() - 1))).unwrap_or(NaiveDate::MIN);
    (start, as_of)
}

/// Exactly `lookback` consecutive days of unit sales, zero-padded where nothing sold.
///
/// Only days that actually sold something are stored; [`DailySeries::iter`]
/// fills the gaps on the fly and may be called repeatedly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DailySeries {
    start: NaiveDate,
    days: u32,
    units: BTreeMap<NaiveDate, u32>,
}

impl DailySeries {
    pub fn start(&self) -> NaiveDate { self.start }
    pub fn len(&self) -> usize { self.days as usize }
    pub fn is_empty(&self) -> bool { self.days == 0 }
    pub fn total_units(&self) -> u64 { self.units.values().map(|u| u64::from(*u)).sum() }
    pub fn active_days(&self) -> usize { self.units.values().filter(|u| **u > 0).count() }

    pub fn iter(&self) -> DailyIter<'_> { DailyIter { series: self, offset: 0 } }
}

impl<'a> IntoIterator for &'a DailySeries {
    type Item = (NaiveDate, u32);
    type IntoIter = DailyIter<'a>;
    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

pub struct DailyIter<'a> {
    series: &'a DailySeries,
    offset: u32,
}

impl Iterator for DailyIter<'_> {
    type Item = (NaiveDate, u32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.series.days { return None; }
        let date = self.series.start.checked_add_days(Days::new(u64::from(self.offset)))?;
        self.offset += 1;
        Some((date, self.series.units.get(&date).copied().unwrap_or(0)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.series.days - self.offset.min(self.series.days)) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for DailyIter<'_> {}

/// Reduces `records` for `product_id` into a [`DailySeries`] of `lookback` days ending at `as_of`.
///
/// Records for other products or outside the window are ignored; several
/// records on the same day are summed.
pub fn aggregate(records: &[SalesRecord], product_id: Uuid, lookback: LookbackDays, as_of: NaiveDate) -> DailySeries {
    let (start, end) = window_bounds(lookback, as_of);
    let mut units = BTreeMap::new();
    for r in records.iter().filter(|r| r.product_id == product_id && r.date >= start && r.date <= end) {
        let day: &mut u32 = units.entry(r.date).or_default();
        *day = day.saturating_add(r.units_sold);
    }
    DailySeries { start, days: lookback.get(), units }
}
