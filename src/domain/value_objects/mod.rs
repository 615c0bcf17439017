//! Value Objects for the restock advisor

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Longest sales history the advisor will look at (two years).
pub const MAX_LOOKBACK_DAYS: u32 = 730;
/// Longest forward horizon a restock recommendation may cover.
pub const MAX_HORIZON_DAYS: u32 = 365;

/// Money value object
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money { amount: Decimal, currency: String }

impl Money {
    pub fn new(amount: Decimal, currency: &str) -> Self { Self { amount, currency: currency.to_uppercase() } }
    pub fn usd(amount: Decimal) -> Self { Self::new(amount, "USD") }
    pub fn zero(currency: &str) -> Self { Self::new(Decimal::ZERO, currency) }
    pub fn amount(&self) -> Decimal { self.amount }
    pub fn currency(&self) -> &str { &self.currency }
    pub fn add(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch { left: self.currency.clone(), right: other.currency.clone() });
        }
        Ok(Money::new(self.amount + other.amount, &self.currency))
    }
    pub fn multiply(&self, qty: u32) -> Money { Money::new(self.amount * Decimal::from(qty), &self.currency) }
}

impl Default for Money { fn default() -> Self { Self::zero("USD") } }

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{} {}", self.amount.round_dp(2), self.currency) }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    #[error("Currency mismatch: {left} vs {right}")]
    CurrencyMismatch { left: String, right: String },
}

/// Rejected window or horizon parameter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("{name} must be greater than zero")]
    Zero { name: &'static str },
    #[error("{name} must be at most {max}, got {value}")]
    TooLarge { name: &'static str, value: u32, max: u32 },
}

fn bounded(name: &'static str, value: u32, max: u32) -> Result<u32, ParamError> {
    if value == 0 { return Err(ParamError::Zero { name }); }
    if value > max { return Err(ParamError::TooLarge { name, value, max }); }
    Ok(value)
}

/// Number of consecutive calendar days of sales history to aggregate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LookbackDays(u32);

impl LookbackDays {
    pub fn new(days: u32) -> Result<Self, ParamError> { bounded("lookbackDays", days, MAX_LOOKBACK_DAYS).map(Self) }
    pub fn get(self) -> u32 { self.0 }
}

impl fmt::Display for LookbackDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}d", self.0) }
}

/// Forward-looking number of days a restock should cover.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct HorizonDays(u32);

impl HorizonDays {
    pub fn new(days: u32) -> Result<Self, ParamError> { bounded("horizonDays", days, MAX_HORIZON_DAYS).map(Self) }
    pub fn get(self) -> u32 { self.0 }
}

impl fmt::Display for HorizonDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}d", self.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_add() {
        let a = Money::usd(Decimal::new(100, 0));
        let b = Money::usd(Decimal::new(50, 0));
        assert_eq!(a.add(&b).unwrap().amount(), Decimal::new(150, 0));
    }

    #[test]
    fn test_money_currency_mismatch() {
        let a = Money::usd(Decimal::ONE);
        let b = Money::new(Decimal::ONE, "ngn");
        assert_eq!(b.currency(), "NGN");
        assert!(matches!(a.add(&b), Err(MoneyError::CurrencyMismatch { .. })));
    }

    #[test]
    fn test_money_multiply() {
        let unit = Money::usd(Decimal::new(1250, 2));
        assert_eq!(unit.multiply(4).amount(), Decimal::new(50, 0));
        assert_eq!(unit.multiply(0).amount(), Decimal::ZERO);
    }

    #[test]
    fn test_lookback_bounds() {
        assert_eq!(LookbackDays::new(0), Err(ParamError::Zero { name: "lookbackDays" }));
        assert!(LookbackDays::new(MAX_LOOKBACK_DAYS + 1).is_err());
        assert_eq!(LookbackDays::new(90).unwrap().get(), 90);
    }

    #[test]
    fn test_horizon_bounds() {
        assert!(HorizonDays::new(0).is_err());
        assert!(HorizonDays::new(366).is_err());
        assert_eq!(HorizonDays::new(30).unwrap().to_string(), "30d");
    }
}
