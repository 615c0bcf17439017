//! OpenSASE Restock Advisor
//!
//! Inventory trend and restock advice for the storefront back-office.
//!
//! ## Features
//! - Per-product sales velocity, seasonal deviation and trend classification
//! - Days-until-stockout projection and restock quantities over a horizon
//! - Stockout alerts and a cost-weighted restock plan
//! - Read-only HTTP query surface with role-based capabilities
//!
//! Results are recomputed from a fresh data snapshot on every request.

pub mod advisor;
pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod repository;

pub use error::{AdvisorError, Result};
