//! Domain layer: catalog entities, value objects and the forecasting core.
pub mod entities;
pub mod forecast;
pub mod value_objects;
