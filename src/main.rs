//! OpenSASE Restock Advisor - inventory trend and restock service

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use opensase_restock_advisor::{
    advisor::Advisor,
    api::{self, AppState},
    config::AdvisorConfig,
    repository::PgInventorySource,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AdvisorConfig::from_env()?;
    let db = PgPoolOptions::new().max_connections(config.max_connections).connect(&config.database_url).await?;

    let advisor = Advisor::new(
        Arc::new(PgInventorySource::new(db)),
        config.forecast.clone(),
        config.seasonal.clone(),
        &config.currency,
        config.default_lookback,
        config.default_horizon,
    );
    tracing::info!(
        lookback = %config.default_lookback,
        horizon = %config.default_horizon,
        alert_threshold_days = config.forecast.alert_threshold_days,
        seasonal_categories = config.seasonal.len(),
        "advisor configured"
    );

    let app = api::router(AppState::new(advisor));
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("OpenSASE restock advisor listening on {}", addr);
    axum::serve(tokio::net::TcpListener::bind(&addr).await?, app).await?;
    Ok(())
}
