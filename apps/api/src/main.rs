//! Rolecast API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod dto;
mod error;
mod handlers;
mod state;

use rolecast_application::LegacyMigrationOutcome;
use rolecast_core::AppError;
use tracing::{info, warn};

use crate::api_config::{ApiConfig, init_tracing};
use crate::api_router::build_router;
use crate::api_services::{build_app_state, spawn_role_refresh};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;
    let app_state = build_app_state(&config)?;

    let summary = app_state.custom_role_service.load_custom_roles().await;
    if let LegacyMigrationOutcome::Failed(error) = &summary.migration {
        warn!(error = %error, "legacy custom roles were not migrated");
    }
    info!(
        loaded_roles = summary.loaded_roles,
        skipped_entries = summary.skipped_entries,
        viewers_updated = summary.refresh.viewers_updated,
        "custom roles loaded"
    );

    if let Some(period) = config.refresh_interval {
        spawn_role_refresh(app_state.custom_role_service.clone(), period);
    }

    let app = build_router(app_state, &config.frontend_url)?;
    let address = config.socket_address()?;

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "rolecast-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
