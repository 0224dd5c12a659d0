use std::sync::Arc;
use std::time::Duration;

use rolecast_application::{CustomRoleService, RoleQueryService};
use rolecast_core::AppError;
use rolecast_infrastructure::{
    BroadcastRoleChangeNotifier, HelixIdentityClient, JsonFileDocumentStore,
};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::info;

use crate::api_config::ApiConfig;
use crate::state::AppState;

const HELIX_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub fn build_app_state(config: &ApiConfig) -> Result<AppState, AppError> {
    let http_client = reqwest::Client::builder()
        .timeout(HELIX_REQUEST_TIMEOUT)
        .build()
        .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;
    let helix_client = Arc::new(HelixIdentityClient::new(http_client, config.helix.clone()));

    let store = Arc::new(JsonFileDocumentStore::new(config.custom_roles_path()));
    let legacy_store = Arc::new(JsonFileDocumentStore::new(config.legacy_custom_roles_path()));
    info!(
        path = %store.file_path().display(),
        legacy_path = %legacy_store.file_path().display(),
        "custom role documents"
    );
    let role_change_notifier = BroadcastRoleChangeNotifier::new();

    let custom_role_service = CustomRoleService::new(
        store,
        helix_client.clone(),
        Arc::new(role_change_notifier.clone()),
    )
    .with_legacy_store(legacy_store);
    let role_query_service =
        RoleQueryService::new(custom_role_service.clone(), helix_client.clone(), helix_client);

    Ok(AppState {
        custom_role_service,
        role_query_service,
        role_change_notifier,
        updates_poll_timeout: config.updates_poll_timeout,
    })
}

/// Re-resolves stored viewer snapshots on a fixed interval.
pub fn spawn_role_refresh(service: CustomRoleService, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // Startup loading already refreshed once.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let summary = service.refresh_custom_roles_user_data().await;
            info!(
                roles_visited = summary.roles_visited,
                viewers_updated = summary.viewers_updated,
                lookup_failures = summary.lookup_failures,
                "refreshed custom role viewer data"
            );
        }
    })
}
