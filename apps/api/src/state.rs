use std::time::Duration;

use rolecast_application::{CustomRoleService, RoleQueryService};
use rolecast_infrastructure::BroadcastRoleChangeNotifier;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub custom_role_service: CustomRoleService,
    pub role_query_service: RoleQueryService,
    pub role_change_notifier: BroadcastRoleChangeNotifier,
    pub updates_poll_timeout: Duration,
}
