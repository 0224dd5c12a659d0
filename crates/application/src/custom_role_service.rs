//! Custom role store.
//!
//! Owns the in-memory `role id -> role` map for the lifetime of the process
//! and writes every change through to the durable document store. The map
//! iterates in insertion order, which is also the order name lookups and
//! listings observe.

use std::sync::Arc;

use indexmap::IndexMap;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use rolecast_core::ViewerIdentity;
use rolecast_domain::{CustomRole, LegacyCustomRole, RoleSummary};

use crate::role_ports::{
    DocumentStore, IdentityLookup, LegacyMigrationOutcome, LoadSummary, RefreshSummary,
    RoleChangeEvent, RoleChangeNotifier, RoleMutationOutcome,
};

mod lifecycle;
mod mutations;
mod queries;

/// Application service for custom role membership.
#[derive(Clone)]
pub struct CustomRoleService {
    roles: Arc<RwLock<IndexMap<String, CustomRole>>>,
    store: Arc<dyn DocumentStore>,
    legacy_store: Option<Arc<dyn DocumentStore>>,
    identity_lookup: Arc<dyn IdentityLookup>,
    notifier: Arc<dyn RoleChangeNotifier>,
}

impl CustomRoleService {
    /// Creates an empty role store from required dependencies.
    #[must_use]
    pub fn new(
        store: Arc<dyn DocumentStore>,
        identity_lookup: Arc<dyn IdentityLookup>,
        notifier: Arc<dyn RoleChangeNotifier>,
    ) -> Self {
        Self {
            roles: Arc::new(RwLock::new(IndexMap::new())),
            store,
            legacy_store: None,
            identity_lookup,
            notifier,
        }
    }

    /// Adds the legacy document consulted by the one-time format migration.
    #[must_use]
    pub fn with_legacy_store(mut self, legacy_store: Arc<dyn DocumentStore>) -> Self {
        self.legacy_store = Some(legacy_store);
        self
    }

    async fn persist_role(&self, role: &CustomRole) -> RoleMutationOutcome {
        let value = match serde_json::to_value(role) {
            Ok(value) => value,
            Err(error) => {
                warn!(role_id = %role.id(), error = %error, "failed to encode custom role");
                return RoleMutationOutcome::PersistenceFailed(error.to_string());
            }
        };

        match self.store.push(role_path(role.id()).as_str(), value).await {
            Ok(()) => {
                debug!(role_id = %role.id(), "saved custom role");
                RoleMutationOutcome::Applied
            }
            Err(error) => {
                warn!(role_id = %role.id(), error = %error, "failed to save custom role");
                RoleMutationOutcome::PersistenceFailed(error.to_string())
            }
        }
    }

    fn trigger_ui_refresh(&self) {
        self.notifier.notify(RoleChangeEvent::CustomRolesUpdated);
    }
}

fn role_path(role_id: &str) -> String {
    format!("/{role_id}")
}
