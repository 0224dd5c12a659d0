//! Role predicates combining platform-native roles with custom roles.

use std::str::FromStr;
use std::sync::Arc;

use tracing::{debug, warn};

use rolecast_core::AppResult;
use rolecast_domain::{PlatformRole, RoleMatchMode, RoleSummary};

use crate::CustomRoleService;
use crate::role_ports::{ChannelRoleLookup, IdentityLookup};

/// Application service answering "does this viewer hold these roles".
#[derive(Clone)]
pub struct RoleQueryService {
    custom_roles: CustomRoleService,
    identity_lookup: Arc<dyn IdentityLookup>,
    channel_roles: Arc<dyn ChannelRoleLookup>,
}

impl RoleQueryService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        custom_roles: CustomRoleService,
        identity_lookup: Arc<dyn IdentityLookup>,
        channel_roles: Arc<dyn ChannelRoleLookup>,
    ) -> Self {
        Self {
            custom_roles,
            identity_lookup,
            channel_roles,
        }
    }

    /// Returns true when any native or custom role of the viewer has an id in
    /// `role_ids_to_check`. Native tags without a mapping are ignored.
    pub async fn user_is_in_role(
        &self,
        user_id: &str,
        platform_role_tags: &[String],
        role_ids_to_check: &[String],
    ) -> bool {
        let mut roles: Vec<RoleSummary> = platform_role_tags
            .iter()
            .filter_map(|tag| PlatformRole::from_tag(tag))
            .map(|role| role.summary())
            .collect();
        roles.extend(self.custom_roles.get_all_custom_roles_for_viewer(user_id).await);

        roles
            .iter()
            .any(|role| role_ids_to_check.iter().any(|role_id| role_id == &role.id))
    }

    /// Returns native roles reported by the channel followed by custom roles.
    pub async fn get_all_roles_for_viewer(&self, user_id: &str) -> AppResult<Vec<RoleSummary>> {
        let tags = self
            .channel_roles
            .platform_role_tags_for_viewer(user_id)
            .await?;

        let mut roles: Vec<RoleSummary> = Vec::new();
        for role in tags.iter().filter_map(|tag| PlatformRole::from_tag(tag)) {
            let summary = role.summary();
            if !roles.contains(&summary) {
                roles.push(summary);
            }
        }
        roles.extend(self.custom_roles.get_all_custom_roles_for_viewer(user_id).await);

        Ok(roles)
    }

    /// Evaluates the `hasRoles[user, any|all, role, ...]` template function.
    ///
    /// Returns false for empty arguments, an unknown mode, an unresolvable
    /// username or a failed role lookup.
    pub async fn has_roles(&self, username: &str, mode: &str, roles: &[String]) -> bool {
        if username.is_empty() || mode.is_empty() || roles.is_empty() {
            return false;
        }

        let Ok(mode) = RoleMatchMode::from_str(mode) else {
            return false;
        };

        let user = match self.identity_lookup.get_user_by_name(username).await {
            Ok(Some(user)) => user,
            Ok(None) => return false,
            Err(error) => {
                warn!(
                    username = %username,
                    error = %error,
                    "failed to resolve viewer for role check"
                );
                return false;
            }
        };

        let held_roles = match self.get_all_roles_for_viewer(user.id()).await {
            Ok(held_roles) => held_roles,
            Err(error) => {
                warn!(user_id = %user.id(), error = %error, "failed to list viewer roles");
                return false;
            }
        };

        let held_names: Vec<&str> = held_roles.iter().map(|role| role.name.as_str()).collect();
        let result = mode.matches(held_names.as_slice(), roles);
        debug!(
            user_id = %user.id(),
            mode = mode.as_str(),
            requested = roles.len(),
            result,
            "evaluated role check"
        );
        result
    }
}

#[cfg(test)]
mod tests;
