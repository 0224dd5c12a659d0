use super::*;

impl CustomRoleService {
    /// Creates or replaces a role keyed by its id and writes it through.
    pub async fn save_custom_role(&self, role: CustomRole) -> RoleMutationOutcome {
        self.roles
            .write()
            .await
            .insert(role.id().to_owned(), role.clone());

        self.persist_role(&role).await
    }

    /// Deletes a role from memory and from the durable document.
    pub async fn delete_custom_role(&self, role_id: &str) -> RoleMutationOutcome {
        if role_id.is_empty() {
            return RoleMutationOutcome::InvalidInput;
        }

        let existed = self.roles.write().await.shift_remove(role_id).is_some();

        if let Err(error) = self.store.delete(role_path(role_id).as_str()).await {
            warn!(role_id = %role_id, error = %error, "failed to delete custom role");
            return RoleMutationOutcome::PersistenceFailed(error.to_string());
        }

        debug!(role_id = %role_id, "deleted custom role");
        if existed {
            RoleMutationOutcome::Applied
        } else {
            RoleMutationOutcome::NotFound
        }
    }

    /// Adds a viewer snapshot to a role. Adding an existing member is a no-op.
    pub async fn add_viewer_to_role(
        &self,
        role_id: &str,
        viewer: &ViewerIdentity,
    ) -> RoleMutationOutcome {
        if !viewer.has_id() {
            return RoleMutationOutcome::InvalidInput;
        }

        let updated_role = {
            let mut roles = self.roles.write().await;
            let Some(role) = roles.get_mut(role_id) else {
                return RoleMutationOutcome::NotFound;
            };

            if !role.add_viewer(viewer) {
                return RoleMutationOutcome::Unchanged;
            }
            role.clone()
        };

        let outcome = self.persist_role(&updated_role).await;
        self.trigger_ui_refresh();
        outcome
    }

    /// Removes one member from a role by viewer id.
    pub async fn remove_viewer_from_role(
        &self,
        role_id: &str,
        user_id: &str,
    ) -> RoleMutationOutcome {
        if user_id.is_empty() {
            return RoleMutationOutcome::InvalidInput;
        }

        let updated_role = {
            let mut roles = self.roles.write().await;
            let Some(role) = roles.get_mut(role_id) else {
                return RoleMutationOutcome::NotFound;
            };

            if !role.remove_viewer(user_id) {
                return RoleMutationOutcome::NotFound;
            }
            role.clone()
        };

        let outcome = self.persist_role(&updated_role).await;
        self.trigger_ui_refresh();
        outcome
    }

    /// Removes every member from a role.
    pub async fn remove_all_viewers_from_role(&self, role_id: &str) -> RoleMutationOutcome {
        let updated_role = {
            let mut roles = self.roles.write().await;
            let Some(role) = roles.get_mut(role_id) else {
                return RoleMutationOutcome::NotFound;
            };

            role.clear_viewers();
            role.clone()
        };

        let outcome = self.persist_role(&updated_role).await;
        self.trigger_ui_refresh();
        outcome
    }
}
