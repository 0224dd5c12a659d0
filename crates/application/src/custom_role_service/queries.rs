use super::*;

impl CustomRoleService {
    /// Returns all roles in insertion order.
    pub async fn get_custom_roles(&self) -> Vec<CustomRole> {
        self.roles.read().await.values().cloned().collect()
    }

    /// Returns one role by id.
    pub async fn get_custom_role(&self, role_id: &str) -> Option<CustomRole> {
        self.roles.read().await.get(role_id).cloned()
    }

    /// Returns the first role whose name matches ignoring case.
    pub async fn get_role_by_name(&self, name: &str) -> Option<CustomRole> {
        self.roles
            .read()
            .await
            .values()
            .find(|role| role.name_matches(name))
            .cloned()
    }

    /// Returns `{id, name}` for every role the viewer belongs to.
    pub async fn get_all_custom_roles_for_viewer(&self, user_id: &str) -> Vec<RoleSummary> {
        self.roles
            .read()
            .await
            .values()
            .filter(|role| role.has_viewer(user_id))
            .map(CustomRole::summary)
            .collect()
    }
}
