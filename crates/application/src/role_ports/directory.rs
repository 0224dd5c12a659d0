use async_trait::async_trait;

use rolecast_core::{AppResult, ViewerIdentity};

/// Port for the platform identity directory.
///
/// Batch lookups may return fewer records than requested; callers treat a
/// missing entry as unresolvable rather than as an error.
#[async_trait]
pub trait IdentityLookup: Send + Sync {
    /// Resolves login names to identities.
    async fn get_users_by_names(&self, usernames: &[String]) -> AppResult<Vec<ViewerIdentity>>;

    /// Resolves platform user ids to identities.
    async fn get_users_by_ids(&self, user_ids: &[String]) -> AppResult<Vec<ViewerIdentity>>;

    /// Resolves one login name.
    async fn get_user_by_name(&self, username: &str) -> AppResult<Option<ViewerIdentity>>;
}

/// Port returning the native role tags a viewer holds in the broadcaster's
/// channel, such as `mod` or `vip`.
#[async_trait]
pub trait ChannelRoleLookup: Send + Sync {
    /// Lists platform role tags for a viewer.
    async fn platform_role_tags_for_viewer(&self, user_id: &str) -> AppResult<Vec<String>>;
}
