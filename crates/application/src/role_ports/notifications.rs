/// Change events published to front ends after role membership changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleChangeEvent {
    /// Custom role state changed; listeners should re-read all roles.
    CustomRolesUpdated,
}

impl RoleChangeEvent {
    /// Returns the stable channel name of this event.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CustomRolesUpdated => "custom-roles-updated",
        }
    }
}

/// Fire-and-forget port for UI refresh notifications.
pub trait RoleChangeNotifier: Send + Sync {
    /// Publishes an event. Delivery failures are the adapter's concern.
    fn notify(&self, event: RoleChangeEvent);
}
