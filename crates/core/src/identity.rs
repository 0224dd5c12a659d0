use serde::{Deserialize, Serialize};

/// Canonical viewer record returned by the platform identity directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerIdentity {
    id: String,
    username: String,
    display_name: String,
}

impl ViewerIdentity {
    /// Creates a viewer identity from directory data.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            display_name: display_name.into(),
        }
    }

    /// Returns the platform-stable user id.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Returns the current login name.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Returns the display name shown in chat.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns true when the identity carries a usable id.
    #[must_use]
    pub fn has_id(&self) -> bool {
        !self.id.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::ViewerIdentity;

    #[test]
    fn serializes_display_name_in_camel_case() {
        let identity = ViewerIdentity::new("u1", "alice", "Alice");
        let value = serde_json::to_value(&identity).unwrap_or_default();
        assert_eq!(value["displayName"], "Alice");
        assert_eq!(value["username"], "alice");
    }

    #[test]
    fn blank_id_is_not_usable() {
        assert!(!ViewerIdentity::new("  ", "alice", "Alice").has_id());
        assert!(ViewerIdentity::new("u1", "alice", "Alice").has_id());
    }
}
