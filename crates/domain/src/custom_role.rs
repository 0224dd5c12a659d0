//! Custom role entities.
//!
//! A custom role is a streamer-defined group of viewers. Each member is stored
//! as a snapshot of the viewer identity so that chat automations can display
//! names without a directory round trip; the viewer id is the join key.

use rolecast_core::{AppError, AppResult, NonEmptyString, ViewerIdentity};
use serde::{Deserialize, Serialize};

/// Persisted custom role with its member snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CustomRoleDocument")]
pub struct CustomRole {
    id: String,
    name: String,
    viewers: Vec<ViewerIdentity>,
}

#[derive(Deserialize)]
struct CustomRoleDocument {
    id: String,
    name: String,
    #[serde(default)]
    viewers: Vec<ViewerIdentity>,
}

impl TryFrom<CustomRoleDocument> for CustomRole {
    type Error = AppError;

    fn try_from(value: CustomRoleDocument) -> Result<Self, Self::Error> {
        Self::from_parts(value.id, value.name, value.viewers)
    }
}

impl CustomRole {
    /// Creates an empty custom role.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> AppResult<Self> {
        Self::from_parts(id, name, Vec::new())
    }

    /// Creates a custom role from stored parts.
    ///
    /// Viewers without an id are dropped and repeated ids keep their first
    /// occurrence, so a role never lists the same viewer twice.
    pub fn from_parts(
        id: impl Into<String>,
        name: impl Into<String>,
        viewers: Vec<ViewerIdentity>,
    ) -> AppResult<Self> {
        let id = NonEmptyString::new(id)
            .map_err(|_| AppError::Validation("custom role id must not be empty".to_owned()))?;

        let mut role = Self {
            id: id.into(),
            name: name.into(),
            viewers: Vec::with_capacity(viewers.len()),
        };
        for viewer in viewers {
            role.add_viewer(&viewer);
        }

        Ok(role)
    }

    /// Returns the stable role id.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Returns the human label.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns member snapshots in insertion order.
    #[must_use]
    pub fn viewers(&self) -> &[ViewerIdentity] {
        self.viewers.as_slice()
    }

    /// Returns member ids in insertion order.
    #[must_use]
    pub fn viewer_ids(&self) -> Vec<String> {
        self.viewers
            .iter()
            .map(|viewer| viewer.id().to_owned())
            .collect()
    }

    /// Returns true when the viewer id is a member.
    #[must_use]
    pub fn has_viewer(&self, user_id: &str) -> bool {
        self.viewers.iter().any(|viewer| viewer.id() == user_id)
    }

    /// Returns true when the role label matches ignoring case.
    #[must_use]
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// Appends a viewer snapshot. Returns false when the viewer has no id or
    /// is already a member.
    pub fn add_viewer(&mut self, viewer: &ViewerIdentity) -> bool {
        if !viewer.has_id() || self.has_viewer(viewer.id()) {
            return false;
        }

        self.viewers.push(viewer.clone());
        true
    }

    /// Removes the member with the given id. Returns false when absent.
    pub fn remove_viewer(&mut self, user_id: &str) -> bool {
        let Some(index) = self
            .viewers
            .iter()
            .position(|viewer| viewer.id() == user_id)
        else {
            return false;
        };

        self.viewers.remove(index);
        true
    }

    /// Removes every member and returns how many were removed.
    pub fn clear_viewers(&mut self) -> usize {
        let removed = self.viewers.len();
        self.viewers.clear();
        removed
    }

    /// Overwrites the snapshot of an existing member with fresh directory
    /// data. Membership is unchanged; returns true when the snapshot changed.
    pub fn refresh_viewer(&mut self, identity: &ViewerIdentity) -> bool {
        let Some(existing) = self
            .viewers
            .iter_mut()
            .find(|viewer| viewer.id() == identity.id())
        else {
            return false;
        };

        if existing == identity {
            return false;
        }

        *existing = identity.clone();
        true
    }

    /// Returns the `{id, name}` projection of this role.
    #[must_use]
    pub fn summary(&self) -> RoleSummary {
        RoleSummary::new(self.id.clone(), self.name.clone())
    }
}

/// Role stored in the pre-identity format where members were usernames.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LegacyCustomRole {
    /// Stable role id carried over to the new format.
    pub id: String,
    /// Human label.
    pub name: String,
    /// Member usernames.
    #[serde(default)]
    pub viewers: Vec<String>,
}

impl LegacyCustomRole {
    /// Builds the new-format role from the identities its usernames resolved
    /// to. Unresolved usernames are not carried over.
    pub fn into_custom_role(self, resolved: Vec<ViewerIdentity>) -> AppResult<CustomRole> {
        CustomRole::from_parts(self.id, self.name, resolved)
    }
}

/// `{id, name}` projection of a custom or platform role.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleSummary {
    /// Role id.
    pub id: String,
    /// Role label.
    pub name: String,
}

impl RoleSummary {
    /// Creates a role projection.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
