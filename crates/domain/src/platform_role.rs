use serde::{Deserialize, Serialize};

use crate::RoleSummary;

/// Roles conferred by the streaming platform itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformRole {
    /// Channel owner.
    Broadcaster,
    /// Channel moderator.
    Moderator,
    /// Paying channel subscriber.
    Subscriber,
    /// Channel VIP.
    Vip,
}

impl PlatformRole {
    /// Maps a platform badge or chat tag to a native role.
    ///
    /// Unknown tags map to `None` rather than an error because platforms add
    /// badges freely.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "broadcaster" => Some(Self::Broadcaster),
            "mod" | "moderator" => Some(Self::Moderator),
            "sub" | "subscriber" => Some(Self::Subscriber),
            "vip" => Some(Self::Vip),
            _ => None,
        }
    }

    /// Returns the stable role id used in role checks.
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Self::Broadcaster => "broadcaster",
            Self::Moderator => "mod",
            Self::Subscriber => "sub",
            Self::Vip => "vip",
        }
    }

    /// Returns the label shown to streamers.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Broadcaster => "Streamer",
            Self::Moderator => "Moderator",
            Self::Subscriber => "Subscriber",
            Self::Vip => "VIP",
        }
    }

    /// Returns the `{id, name}` projection of this role.
    #[must_use]
    pub fn summary(&self) -> RoleSummary {
        RoleSummary::new(self.id(), self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::PlatformRole;

    #[test]
    fn moderator_aliases_share_one_role() {
        assert_eq!(PlatformRole::from_tag("mod"), Some(PlatformRole::Moderator));
        assert_eq!(
            PlatformRole::from_tag("Moderator"),
            Some(PlatformRole::Moderator)
        );
    }

    #[test]
    fn unknown_tag_maps_to_nothing() {
        assert_eq!(PlatformRole::from_tag("founder"), None);
        assert_eq!(PlatformRole::from_tag(""), None);
    }

    #[test]
    fn every_role_roundtrips_through_its_id() {
        for role in [
            PlatformRole::Broadcaster,
            PlatformRole::Moderator,
            PlatformRole::Subscriber,
            PlatformRole::Vip,
        ] {
            assert_eq!(PlatformRole::from_tag(role.id()), Some(role));
        }
    }
}
