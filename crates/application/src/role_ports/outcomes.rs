/// Result of a role store mutation.
///
/// Mutations never fail the caller: missing roles and invalid input are
/// no-ops, and persistence failures leave the in-memory change in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleMutationOutcome {
    /// State changed and was persisted.
    Applied,
    /// Request was valid but nothing needed to change.
    Unchanged,
    /// The role or viewer does not exist.
    NotFound,
    /// A required id was empty.
    InvalidInput,
    /// In-memory state changed but the durable write failed.
    PersistenceFailed(String),
}

impl RoleMutationOutcome {
    /// Returns true when in-memory state changed.
    #[must_use]
    pub fn changed_state(&self) -> bool {
        matches!(self, Self::Applied | Self::PersistenceFailed(_))
    }
}

/// Result of the one-time upgrade from the username-only role format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegacyMigrationOutcome {
    /// No legacy document was found.
    NotPresent,
    /// Every legacy role was migrated and the legacy document deleted.
    Migrated {
        /// Number of migrated roles.
        roles: usize,
    },
    /// Migration stopped early; the legacy document was kept.
    Failed(String),
}

/// Counters from one identity refresh pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    /// Roles visited.
    pub roles_visited: usize,
    /// Viewer snapshots whose username or display name changed.
    pub viewers_updated: usize,
    /// Roles skipped because the directory lookup failed.
    pub lookup_failures: usize,
}

/// Report from startup loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    /// Legacy migration result.
    pub migration: LegacyMigrationOutcome,
    /// Roles loaded into memory.
    pub loaded_roles: usize,
    /// Stored entries that could not be decoded.
    pub skipped_entries: usize,
    /// Identity refresh counters.
    pub refresh: RefreshSummary,
}
