mod directory;
mod document_store;
mod notifications;
mod outcomes;

pub use directory::{ChannelRoleLookup, IdentityLookup};
pub use document_store::DocumentStore;
pub use notifications::{RoleChangeEvent, RoleChangeNotifier};
pub use outcomes::{LegacyMigrationOutcome, LoadSummary, RefreshSummary, RoleMutationOutcome};
