//! Application services and ports.

#![forbid(unsafe_code)]

mod custom_role_service;
mod role_ports;
mod role_query_service;

#[cfg(test)]
mod test_fakes;

pub use custom_role_service::CustomRoleService;
pub use role_ports::{
    ChannelRoleLookup, DocumentStore, IdentityLookup, LegacyMigrationOutcome, LoadSummary,
    RefreshSummary, RoleChangeEvent, RoleChangeNotifier, RoleMutationOutcome,
};
pub use role_query_service::RoleQueryService;
