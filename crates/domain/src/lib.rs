//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod custom_role;
mod platform_role;
mod role_match;

pub use custom_role::{CustomRole, LegacyCustomRole, RoleSummary};
pub use platform_role::PlatformRole;
pub use role_match::RoleMatchMode;
