use rolecast_application::{RoleChangeEvent, RoleMutationOutcome};
use rolecast_core::{AppResult, ViewerIdentity};
use rolecast_domain::{CustomRole, RoleSummary};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Viewer snapshot as exchanged with the role editor.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/viewer-payload.ts"
)]
pub struct ViewerPayload {
    pub id: String,
    pub username: String,
    pub display_name: String,
}

/// Role document sent by the editor when saving a custom role.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/save-custom-role-request.ts"
)]
pub struct SaveCustomRoleRequest {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub viewers: Vec<ViewerPayload>,
}

/// API representation of a custom role with its members.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/custom-role-response.ts"
)]
pub struct CustomRoleResponse {
    pub id: String,
    pub name: String,
    pub viewers: Vec<ViewerPayload>,
}

/// `{id, name}` role projection.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-summary-response.ts"
)]
pub struct RoleSummaryResponse {
    pub id: String,
    pub name: String,
}

/// Result of a role mutation. Mutations report their outcome instead of
/// failing the request.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-mutation-response.ts"
)]
pub struct RoleMutationResponse {
    pub outcome: &'static str,
    pub changed: bool,
    pub detail: Option<String>,
}

/// Incoming payload for `hasRoles`.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/has-roles-request.ts"
)]
pub struct HasRolesRequest {
    pub username: String,
    pub mode: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Incoming payload for `userIsInRole`.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/user-is-in-role-request.ts"
)]
pub struct UserIsInRoleRequest {
    pub user_id: String,
    #[serde(default)]
    pub platform_role_tags: Vec<String>,
    #[serde(default)]
    pub role_ids: Vec<String>,
}

/// Boolean answer of a role predicate.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-check-response.ts"
)]
pub struct RoleCheckResponse {
    pub result: bool,
}

/// Event delivered to long-polling front ends.
///
/// `generation` is the cursor to pass as `since` on the next poll.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-change-event-response.ts"
)]
pub struct RoleChangeEventResponse {
    pub event: &'static str,
    pub generation: u64,
}

impl From<&ViewerIdentity> for ViewerPayload {
    fn from(value: &ViewerIdentity) -> Self {
        Self {
            id: value.id().to_owned(),
            username: value.username().to_owned(),
            display_name: value.display_name().to_owned(),
        }
    }
}

impl From<ViewerPayload> for ViewerIdentity {
    fn from(value: ViewerPayload) -> Self {
        ViewerIdentity::new(value.id, value.username, value.display_name)
    }
}

impl SaveCustomRoleRequest {
    /// Validates the document into a domain role.
    pub fn into_custom_role(self) -> AppResult<CustomRole> {
        CustomRole::from_parts(
            self.id,
            self.name,
            self.viewers.into_iter().map(ViewerIdentity::from).collect(),
        )
    }
}

impl From<CustomRole> for CustomRoleResponse {
    fn from(value: CustomRole) -> Self {
        Self {
            id: value.id().to_owned(),
            name: value.name().to_owned(),
            viewers: value.viewers().iter().map(ViewerPayload::from).collect(),
        }
    }
}

impl From<RoleSummary> for RoleSummaryResponse {
    fn from(value: RoleSummary) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

impl From<RoleMutationOutcome> for RoleMutationResponse {
    fn from(value: RoleMutationOutcome) -> Self {
        let changed = value.changed_state();
        let (outcome, detail) = match value {
            RoleMutationOutcome::Applied => ("applied", None),
            RoleMutationOutcome::Unchanged => ("unchanged", None),
            RoleMutationOutcome::NotFound => ("not_found", None),
            RoleMutationOutcome::InvalidInput => ("invalid_input", None),
            RoleMutationOutcome::PersistenceFailed(error) => ("persistence_failed", Some(error)),
        };

        Self {
            outcome,
            changed,
            detail,
        }
    }
}

impl RoleChangeEventResponse {
    pub fn new(event: RoleChangeEvent, generation: u64) -> Self {
        Self {
            event: event.as_str(),
            generation,
        }
    }
}
