use rolecast_application::RoleMutationOutcome;
use rolecast_core::AppError;
use tracing::debug;

use super::*;
use crate::error::ApiResult;
use crate::handlers::role_updates::ROLE_GENERATION_HEADER;

/// Lists every role, tagging the response with the change generation it
/// reflects so clients can resume long-polling from it.
pub async fn list_custom_roles_handler(
    State(state): State<AppState>,
) -> ([(&'static str, String); 1], Json<Vec<CustomRoleResponse>>) {
    // Read before the roles: a change in between only causes an extra refetch.
    let generation = state.role_change_notifier.generation();
    let roles = state
        .custom_role_service
        .get_custom_roles()
        .await
        .into_iter()
        .map(CustomRoleResponse::from)
        .collect();

    (
        [(ROLE_GENERATION_HEADER, generation.to_string())],
        Json(roles),
    )
}

pub async fn get_custom_role_handler(
    State(state): State<AppState>,
    Path(role_id): Path<String>,
) -> ApiResult<Json<CustomRoleResponse>> {
    let role = state
        .custom_role_service
        .get_custom_role(role_id.as_str())
        .await
        .ok_or_else(|| AppError::NotFound(format!("custom role '{role_id}'")))?;

    Ok(Json(CustomRoleResponse::from(role)))
}

/// Upserts a role document. A `null` body is accepted and ignored.
pub async fn save_custom_role_handler(
    State(state): State<AppState>,
    Json(payload): Json<Option<SaveCustomRoleRequest>>,
) -> Json<RoleMutationResponse> {
    let Some(payload) = payload else {
        return Json(RoleMutationResponse::from(RoleMutationOutcome::Unchanged));
    };

    let role = match payload.into_custom_role() {
        Ok(role) => role,
        Err(error) => {
            debug!(error = %error, "rejected custom role document");
            return Json(RoleMutationResponse::from(RoleMutationOutcome::InvalidInput));
        }
    };

    let outcome = state.custom_role_service.save_custom_role(role).await;
    Json(RoleMutationResponse::from(outcome))
}

pub async fn delete_custom_role_handler(
    State(state): State<AppState>,
    Path(role_id): Path<String>,
) -> Json<RoleMutationResponse> {
    let outcome = state
        .custom_role_service
        .delete_custom_role(role_id.as_str())
        .await;

    Json(RoleMutationResponse::from(outcome))
}
