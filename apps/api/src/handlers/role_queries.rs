use axum::Json;
use axum::extract::{Path, State};

use crate::dto::{HasRolesRequest, RoleCheckResponse, RoleSummaryResponse, UserIsInRoleRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn has_roles_handler(
    State(state): State<AppState>,
    Json(payload): Json<HasRolesRequest>,
) -> Json<RoleCheckResponse> {
    let result = state
        .role_query_service
        .has_roles(
            payload.username.as_str(),
            payload.mode.as_str(),
            payload.roles.as_slice(),
        )
        .await;

    Json(RoleCheckResponse { result })
}

pub async fn user_is_in_role_handler(
    State(state): State<AppState>,
    Json(payload): Json<UserIsInRoleRequest>,
) -> Json<RoleCheckResponse> {
    let result = state
        .role_query_service
        .user_is_in_role(
            payload.user_id.as_str(),
            payload.platform_role_tags.as_slice(),
            payload.role_ids.as_slice(),
        )
        .await;

    Json(RoleCheckResponse { result })
}

/// Lists native channel roles followed by custom roles.
pub async fn list_viewer_roles_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<RoleSummaryResponse>>> {
    let roles = state
        .role_query_service
        .get_all_roles_for_viewer(user_id.as_str())
        .await?
        .into_iter()
        .map(RoleSummaryResponse::from)
        .collect();

    Ok(Json(roles))
}
