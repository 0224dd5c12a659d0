use rolecast_core::ViewerIdentity;

use super::*;

pub async fn add_viewer_handler(
    State(state): State<AppState>,
    Path(role_id): Path<String>,
    Json(payload): Json<ViewerPayload>,
) -> Json<RoleMutationResponse> {
    let outcome = state
        .custom_role_service
        .add_viewer_to_role(role_id.as_str(), &ViewerIdentity::from(payload))
        .await;

    Json(RoleMutationResponse::from(outcome))
}

pub async fn remove_viewer_handler(
    State(state): State<AppState>,
    Path((role_id, user_id)): Path<(String, String)>,
) -> Json<RoleMutationResponse> {
    let outcome = state
        .custom_role_service
        .remove_viewer_from_role(role_id.as_str(), user_id.as_str())
        .await;

    Json(RoleMutationResponse::from(outcome))
}

pub async fn remove_all_viewers_handler(
    State(state): State<AppState>,
    Path(role_id): Path<String>,
) -> Json<RoleMutationResponse> {
    let outcome = state
        .custom_role_service
        .remove_all_viewers_from_role(role_id.as_str())
        .await;

    Json(RoleMutationResponse::from(outcome))
}

pub async fn list_viewer_custom_roles_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<Vec<RoleSummaryResponse>> {
    let roles = state
        .custom_role_service
        .get_all_custom_roles_for_viewer(user_id.as_str())
        .await
        .into_iter()
        .map(RoleSummaryResponse::from)
        .collect();

    Json(roles)
}
