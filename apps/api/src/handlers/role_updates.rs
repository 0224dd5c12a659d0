use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rolecast_application::RoleChangeEvent;
use serde::Deserialize;
use tracing::debug;

use crate::dto::RoleChangeEventResponse;
use crate::state::AppState;

/// Response header carrying the role change generation a listing reflects.
pub const ROLE_GENERATION_HEADER: &str = "x-role-generation";

#[derive(Debug, Default, Deserialize)]
pub struct RoleUpdatesQuery {
    /// Last generation the client has seen.
    pub since: Option<u64>,
}

/// Long-poll for the next role change.
///
/// A client passing `since` is answered right away when roles changed after
/// that generation, so changes made between two polls are never lost.
/// Otherwise the poll answers `200` on the next change and `204` once the
/// poll timeout elapses.
pub async fn role_updates_handler(
    State(state): State<AppState>,
    Query(query): Query<RoleUpdatesQuery>,
) -> Response {
    let mut receiver = state.role_change_notifier.subscribe();
    let current = *receiver.borrow_and_update();

    if query.since.is_some_and(|since| since != current) {
        debug!(since = ?query.since, current, "role update listener behind");
        return changed_response(current);
    }

    match tokio::time::timeout(state.updates_poll_timeout, receiver.changed()).await {
        Ok(Ok(())) => {
            let generation = *receiver.borrow_and_update();
            changed_response(generation)
        }
        Ok(Err(_)) | Err(_) => StatusCode::NO_CONTENT.into_response(),
    }
}

fn changed_response(generation: u64) -> Response {
    Json(RoleChangeEventResponse::new(
        RoleChangeEvent::CustomRolesUpdated,
        generation,
    ))
    .into_response()
}
