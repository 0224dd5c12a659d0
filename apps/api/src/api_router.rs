use axum::Router;
use axum::routing::{delete, get, post};
use rolecast_core::AppError;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

mod cors;


pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let custom_role_routes = Router::new()
        .route(
            "/api/custom-roles",
            get(handlers::custom_roles::list_custom_roles_handler)
                .put(handlers::custom_roles::save_custom_role_handler),
        )
        .route(
            "/api/custom-roles/updates",
            get(handlers::role_updates::role_updates_handler),
        )
        .route(
            "/api/custom-roles/{role_id}",
            get(handlers::custom_roles::get_custom_role_handler)
                .delete(handlers::custom_roles::delete_custom_role_handler),
        )
        .route(
            "/api/custom-roles/{role_id}/viewers",
            post(handlers::custom_roles::add_viewer_handler)
                .delete(handlers::custom_roles::remove_all_viewers_handler),
        )
        .route(
            "/api/custom-roles/{role_id}/viewers/{user_id}",
            delete(handlers::custom_roles::remove_viewer_handler),
        )
        .route(
            "/api/viewers/{user_id}/custom-roles",
            get(handlers::custom_roles::list_viewer_custom_roles_handler),
        );

    let role_query_routes = Router::new()
        .route(
            "/api/viewers/{user_id}/roles",
            get(handlers::role_queries::list_viewer_roles_handler),
        )
        .route(
            "/api/roles/has-roles",
            post(handlers::role_queries::has_roles_handler),
        )
        .route(
            "/api/roles/user-is-in-role",
            post(handlers::role_queries::user_is_in_role_handler),
        );

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(custom_role_routes)
        .merge(role_query_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(frontend_url)?)
        .with_state(app_state))
}
