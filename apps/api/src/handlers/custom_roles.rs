use axum::Json;
use axum::extract::{Path, State};

use crate::dto::{
    CustomRoleResponse, RoleMutationResponse, RoleSummaryResponse, SaveCustomRoleRequest,
    ViewerPayload,
};
use crate::state::AppState;

mod roles;
mod viewers;

pub use roles::{
    delete_custom_role_handler, get_custom_role_handler, list_custom_roles_handler,
    save_custom_role_handler,
};
pub use viewers::{
    add_viewer_handler, list_viewer_custom_roles_handler, remove_all_viewers_handler,
    remove_viewer_handler,
};
