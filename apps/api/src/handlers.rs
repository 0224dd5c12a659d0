pub mod custom_roles;
pub mod health;
pub mod role_queries;
pub mod role_updates;
