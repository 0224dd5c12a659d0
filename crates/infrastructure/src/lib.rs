//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod broadcast_role_change_notifier;
mod document_path;
mod helix_identity_client;
mod in_memory_document_store;
mod json_file_document_store;

pub use broadcast_role_change_notifier::BroadcastRoleChangeNotifier;
pub use helix_identity_client::{HelixConfig, HelixIdentityClient};
pub use in_memory_document_store::InMemoryDocumentStore;
pub use json_file_document_store::JsonFileDocumentStore;
