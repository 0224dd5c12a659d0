use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use rolecast_core::{AppError, AppResult, ViewerIdentity};

use crate::{
    ChannelRoleLookup, CustomRoleService, DocumentStore, IdentityLookup, RoleChangeEvent,
    RoleChangeNotifier,
};

/// Document store fake holding a root object keyed by first path segment.
#[derive(Default)]
pub struct FakeDocumentStore {
    pub root: Mutex<Option<Value>>,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
    pub pushes: AtomicUsize,
}

impl FakeDocumentStore {
    pub fn with_root(root: Value) -> Self {
        Self {
            root: Mutex::new(Some(root)),
            ..Self::default()
        }
    }

    pub async fn entry(&self, key: &str) -> Option<Value> {
        self.root
            .lock()
            .await
            .as_ref()
            .and_then(|root| root.get(key))
            .cloned()
    }
}

fn key_of(path: &str) -> &str {
    path.trim_start_matches('/')
}

#[async_trait]
impl DocumentStore for FakeDocumentStore {
    async fn get_data(&self, path: &str) -> AppResult<Option<Value>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::Internal("read failed".to_owned()));
        }

        let root = self.root.lock().await;
        let key = key_of(path);
        if key.is_empty() {
            return Ok(root.clone());
        }

        Ok(root.as_ref().and_then(|root| root.get(key)).cloned())
    }

    async fn push(&self, path: &str, value: Value) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Internal("write failed".to_owned()));
        }

        self.pushes.fetch_add(1, Ordering::SeqCst);
        let mut root = self.root.lock().await;
        let document = root.get_or_insert_with(|| Value::Object(serde_json::Map::new()));
        if let Value::Object(entries) = document {
            entries.insert(key_of(path).to_owned(), value);
        }
        Ok(())
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Internal("write failed".to_owned()));
        }

        let mut root = self.root.lock().await;
        let key = key_of(path);
        if key.is_empty() {
            *root = None;
        } else if let Some(Value::Object(entries)) = root.as_mut() {
            entries.shift_remove(key);
        }
        Ok(())
    }
}

/// Identity directory fake keyed by user id.
#[derive(Default)]
pub struct FakeIdentityDirectory {
    pub users: Mutex<Vec<ViewerIdentity>>,
    pub fail_lookups: AtomicBool,
}

impl FakeIdentityDirectory {
    pub fn with_users(users: Vec<ViewerIdentity>) -> Self {
        Self {
            users: Mutex::new(users),
            ..Self::default()
        }
    }

    pub async fn rename(&self, user_id: &str, username: &str, display_name: &str) {
        let mut users = self.users.lock().await;
        if let Some(user) = users.iter_mut().find(|user| user.id() == user_id) {
            *user = ViewerIdentity::new(user_id, username, display_name);
        }
    }

    fn check_available(&self) -> AppResult<()> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(AppError::Internal("directory unavailable".to_owned()));
        }
        Ok(())
    }
}

#[async_trait]
impl IdentityLookup for FakeIdentityDirectory {
    async fn get_users_by_names(&self, usernames: &[String]) -> AppResult<Vec<ViewerIdentity>> {
        self.check_available()?;
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .filter(|user| {
                usernames
                    .iter()
                    .any(|name| name.eq_ignore_ascii_case(user.username()))
            })
            .cloned()
            .collect())
    }

    async fn get_users_by_ids(&self, user_ids: &[String]) -> AppResult<Vec<ViewerIdentity>> {
        self.check_available()?;
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .filter(|user| user_ids.iter().any(|id| id == user.id()))
            .cloned()
            .collect())
    }

    async fn get_user_by_name(&self, username: &str) -> AppResult<Option<ViewerIdentity>> {
        self.check_available()?;
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .find(|user| user.username().eq_ignore_ascii_case(username))
            .cloned())
    }
}

/// Channel role fake returning fixed tags per user id.
#[derive(Default)]
pub struct FakeChannelRoles {
    pub tags: HashMap<String, Vec<String>>,
    pub fail_lookups: bool,
}

#[async_trait]
impl ChannelRoleLookup for FakeChannelRoles {
    async fn platform_role_tags_for_viewer(&self, user_id: &str) -> AppResult<Vec<String>> {
        if self.fail_lookups {
            return Err(AppError::Internal("channel roles unavailable".to_owned()));
        }
        Ok(self.tags.get(user_id).cloned().unwrap_or_default())
    }
}

/// Notifier fake counting published events.
#[derive(Default)]
pub struct CountingNotifier {
    pub updates: AtomicUsize,
}

impl CountingNotifier {
    pub fn count(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }
}

impl RoleChangeNotifier for CountingNotifier {
    fn notify(&self, event: RoleChangeEvent) {
        if event == RoleChangeEvent::CustomRolesUpdated {
            self.updates.fetch_add(1, Ordering::SeqCst);
        }
    }
}

pub struct Harness {
    pub service: CustomRoleService,
    pub store: Arc<FakeDocumentStore>,
    pub directory: Arc<FakeIdentityDirectory>,
    pub notifier: Arc<CountingNotifier>,
}

pub fn harness_with(store: FakeDocumentStore, directory: FakeIdentityDirectory) -> Harness {
    let store = Arc::new(store);
    let directory = Arc::new(directory);
    let notifier = Arc::new(CountingNotifier::default());
    let service = CustomRoleService::new(store.clone(), directory.clone(), notifier.clone());

    Harness {
        service,
        store,
        directory,
        notifier,
    }
}

pub fn harness() -> Harness {
    harness_with(
        FakeDocumentStore::default(),
        FakeIdentityDirectory::default(),
    )
}

pub fn viewer(id: &str, username: &str) -> ViewerIdentity {
    let mut display_name = username.to_owned();
    if let Some(first) = display_name.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    ViewerIdentity::new(id, username, display_name)
}
