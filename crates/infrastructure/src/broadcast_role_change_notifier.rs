use std::sync::Arc;

use rolecast_application::{RoleChangeEvent, RoleChangeNotifier};
use tokio::sync::watch;
use tracing::debug;

/// Notifier fanning role changes out to every front end as a generation
/// counter.
///
/// Each published event bumps the generation, so a client that remembers the
/// last generation it saw can detect changes made between two polls.
#[derive(Debug, Clone)]
pub struct BroadcastRoleChangeNotifier {
    sender: Arc<watch::Sender<u64>>,
}

impl BroadcastRoleChangeNotifier {
    /// Creates a notifier starting at generation zero.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(0);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Number of role changes published so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        *self.sender.borrow()
    }

    /// Registers a listener observing the current and subsequent generations.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastRoleChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl RoleChangeNotifier for BroadcastRoleChangeNotifier {
    fn notify(&self, event: RoleChangeEvent) {
        self.sender
            .send_modify(|generation| *generation = generation.wrapping_add(1));
        debug!(
            event = event.as_str(),
            generation = self.generation(),
            listeners = self.sender.receiver_count(),
            "published role change"
        );
    }
}
