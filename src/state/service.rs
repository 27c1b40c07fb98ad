use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use dashmap::DashMap;
use parking_lot::RwLock;

use super::channel::Channel;
use super::nick::Nicks;
use super::user::UserId;
use crate::store::CredentialStore;

/// The top-level shared state every connection handler reaches through.
///
/// `channels` is a [`DashMap`] rather than a single `RwLock<HashMap<..>>`
/// so that fan-out into one channel never blocks a `JOIN` of another;
/// each entry is itself an independently-locked [`Channel`], giving the
/// `Service -> Channel -> Nicks` lock order room to interleave across
/// unrelated channels.
pub struct Service {
    pub server_name: String,
    pub version: String,
    pub started_at: Instant,
    pub channels: DashMap<String, Arc<RwLock<Channel>>>,
    pub nicks: Arc<Nicks>,
    pub store: Arc<CredentialStore>,
    next_id: AtomicU64,
}

impl Service {
    pub fn new(server_name: impl Into<String>, store: Arc<CredentialStore>) -> Self {
        Service {
            server_name: server_name.into(),
            version: format!("chattyd-{}", env!("CARGO_PKG_VERSION")),
            started_at: Instant::now(),
            channels: DashMap::new(),
            nicks: Arc::new(Nicks::new()),
            store,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn next_user_id(&self) -> UserId {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Fetch the channel named `name`, creating it (with default modes)
    /// if it doesn't exist yet.
    pub fn get_or_create_channel(&self, name: &str) -> Arc<RwLock<Channel>> {
        self.channels
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(RwLock::new(Channel::new(name))))
            .clone()
    }

    pub fn get_channel(&self, name: &str) -> Option<Arc<RwLock<Channel>>> {
        self.channels.get(name).map(|entry| entry.clone())
    }

    /// Drop a channel from the table once it has no members left. The
    /// original implementation never reclaims empty channels; this
    /// server does, since leaving a dead channel around forever would
    /// make a long-running network leak memory for every transient
    /// `#channel` a client ever created.
    pub fn drop_if_empty(&self, name: &str) {
        if let Some(chan) = self.channels.get(name) {
            if !chan.read().members.is_empty() {
                return;
            }
        } else {
            return;
        }
        self.channels.remove_if(name, |_, chan| chan.read().members.is_empty());
    }
}
