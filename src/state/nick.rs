//! The server-wide nickname registry.
//!
//! Grounded on `irc/nick.go`'s active/previous split, but this
//! implementation follows the cooldown semantics as specified rather
//! than the original's `Unregister`, which never populates `prev` and
//! so never actually lets a released nick cool down.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

use super::user::User;

/// A nick stays reserved to its last owner for this long after
/// `unregister`, during which anyone else trying to claim it is
/// refused.
pub const NICK_COOLDOWN: Duration = Duration::from_secs(10 * 60);

/// Nicknames longer than this are truncated before any lookup or
/// insert.
pub const NICK_MAX_LEN: usize = 40;

/// How often the reaper sweeps expired cooldown entries.
pub const REAP_INTERVAL: Duration = Duration::from_secs(60);

struct Held {
    owner_id: u64,
    seen: Instant,
}

#[derive(Default)]
struct Inner {
    active: HashMap<String, User>,
    prev: HashMap<String, Held>,
}

/// The nickname registry: who currently holds which nick, and which
/// nicks are cooling down after their last holder released them.
pub struct Nicks {
    inner: RwLock<Inner>,
}

impl Nicks {
    pub fn new() -> Self {
        Nicks {
            inner: RwLock::new(Inner::default()),
        }
    }

    pub fn truncate(nick: &str) -> String {
        if nick.chars().count() <= NICK_MAX_LEN {
            nick.to_string()
        } else {
            nick.chars().take(NICK_MAX_LEN).collect()
        }
    }

    /// Attempt to claim `nick` for `user`. Returns the (truncated) nick
    /// actually registered on success.
    ///
    /// Refused if the nick is currently active, or if it was released
    /// by a *different* user less than [`NICK_COOLDOWN`] ago. The
    /// original owner may always reclaim a nick they just released,
    /// cooldown or not.
    pub fn register(&self, requested: &str, user: &User) -> Option<String> {
        let nick = Self::truncate(requested);
        let mut inner = self.inner.write();

        if inner.active.contains_key(&nick) {
            return None;
        }
        if let Some(held) = inner.prev.get(&nick) {
            let expired = held.seen.elapsed() > NICK_COOLDOWN;
            let same_owner = held.owner_id == user.id;
            if !expired && !same_owner {
                return None;
            }
        }

        inner.prev.remove(&nick);
        let mut held = user.clone();
        held.nick = nick.clone();
        inner.active.insert(nick.clone(), held);
        Some(nick)
    }

    /// Release `nick`, starting its cooldown. No-op if `nick` isn't
    /// currently active under this user.
    pub fn unregister(&self, user: &User) {
        if user.nick.is_empty() {
            return;
        }
        let mut inner = self.inner.write();
        if inner
            .active
            .get(&user.nick)
            .is_some_and(|held| held.id == user.id)
        {
            inner.active.remove(&user.nick);
            inner.prev.insert(
                user.nick.clone(),
                Held {
                    owner_id: user.id,
                    seen: Instant::now(),
                },
            );
        }
    }

    /// Look up the currently-active holder of `nick`.
    pub fn get(&self, nick: &str) -> Option<User> {
        self.inner.read().active.get(nick).cloned()
    }

    /// Drop cooldown entries older than [`NICK_COOLDOWN`]. Called
    /// periodically by the background reaper task, and directly from
    /// tests.
    pub fn reap_expired(&self) {
        let mut inner = self.inner.write();
        inner.prev.retain(|_, held| held.seen.elapsed() <= NICK_COOLDOWN);
    }
}

impl Default for Nicks {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawn the background task that periodically sweeps expired cooldown
/// entries out of the registry, so releasing a nick doesn't leak memory
/// forever on a long-running server.
pub fn spawn_reaper(nicks: std::sync::Arc<Nicks>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(REAP_INTERVAL);
        loop {
            tick.tick().await;
            nicks.reap_expired();
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    fn user(id: u64, nick: &str) -> User {
        let mut u = User::new(id, IpAddr::V4(Ipv4Addr::LOCALHOST), "irc.localhost".into());
        u.nick = nick.to_string();
        u.name = "x".into();
        u
    }

    #[test]
    fn register_then_collide() {
        let nicks = Nicks::new();
        assert_eq!(nicks.register("Batman", &user(1, "")), Some("Batman".into()));
        assert_eq!(nicks.register("Batman", &user(2, "")), None);
    }

    #[test]
    fn truncates_long_nicks() {
        let nicks = Nicks::new();
        let long = "x".repeat(100);
        let got = nicks.register(&long, &user(1, "")).unwrap();
        assert_eq!(got.chars().count(), NICK_MAX_LEN);
    }

    #[test]
    fn released_nick_blocks_other_users_during_cooldown() {
        let nicks = Nicks::new();
        nicks.register("Batman", &user(1, "")).unwrap();
        nicks.unregister(&user(1, "Batman"));
        assert_eq!(nicks.register("Batman", &user(2, "")), None);
    }

    #[test]
    fn original_owner_can_reclaim_immediately() {
        let nicks = Nicks::new();
        nicks.register("Batman", &user(1, "")).unwrap();
        nicks.unregister(&user(1, "Batman"));
        assert_eq!(
            nicks.register("Batman", &user(1, "")),
            Some("Batman".into())
        );
    }

    #[test]
    fn reap_expired_leaves_fresh_entries() {
        let nicks = Nicks::new();
        nicks.register("Batman", &user(1, "")).unwrap();
        nicks.unregister(&user(1, "Batman"));
        nicks.reap_expired();
        assert_eq!(nicks.register("Batman", &user(2, "")), None);
    }
}
