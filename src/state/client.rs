use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};

use dashmap::DashSet;
use parking_lot::{Mutex, RwLock};
use tokio::sync::mpsc;

use chatty_proto::Message;

use super::user::{User, UserId, UserModes};

/// The outbound queue depth past which a slow reader is disconnected
/// rather than allowed to back-pressure the server.
pub const SEND_QUEUE_CAPACITY: usize = 10;

/// Sentinel sticky-error reason used for a graceful `QUIT`, so the
/// writer loop can tell "client asked to leave" apart from "client was
/// pushed off for misbehaving" if it ever needs to (today both just
/// close the socket).
pub const QUIT_SENTINEL: &str = "QUIT";

/// One connected client: its registration identity, its outbound
/// queue, and the channels it currently belongs to.
///
/// Channel membership is tracked here only by name; the authoritative
/// membership (and the `Arc<Client>` handles used for fan-out) lives in
/// each [`super::Channel`]. Re-resolving through the service on every
/// access avoids a reference cycle between `Client` and `Channel`.
pub struct Client {
    pub id: UserId,
    pub addr: SocketAddr,
    tx: mpsc::Sender<Message>,
    pub user: RwLock<User>,
    pub modes: RwLock<UserModes>,
    pub password: Mutex<Option<String>>,
    pub channels: DashSet<String>,
    registered: AtomicBool,
    err: Mutex<Option<String>>,
}

impl Client {
    /// Construct a client and its paired receive half. The caller hands
    /// the receiver to the writer task.
    pub fn new(
        id: UserId,
        addr: SocketAddr,
        user: User,
    ) -> (Self, mpsc::Receiver<Message>) {
        let (tx, rx) = mpsc::channel(SEND_QUEUE_CAPACITY);
        let client = Client {
            id,
            addr,
            tx,
            user: RwLock::new(user),
            modes: RwLock::new(UserModes::default()),
            password: Mutex::new(None),
            channels: DashSet::new(),
            registered: AtomicBool::new(false),
            err: Mutex::new(None),
        };
        (client, rx)
    }

    /// `nick!~user@host` for whatever the client's identity currently
    /// is.
    pub fn origin(&self) -> String {
        self.user.read().origin()
    }

    pub fn nick(&self) -> String {
        self.user.read().nick.clone()
    }

    pub fn is_registered(&self) -> bool {
        self.registered.load(Ordering::Acquire)
    }

    pub fn mark_registered(&self) {
        self.registered.store(true, Ordering::Release);
    }

    /// Queue `msg` for delivery. Once the client has a sticky error,
    /// every further send is a silent no-op — the connection is already
    /// on its way down and nothing should block on a dead queue.
    ///
    /// A full queue is itself the trigger for the sticky error: a
    /// client that can't keep up gets disconnected rather than
    /// back-pressuring the sender.
    pub fn send(&self, msg: Message) {
        if self.has_err() {
            return;
        }
        if let Err(err) = self.tx.try_send(msg) {
            let reason = match err {
                mpsc::error::TrySendError::Full(_) => "send queue overflow",
                mpsc::error::TrySendError::Closed(_) => "send queue closed",
            };
            self.set_err(reason);
        }
    }

    pub fn has_err(&self) -> bool {
        self.err.lock().is_some()
    }

    pub fn err(&self) -> Option<String> {
        self.err.lock().clone()
    }

    pub fn set_err(&self, reason: impl Into<String>) {
        let mut guard = self.err.lock();
        if guard.is_none() {
            *guard = Some(reason.into());
        }
    }

    /// Mark this client as leaving gracefully via `QUIT`, so the reader
    /// and writer loops unwind without logging it as a failure.
    pub fn quit(&self) {
        self.set_err(QUIT_SENTINEL);
    }

    pub fn quit_reason_is_graceful(&self) -> bool {
        self.err().as_deref() == Some(QUIT_SENTINEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    fn new_client() -> (Client, mpsc::Receiver<Message>) {
        let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 6697);
        let user = User::new(1, addr.ip(), "irc.localhost".into());
        Client::new(1, addr, user)
    }

    #[test]
    fn send_after_sticky_error_is_silent() {
        let (client, mut rx) = new_client();
        client.set_err("boom");
        client.send(Message::new("PING", vec![]));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn overflowing_queue_sets_sticky_error() {
        let (client, _rx) = new_client();
        for _ in 0..SEND_QUEUE_CAPACITY {
            client.send(Message::new("PING", vec![]));
        }
        assert!(!client.has_err());
        client.send(Message::new("PING", vec![]));
        assert!(client.has_err());
    }

    #[test]
    fn first_error_sticks() {
        let (client, _rx) = new_client();
        client.set_err("first");
        client.set_err("second");
        assert_eq!(client.err(), Some("first".to_string()));
    }
}
