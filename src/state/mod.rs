//! In-memory server state: the channel table, the nickname registry, and
//! per-connection client/user records.
//!
//! Lock order, observed everywhere in this module and in the handlers
//! that touch it, is `Service -> Channel -> Nicks`. Nothing here ever
//! awaits while holding a lock; fan-out always goes through
//! [`Client::send`], which is a non-blocking `try_send`.

mod channel;
mod client;
mod nick;
mod service;
mod user;

pub use channel::{is_valid_channel_name, ChanModes, Channel};
pub use client::Client;
pub use nick::{spawn_reaper, Nicks};
pub use service::Service;
pub use user::{User, UserId, UserModes};
