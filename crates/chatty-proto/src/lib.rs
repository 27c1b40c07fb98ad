//! A small IRC protocol library: wire codec, numeric replies, and mode
//! strings.
//!
//! This crate knows nothing about sockets or server state; it only knows
//! how to turn bytes into [`Message`]s and back, and how to parse and
//! format `MODE` parameter lists. It is split out of the server binary so
//! the wire format can be tested and versioned on its own, the way
//! `slirc-proto` is split from `slircd-ng`.

mod message;
mod mode;
mod numeric;

pub use message::{Message, MAX_LINE_LEN};
pub use mode::{format_modes, parse_modes, Action, Mode};
pub use numeric::Numeric;
