use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::client::Client;
use super::user::UserId;

/// Per-channel mode state.
///
/// `no_external_msgs` and `topic_lock` default on (`+n +t`), matching
/// every channel created by a first `JOIN` on the reference server.
#[derive(Debug, Default)]
pub struct ChanModes {
    pub invite_only: bool,
    pub moderated: bool,
    pub no_external_msgs: bool,
    pub topic_lock: bool,
    pub private: bool,
    pub secret: bool,
    pub key: String,
    pub limit: u32,
    pub bans: HashSet<String>,
    pub ban_exceptions: HashSet<String>,
    pub invitation_masks: HashSet<String>,
    pub operators: HashSet<UserId>,
    pub voiced: HashSet<UserId>,
}

impl ChanModes {
    fn new() -> Self {
        ChanModes {
            no_external_msgs: true,
            topic_lock: true,
            ..Default::default()
        }
    }

    /// The flag letters currently set, in a fixed, stable order.
    pub fn flags(&self) -> String {
        let mut s = String::new();
        if self.invite_only {
            s.push('i');
        }
        if self.moderated {
            s.push('m');
        }
        if self.no_external_msgs {
            s.push('n');
        }
        if self.topic_lock {
            s.push('t');
        }
        if self.private {
            s.push('p');
        }
        if self.secret {
            s.push('s');
        }
        if !self.key.is_empty() {
            s.push('k');
        }
        if self.limit > 0 {
            s.push('l');
        }
        s
    }
}

/// One channel: its topic, its membership, and its mode state.
///
/// Members are keyed by [`UserId`] and store the member's live
/// [`Client`] handle directly, so fan-out never needs a second lookup
/// through the service.
pub struct Channel {
    pub name: String,
    pub topic: String,
    pub members: HashMap<UserId, Arc<Client>>,
    pub modes: ChanModes,
}

impl Channel {
    pub fn new(name: impl Into<String>) -> Self {
        Channel {
            name: name.into(),
            topic: String::new(),
            members: HashMap::new(),
            modes: ChanModes::new(),
        }
    }

    pub fn is_member(&self, id: UserId) -> bool {
        self.members.contains_key(&id)
    }

    pub fn is_operator(&self, id: UserId) -> bool {
        self.modes.operators.contains(&id)
    }

    pub fn is_voiced(&self, id: UserId) -> bool {
        self.modes.voiced.contains(&id)
    }

    /// `@` for an operator, `+` for a voiced non-operator, empty
    /// otherwise — the prefix used in `NAMES`/`WHO` output.
    pub fn prefix(&self, id: UserId) -> &'static str {
        if self.is_operator(id) {
            "@"
        } else if self.is_voiced(id) {
            "+"
        } else {
            ""
        }
    }

    pub fn broadcast(&self, msg: &chatty_proto::Message) {
        for member in self.members.values() {
            member.send(msg.clone());
        }
    }
}

/// Does `name` look like a channel name this server accepts (`#` or
/// `&` prefix, non-empty suffix)?
pub fn is_valid_channel_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some('#') | Some('&')) && chars.next().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_channel_defaults_to_no_external_and_topic_lock() {
        let chan = Channel::new("#gotham");
        assert!(chan.modes.no_external_msgs);
        assert!(chan.modes.topic_lock);
        assert!(!chan.modes.moderated);
    }

    #[test]
    fn prefix_prefers_operator_over_voice() {
        let mut chan = Channel::new("#gotham");
        chan.modes.operators.insert(1);
        chan.modes.voiced.insert(1);
        assert_eq!(chan.prefix(1), "@");
        assert_eq!(chan.prefix(2), "");
    }

    #[test]
    fn validates_channel_name_prefix() {
        assert!(is_valid_channel_name("#gotham"));
        assert!(is_valid_channel_name("&local"));
        assert!(!is_valid_channel_name("gotham"));
        assert!(!is_valid_channel_name("#"));
    }
}
