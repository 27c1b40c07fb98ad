use std::net::IpAddr;

/// Stable identity for one connected client, assigned once at accept
/// time and never reused.
pub type UserId = u64;

/// Registration identity for one connection.
///
/// Fields start empty and fill in as `NICK`/`USER` arrive; a [`User`] is
/// not "real" (has no origin worth announcing) until both `nick` and
/// `name` are non-empty.
#[derive(Clone, Debug)]
pub struct User {
    pub id: UserId,
    pub nick: String,
    pub name: String,
    pub full_name: String,
    pub host: IpAddr,
    pub server_name: String,
}

impl User {
    pub fn new(id: UserId, host: IpAddr, server_name: String) -> Self {
        User {
            id,
            nick: String::new(),
            name: String::new(),
            full_name: String::new(),
            host,
            server_name,
        }
    }

    /// Whether both halves of registration (`NICK` and `USER`) have
    /// landed.
    pub fn is_complete(&self) -> bool {
        !self.nick.is_empty() && !self.name.is_empty()
    }

    /// `nick!~user@host`, the prefix used on every message this user
    /// originates. `*` stands in for an unset nick, matching the
    /// pre-registration numeric target convention.
    pub fn origin(&self) -> String {
        format!(
            "{}!~{}@{}",
            if self.nick.is_empty() { "*" } else { &self.nick },
            if self.name.is_empty() { "*" } else { &self.name },
            self.host
        )
    }

    /// The nick to address numerics to: the registered nick, or `*`
    /// before one has been chosen.
    pub fn nick_or_star(&self) -> &str {
        if self.nick.is_empty() {
            "*"
        } else {
            &self.nick
        }
    }
}

/// Per-user mode flags, tracked independently of channel membership.
///
/// `away` is carried here even though nothing in this server currently
/// sets it (no `AWAY` command) since it is queried by `WHO`'s
/// availability flag; keeping the field makes that lookup total instead
/// of a hardcoded `false`.
#[derive(Clone, Debug, Default)]
pub struct UserModes {
    pub invisible: bool,
    pub away: bool,
    pub local_operator: bool,
    pub global_operator: bool,
}

impl UserModes {
    /// Mode-letter string for `RPL_MYINFO`'s settable-user-modes field
    /// and similar introspection; not used to answer `MODE <nick>`
    /// queries, which only the client's own bits matter for.
    pub fn flags(&self) -> String {
        let mut s = String::new();
        if self.invisible {
            s.push('i');
        }
        if self.away {
            s.push('a');
        }
        if self.local_operator {
            s.push('O');
        }
        if self.global_operator {
            s.push('o');
        }
        s
    }
}
