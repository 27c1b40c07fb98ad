//! Unified error handling for chattyd.
//!
//! Handler-level failures are modeled as typed errors rather than ad hoc
//! `ctx.send(...)` calls scattered through command bodies, so each
//! handler can propagate with `?` and let one place decide whether (and
//! how) an error becomes a reply on the wire.

use thiserror::Error;
use tokio::sync::mpsc;

use chatty_proto::{Message, Numeric};

fn reply(server_name: &str, target: &str, numeric: Numeric, mut params: Vec<String>) -> Message {
    if let Some(text) = numeric.text() {
        params.push(text.to_string());
    }
    Message {
        prefix: Some(server_name.to_string()),
        cmd: numeric.code().to_string(),
        target: Some(target.to_string()),
        params,
        no_spaces: false,
        force_trailing_colon: false,
    }
}

/// Errors that can occur while dispatching or running a command
/// handler.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("not enough parameters for {0}")]
    NeedMoreParams(String),

    #[error("not registered")]
    NotRegistered,

    #[error("already registered")]
    AlreadyRegistered,

    #[error("nickname in use: {0}")]
    NicknameInUse(String),

    #[error("no such nick/channel: {0}")]
    NoSuchNick(String),

    #[error("no such channel: {0}")]
    NoSuchChannel(String),

    #[error("cannot send to channel: {0}")]
    CannotSendToChan(String),

    #[error("invalid CAP command")]
    InvalidCapCmd,

    #[error("password mismatch")]
    PasswordMismatch,

    #[error("cannot change mode for other users")]
    UsersDontMatch,

    #[error("unknown mode flag")]
    UModeUnknownFlag,

    #[error("send error: {0}")]
    Send(#[from] mpsc::error::SendError<Message>),

    #[error("client quit: {0:?}")]
    Quit(Option<String>),

    #[error("internal error: {0}")]
    Internal(String),
}

impl HandlerError {
    /// Convert to the IRC reply this error warrants, or `None` for
    /// errors that are handled by tearing down the connection rather
    /// than by sending a client-visible reply.
    pub fn to_irc_reply(&self, server_name: &str, nick: &str) -> Option<Message> {
        match self {
            Self::NeedMoreParams(cmd) => Some(reply(
                server_name,
                nick,
                Numeric::ERR_NEED_MORE_PARAMS,
                vec![cmd.clone()],
            )),
            Self::NotRegistered => {
                Some(reply(server_name, nick, Numeric::ERR_NOT_REGISTERED, vec![]))
            }
            Self::AlreadyRegistered => Some(reply(
                server_name,
                nick,
                Numeric::ERR_ALREADY_REGISTERED,
                vec![],
            )),
            Self::NicknameInUse(bad) => Some(reply(
                server_name,
                nick,
                Numeric::ERR_NICKNAME_IN_USE,
                vec![bad.clone()],
            )),
            Self::NoSuchNick(target) => Some(reply(
                server_name,
                nick,
                Numeric::ERR_NO_SUCH_NICK,
                vec![target.clone()],
            )),
            Self::NoSuchChannel(chan) => Some(reply(
                server_name,
                nick,
                Numeric::ERR_NO_SUCH_CHANNEL,
                vec![chan.clone()],
            )),
            Self::CannotSendToChan(chan) => Some(reply(
                server_name,
                nick,
                Numeric::ERR_CANNOT_SEND_TO_CHAN,
                vec![chan.clone()],
            )),
            Self::InvalidCapCmd => Some(reply(
                server_name,
                nick,
                Numeric::ERR_INVALID_CAP_CMD,
                vec![],
            )),
            Self::PasswordMismatch => Some(reply(
                server_name,
                nick,
                Numeric::ERR_PASSWORD_MISMATCH,
                vec![],
            )),
            Self::UsersDontMatch => Some(reply(
                server_name,
                nick,
                Numeric::ERR_USERS_DONT_MATCH,
                vec![],
            )),
            Self::UModeUnknownFlag => Some(reply(
                server_name,
                nick,
                Numeric::ERR_U_MODE_UNKNOWN_FLAG,
                vec![],
            )),
            Self::Send(_) | Self::Quit(_) | Self::Internal(_) => None,
        }
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;

/// Errors a channel-mutating operation can hit that map to a single
/// client-visible reply (as opposed to the per-mode-letter errors the
/// `MODE` pipeline reports directly via `SendError` without aborting).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("not on channel")]
    NotOnChannel,

    #[error("you're not channel operator")]
    ChanOpPrivsNeeded,

    #[error("cannot join channel (+k)")]
    BadChannelKey,

    #[error("cannot join channel (+l)")]
    ChannelIsFull,
}

impl ChannelError {
    pub fn to_irc_reply(&self, server_name: &str, nick: &str, channel: &str) -> Message {
        let numeric = match self {
            Self::NotOnChannel => Numeric::ERR_NOT_ON_CHANNEL,
            Self::ChanOpPrivsNeeded => Numeric::ERR_CHAN_OP_PRIVS_NEEDED,
            Self::BadChannelKey => Numeric::ERR_BAD_CHANNEL_KEY,
            Self::ChannelIsFull => Numeric::ERR_CHANNEL_IS_FULL,
        };
        reply(server_name, nick, numeric, vec![channel.to_string()])
    }
}

/// Errors at the connection/server level: things that tear down a
/// socket or abort startup rather than producing an IRC reply.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("tls error: {0}")]
    Tls(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("line too long")]
    LineTooLong,

    #[error("registration timed out")]
    RegistrationTimeout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn need_more_params_reply_includes_command_name() {
        let reply = HandlerError::NeedMoreParams("NICK".into())
            .to_irc_reply("irc.localhost", "*")
            .unwrap();
        assert_eq!(reply.cmd, "461");
        assert_eq!(reply.params, vec!["NICK".to_string(), "Not enough parameters".to_string()]);
    }

    #[test]
    fn internal_errors_have_no_reply() {
        assert!(HandlerError::Internal("oops".into())
            .to_irc_reply("irc.localhost", "*")
            .is_none());
    }

    #[test]
    fn channel_error_reply_carries_channel_name() {
        let reply = ChannelError::ChanOpPrivsNeeded.to_irc_reply("irc.localhost", "Batman", "#gotham");
        assert_eq!(reply.cmd, "482");
        assert_eq!(reply.params[0], "#gotham");
    }
}
