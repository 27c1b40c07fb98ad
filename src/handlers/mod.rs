//! Command dispatch and the pre-registration gate.

pub mod channel;
pub mod connection;
pub mod helpers;
pub mod mode;

use std::sync::Arc;

use tracing::{debug, warn};

use chatty_proto::Message;

use crate::error::HandlerError;
use crate::state::{Client, Service};

/// Everything a handler needs: the shared service state, and the
/// client this message arrived on.
pub struct Context<'a> {
    pub service: &'a Arc<Service>,
    pub client: &'a Arc<Client>,
}

impl Context<'_> {
    pub fn send(&self, msg: Message) {
        self.client.send(msg);
    }

    pub fn nick_or_star(&self) -> String {
        self.client.user.read().nick_or_star().to_string()
    }

    pub fn server_name(&self) -> &str {
        &self.service.server_name
    }
}

/// Commands a not-yet-registered client may still issue. Everything
/// else yields `ERR_NOT_REGISTERED` without being dispatched.
const PRE_REGISTRATION_ALLOWED: &[&str] = &["PASS", "NICK", "USER", "CAP"];

/// Route one decoded message to its handler, enforcing the
/// pre-registration gate first.
///
/// Unknown commands are logged and silently dropped, matching the
/// reference server: an unrecognized verb is not itself an error to
/// the client.
pub async fn dispatch(ctx: &mut Context<'_>, msg: &Message) {
    let cmd = msg.cmd.to_ascii_uppercase();

    if !ctx.client.is_registered() && !PRE_REGISTRATION_ALLOWED.contains(&cmd.as_str()) {
        let err = HandlerError::NotRegistered;
        if let Some(reply) = err.to_irc_reply(ctx.server_name(), &ctx.nick_or_star()) {
            ctx.send(reply);
        }
        return;
    }

    let result = match cmd.as_str() {
        "PASS" => connection::pass::handle(ctx, msg).await,
        "NICK" => connection::nick::handle(ctx, msg).await,
        "USER" => connection::user::handle(ctx, msg).await,
        "CAP" => connection::cap::handle(ctx, msg).await,
        "QUIT" => connection::quit::handle(ctx, msg).await,
        "JOIN" => channel::join::handle(ctx, msg).await,
        "PART" => channel::part::handle(ctx, msg).await,
        "PRIVMSG" => channel::privmsg::handle(ctx, msg).await,
        "TOPIC" => channel::topic::handle(ctx, msg).await,
        "NAMES" => channel::names::handle(ctx, msg).await,
        "WHO" => channel::who::handle(ctx, msg).await,
        "MODE" => mode::handle(ctx, msg).await,
        other => {
            debug!(command = other, "ignoring unknown command");
            return;
        }
    };

    if let Err(err) = result {
        match err.to_irc_reply(ctx.server_name(), &ctx.nick_or_star()) {
            Some(reply) => ctx.send(reply),
            None => warn!(command = %cmd, error = %err, "handler error with no client reply"),
        }
    }
}
