use chatty_proto::Message;

use crate::error::{HandlerError, HandlerResult};
use crate::handlers::Context;
use crate::require_arg;

/// `PRIVMSG <target> :<text>`.
///
/// Only channel targets are routed; a nick target has no client-to-client
/// delivery path in this server (no Non-goal covers it, but nothing
/// wires it up either), so it's answered the same way an unknown nick
/// would be.
pub async fn handle(ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
    let target = require_arg!(msg, 0, "PRIVMSG");
    let text = require_arg!(msg, 1, "PRIVMSG");

    if !target.starts_with('#') && !target.starts_with('&') {
        return Err(HandlerError::NoSuchNick(target));
    }

    let Some(chan_lock) = ctx.service.get_channel(&target) else {
        return Err(HandlerError::NoSuchNick(target));
    };

    let chan = chan_lock.read();
    if !chan.is_member(ctx.client.id) && chan.modes.no_external_msgs {
        return Err(HandlerError::CannotSendToChan(target));
    }
    if chan.modes.moderated && !chan.is_operator(ctx.client.id) && !chan.is_voiced(ctx.client.id) {
        return Err(HandlerError::CannotSendToChan(target));
    }

    let privmsg = Message {
        prefix: Some(ctx.client.origin()),
        cmd: "PRIVMSG".to_string(),
        target: None,
        params: vec![target, text],
        no_spaces: false,
        force_trailing_colon: false,
    };
    for (id, member) in chan.members.iter() {
        if *id != ctx.client.id {
            member.send(privmsg.clone());
        }
    }
    Ok(())
}
