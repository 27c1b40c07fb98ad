use chatty_proto::{Message, Numeric};

use crate::error::{ChannelError, HandlerResult};
use crate::handlers::{helpers::numeric_reply, Context};
use crate::require_arg;

/// `TOPIC <name> [:<text>]`: with one param, a read (`RPL_TOPIC` /
/// `RPL_NO_TOPIC`); with two, a set (member-only, and op-only while
/// `+t`).
pub async fn handle(ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
    let name = require_arg!(msg, 0, "TOPIC");

    let Some(chan_lock) = ctx.service.get_channel(&name) else {
        let reply = ChannelError::NotOnChannel.to_irc_reply(ctx.server_name(), &ctx.nick_or_star(), &name);
        ctx.send(reply);
        return Ok(());
    };

    if msg.params.len() < 2 {
        send_topic(ctx, &name);
        return Ok(());
    }

    let new_topic = msg.params[1].clone();
    {
        let mut chan = chan_lock.write();
        if !chan.is_member(ctx.client.id) {
            ctx.send(ChannelError::NotOnChannel.to_irc_reply(ctx.server_name(), &ctx.nick_or_star(), &name));
            return Ok(());
        }
        if chan.modes.topic_lock && !chan.is_operator(ctx.client.id) {
            ctx.send(ChannelError::ChanOpPrivsNeeded.to_irc_reply(ctx.server_name(), &ctx.nick_or_star(), &name));
            return Ok(());
        }
        chan.topic = new_topic.clone();

        let mut params = vec![name.clone()];
        if !new_topic.is_empty() {
            params.push(new_topic);
        }
        let announce = Message {
            prefix: Some(ctx.client.origin()),
            cmd: "TOPIC".to_string(),
            target: None,
            params,
            no_spaces: false,
            force_trailing_colon: false,
        };
        chan.broadcast(&announce);
    }
    Ok(())
}

/// Targeted `TOPIC` projection at the caller only — used both by a bare
/// `TOPIC <name>` query and by `JOIN` completion.
pub fn send_topic(ctx: &Context<'_>, name: &str) {
    let Some(chan_lock) = ctx.service.get_channel(name) else {
        return;
    };
    let chan = chan_lock.read();
    if !chan.is_member(ctx.client.id) {
        ctx.send(ChannelError::NotOnChannel.to_irc_reply(ctx.server_name(), &ctx.nick_or_star(), name));
        return;
    }
    let nick = ctx.nick_or_star();
    if chan.topic.is_empty() {
        ctx.send(numeric_reply(ctx.server_name(), &nick, Numeric::RPL_NO_TOPIC, vec![name.to_string()]));
    } else {
        ctx.send(numeric_reply(
            ctx.server_name(),
            &nick,
            Numeric::RPL_TOPIC,
            vec![name.to_string(), chan.topic.clone()],
        ));
    }
}
