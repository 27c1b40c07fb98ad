use chatty_proto::Message;

use crate::error::{ChannelError, HandlerResult};
use crate::handlers::channel::{names::send_names, topic::send_topic};
use crate::handlers::Context;
use crate::require_arg;
use crate::state::is_valid_channel_name;

/// `JOIN <name> [<key>]`: create the channel if absent (with default
/// `+n +t`), enforce key/limit, promote the first member to operator,
/// fan out `JOIN` to the (now including) membership, then run the
/// `TOPIC`/`NAMES` projections at the joiner.
pub async fn handle(ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
    let name = require_arg!(msg, 0, "JOIN");
    if !is_valid_channel_name(&name) {
        return Err(crate::error::HandlerError::NoSuchChannel(name));
    }
    let key = msg.params.get(1).cloned();

    let chan_lock = ctx.service.get_or_create_channel(&name);
    {
        let mut chan = chan_lock.write();

        if !chan.modes.key.is_empty() && key.as_deref() != Some(chan.modes.key.as_str()) {
            ctx.send(ChannelError::BadChannelKey.to_irc_reply(ctx.server_name(), &ctx.nick_or_star(), &name));
            return Ok(());
        }
        if chan.modes.limit > 0 && chan.members.len() as u32 >= chan.modes.limit {
            ctx.send(ChannelError::ChannelIsFull.to_irc_reply(ctx.server_name(), &ctx.nick_or_star(), &name));
            return Ok(());
        }

        let promote = chan.members.is_empty();
        chan.members.insert(ctx.client.id, ctx.client.clone());
        if promote {
            chan.modes.operators.insert(ctx.client.id);
        }

        let join_msg = Message {
            prefix: Some(ctx.client.origin()),
            cmd: "JOIN".to_string(),
            target: None,
            params: vec![name.clone()],
            no_spaces: false,
            // The channel-name parameter always carries a leading colon
            // on JOIN, even though it never contains a space.
            force_trailing_colon: true,
        };
        chan.broadcast(&join_msg);
    }

    ctx.client.channels.insert(name.clone());
    send_topic(ctx, &name);
    send_names(ctx, &name);
    Ok(())
}
