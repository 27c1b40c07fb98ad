use chatty_proto::Message;

use crate::error::{ChannelError, HandlerResult};
use crate::handlers::Context;
use crate::require_arg;

/// `PART <name> [<reason>]`: fan out before removing membership, so the
/// leaver's own `PART` echo still goes out.
pub async fn handle(ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
    let name = require_arg!(msg, 0, "PART");
    let reason = msg.params.get(1).cloned().unwrap_or_default();

    let Some(chan_lock) = ctx.service.get_channel(&name) else {
        ctx.send(ChannelError::NotOnChannel.to_irc_reply(ctx.server_name(), &ctx.nick_or_star(), &name));
        return Ok(());
    };

    {
        let mut chan = chan_lock.write();
        if !chan.is_member(ctx.client.id) {
            ctx.send(ChannelError::NotOnChannel.to_irc_reply(ctx.server_name(), &ctx.nick_or_star(), &name));
            return Ok(());
        }

        let mut params = vec![name.clone()];
        if !reason.is_empty() {
            params.push(reason);
        }
        let part_msg = Message {
            prefix: Some(ctx.client.origin()),
            cmd: "PART".to_string(),
            target: None,
            params,
            no_spaces: false,
            force_trailing_colon: false,
        };
        chan.broadcast(&part_msg);

        chan.members.remove(&ctx.client.id);
        chan.modes.operators.remove(&ctx.client.id);
        chan.modes.voiced.remove(&ctx.client.id);
    }

    ctx.client.channels.remove(&name);
    ctx.service.drop_if_empty(&name);
    Ok(())
}
