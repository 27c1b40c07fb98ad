use chatty_proto::{Message, Numeric};

use crate::error::HandlerResult;
use crate::handlers::{helpers::numeric_reply, Context};
use crate::require_arg;

/// `WHO <name>`: one `RPL_WHO_REPLY` per member, then
/// `RPL_END_OF_WHO`.
pub async fn handle(ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
    let name = require_arg!(msg, 0, "WHO");
    let nick = ctx.nick_or_star();

    if let Some(chan_lock) = ctx.service.get_channel(&name) {
        let chan = chan_lock.read();
        for (id, member) in chan.members.iter() {
            let user = member.user.read();
            ctx.send(numeric_reply(
                ctx.server_name(),
                &nick,
                Numeric::RPL_WHO_REPLY,
                vec![
                    name.clone(),
                    format!("~{}", user.name),
                    user.host.to_string(),
                    user.server_name.clone(),
                    user.nick.clone(),
                    format!("H{}", chan.prefix(*id)),
                    format!("0 {}", user.full_name),
                ],
            ));
        }
    }

    ctx.send(numeric_reply(
        ctx.server_name(),
        &nick,
        Numeric::RPL_END_OF_WHO,
        vec![name],
    ));
    Ok(())
}
