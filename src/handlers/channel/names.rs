use chatty_proto::{Message, Numeric};

use crate::error::HandlerResult;
use crate::handlers::{helpers::numeric_reply, Context};
use crate::require_arg;

/// `NAMES <name>`.
pub async fn handle(ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
    let name = require_arg!(msg, 0, "NAMES");
    send_names(ctx, &name);
    Ok(())
}

/// Targeted `NAMES` projection at the caller only — used both by a bare
/// `NAMES <name>` and by `JOIN` completion. Unlike `TOPIC`, membership
/// isn't required to query the list.
pub fn send_names(ctx: &Context<'_>, name: &str) {
    let nick = ctx.nick_or_star();
    if let Some(chan_lock) = ctx.service.get_channel(name) {
        let chan = chan_lock.read();
        let mut entries: Vec<String> = chan
            .members
            .keys()
            .map(|id| format!("{}{}", chan.prefix(*id), chan.members[id].nick()))
            .collect();
        entries.sort();
        ctx.send(numeric_reply(
            ctx.server_name(),
            &nick,
            Numeric::RPL_NAME_REPLY,
            vec!["=".to_string(), name.to_string(), entries.join(" ")],
        ));
    }
    ctx.send(numeric_reply(
        ctx.server_name(),
        &nick,
        Numeric::RPL_END_OF_NAMES,
        vec![name.to_string()],
    ));
}
