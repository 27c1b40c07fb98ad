pub mod channel;
pub mod user;

use chatty_proto::Message;

use crate::error::HandlerResult;
use crate::handlers::Context;
use crate::require_arg;

/// `MODE <target> [<modestring> ...]`: routed to the channel or user
/// mode pipeline depending on whether `<target>` looks like a channel
/// name.
pub async fn handle(ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
    let target = require_arg!(msg, 0, "MODE");
    if target.starts_with('#') || target.starts_with('&') {
        channel::handle(ctx, &target, &msg.params[1..]).await
    } else {
        user::handle(ctx, &target, &msg.params[1..]).await
    }
}
