use chatty_proto::Message;

use crate::error::{HandlerError, HandlerResult};
use crate::handlers::connection::try_complete_registration;
use crate::handlers::Context;
use crate::require_arg;

/// `NICK <nick>`: claim a nickname through the registry, then attempt
/// registration completion if `USER` has already landed.
pub async fn handle(ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
    let requested = require_arg!(msg, 0, "NICK");

    let snapshot = ctx.client.user.read().clone();
    match ctx.service.nicks.register(&requested, &snapshot) {
        Some(accepted) => {
            ctx.client.user.write().nick = accepted;
            try_complete_registration(ctx).await
        }
        None => Err(HandlerError::NicknameInUse(requested)),
    }
}
