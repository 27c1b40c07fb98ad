use chatty_proto::Message;

use crate::error::{HandlerError, HandlerResult};
use crate::handlers::connection::try_complete_registration;
use crate::handlers::Context;

/// `USER <name> <mode> <unused> :<fullName>`: four-parameter arity.
/// Rejected if already registered.
pub async fn handle(ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
    if ctx.client.is_registered() {
        return Err(HandlerError::AlreadyRegistered);
    }
    if msg.params.len() != 4 {
        return Err(HandlerError::NeedMoreParams("USER".to_string()));
    }

    {
        let mut user = ctx.client.user.write();
        user.name = msg.params[0].clone();
        user.full_name = msg.params[3].clone();
    }

    try_complete_registration(ctx).await
}
