use chatty_proto::Message;

use crate::error::{HandlerError, HandlerResult};
use crate::handlers::Context;

/// `PASS <password>`: stash the plaintext for verification once
/// registration completes. Rejected outright if already registered.
pub async fn handle(ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
    if ctx.client.is_registered() {
        return Err(HandlerError::AlreadyRegistered);
    }
    let password = msg.params.first().cloned().unwrap_or_default();
    *ctx.client.password.lock() = Some(password);
    Ok(())
}
