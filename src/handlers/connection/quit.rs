use chatty_proto::Message;

use crate::error::HandlerResult;
use crate::handlers::Context;
use crate::teardown;

/// `QUIT [<reason>]`: run the shared teardown path and mark the
/// client's sticky error with the graceful-quit sentinel so the
/// connection loop doesn't log it as a failure.
pub async fn handle(ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
    let reason = msg.params.first().cloned().unwrap_or_default();
    teardown::quit(ctx.service, ctx.client, &reason);
    ctx.client.quit();
    Ok(())
}
