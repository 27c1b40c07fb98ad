use chatty_proto::Message;

use crate::error::{HandlerError, HandlerResult};
use crate::handlers::connection::try_complete_registration;
use crate::handlers::Context;

/// `CAP LS`/`CAP REQ`/`CAP END`. Capability negotiation proper isn't
/// implemented — this exists only so clients that always negotiate
/// `CAP` before `NICK`/`USER` aren't stuck behind the pre-registration
/// gate, and so `CAP END` can unblock registration the way it would
/// once real negotiation finishes.
pub async fn handle(ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
    let sub = msg.params.first().map(|s| s.to_ascii_uppercase());
    match sub.as_deref() {
        Some("LS") => {
            ctx.send(Message::new("CAP", vec!["LS".to_string()]));
            Ok(())
        }
        Some("REQ") => {
            ctx.send(Message::new(
                "CAP",
                vec!["*".to_string(), "ACK".to_string(), "multi-prefix".to_string()],
            ));
            Ok(())
        }
        Some("END") => try_complete_registration(ctx).await,
        _ => Err(HandlerError::InvalidCapCmd),
    }
}
