pub mod cap;
pub mod nick;
pub mod pass;
pub mod quit;
pub mod user;

use chatty_proto::Numeric;

use crate::auth;
use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{helpers::numeric_reply, Context};

/// Attempt to complete registration for `ctx.client`.
///
/// Called after every `NICK`, `USER`, and `CAP END` that might be the
/// piece that was missing. A no-op if `nick`/`name` aren't both set
/// yet, or if the client is already registered.
pub async fn try_complete_registration(ctx: &Context<'_>) -> HandlerResult {
    if ctx.client.is_registered() {
        return Ok(());
    }
    if !ctx.client.user.read().is_complete() {
        return Ok(());
    }

    if let Some((digest, salt)) = ctx
        .service
        .store
        .connection_password()
        .map_err(|e| HandlerError::Internal(e.to_string()))?
    {
        let supplied = ctx.client.password.lock().clone().unwrap_or_default();
        if !auth::verify(supplied.as_bytes(), &salt, &digest) {
            // A password mismatch earns a numeric reply *and* terminates
            // the connection. The reply has to go out before the sticky
            // error is set, since `Client::send` silently no-ops once
            // `has_err()` is true.
            let reply = HandlerError::PasswordMismatch
                .to_irc_reply(ctx.server_name(), &ctx.nick_or_star())
                .expect("PasswordMismatch always has a reply");
            ctx.send(reply);
            ctx.client.set_err("password mismatch");
            return Err(HandlerError::Quit(Some("password mismatch".to_string())));
        }
    }

    ctx.client.mark_registered();

    let nick = ctx.client.nick();
    let server_name = ctx.server_name().to_string();

    ctx.send(numeric_reply(
        &server_name,
        &nick,
        Numeric::RPL_WELCOME,
        vec![format!("Welcome to the Internet Relay Chat Network {nick}")],
    ));
    ctx.send(numeric_reply(
        &server_name,
        &nick,
        Numeric::RPL_YOURHOST,
        vec![format!(
            "Your host is {server_name}, running version {}",
            ctx.service.version
        )],
    ));
    ctx.send(numeric_reply(
        &server_name,
        &nick,
        Numeric::RPL_CREATED,
        vec![format!(
            "This server was created {}",
            humantime_started_at(ctx)
        )],
    ));
    ctx.send(numeric_reply(&server_name, &nick, Numeric::ERR_NO_MOTD, vec![]));

    Ok(())
}

fn humantime_started_at(ctx: &Context<'_>) -> String {
    let elapsed = ctx.service.started_at.elapsed();
    let started = chrono::Utc::now() - chrono::Duration::from_std(elapsed).unwrap_or_default();
    started.to_rfc2822()
}
