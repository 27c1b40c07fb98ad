//! User `MODE` command: only `i` (invisible) is client-settable; `a`,
//! `o`, `O` require the (unspecified-in-core) `OPER` path instead.

use chatty_proto::{format_modes, parse_modes, Action, Message, Mode, Numeric};

use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{helpers::numeric_reply, Context};

fn takes_arg(_action: Action, _ch: char) -> bool {
    false
}

pub async fn handle(ctx: &mut Context<'_>, target_nick: &str, raw: &[String]) -> HandlerResult {
    let issuer_nick = ctx.client.nick();
    if target_nick != issuer_nick {
        let reply = HandlerError::UsersDontMatch
            .to_irc_reply(ctx.server_name(), &ctx.nick_or_star())
            .expect("UsersDontMatch always has a reply");
        ctx.send(reply);
    }

    if raw.is_empty() {
        return Ok(());
    }

    let parsed = parse_modes(raw, takes_arg);
    let mut changes: Vec<Mode> = Vec::new();

    {
        let mut modes = ctx.client.modes.write();
        for m in parsed {
            match m.ch {
                'i' => {
                    let new_value = match m.action {
                        Action::Plus => true,
                        Action::Minus => false,
                        Action::Query => continue,
                    };
                    if modes.invisible != new_value {
                        modes.invisible = new_value;
                        changes.push(Mode::new(m.action, 'i', None));
                    }
                }
                'a' | 'o' | 'O' => {
                    // Not settable via MODE; operator status comes from OPER,
                    // which this server doesn't implement.
                }
                _ => {
                    ctx.send(numeric_reply(
                        ctx.server_name(),
                        &ctx.nick_or_star(),
                        Numeric::ERR_U_MODE_UNKNOWN_FLAG,
                        vec![],
                    ));
                }
            }
        }
    }

    if !changes.is_empty() {
        let params = format_modes(&changes);
        let announce = Message {
            prefix: Some(ctx.client.origin()),
            cmd: "MODE".to_string(),
            target: None,
            params: {
                let mut p = vec![issuer_nick.clone()];
                p.extend(params);
                p
            },
            no_spaces: true,
            force_trailing_colon: false,
        };
        ctx.send(announce);
    }

    Ok(())
}
