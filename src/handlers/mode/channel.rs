//! Channel `MODE` command pipeline, including the no-op suppression
//! that keeps a mutation that changes nothing from producing either an
//! outbound `MODE` message or an entry in the change list.

use chatty_proto::{format_modes, parse_modes, Action, Message, Mode, Numeric};

use crate::error::{ChannelError, HandlerError, HandlerResult};
use crate::handlers::{helpers::numeric_reply, Context};

fn takes_arg(action: Action, ch: char) -> bool {
    matches!(
        (action, ch),
        (Action::Plus | Action::Minus, 'b' | 'e' | 'I' | 'o' | 'v') | (Action::Plus, 'k' | 'l')
    )
}

pub async fn handle(ctx: &mut Context<'_>, name: &str, raw: &[String]) -> HandlerResult {
    let Some(chan_lock) = ctx.service.get_channel(name) else {
        return Err(HandlerError::NoSuchChannel(name.to_string()));
    };

    if raw.is_empty() {
        let chan = chan_lock.read();
        let nick = ctx.nick_or_star();
        ctx.send(numeric_reply(
            ctx.server_name(),
            &nick,
            Numeric::RPL_CHANNEL_MODE_IS,
            vec![name.to_string(), format!("+{}", chan.modes.flags())],
        ));
        return Ok(());
    }

    let parsed = parse_modes(raw, takes_arg);

    if parsed.iter().all(|m| m.action == Action::Query) {
        let chan = chan_lock.read();
        let nick = ctx.nick_or_star();
        for m in &parsed {
            if m.ch == 'b' {
                for mask in &chan.modes.bans {
                    ctx.send(numeric_reply(
                        ctx.server_name(),
                        &nick,
                        Numeric::RPL_BAN_LIST,
                        vec![name.to_string(), mask.clone()],
                    ));
                }
                ctx.send(numeric_reply(
                    ctx.server_name(),
                    &nick,
                    Numeric::RPL_END_OF_BAN_LIST,
                    vec![name.to_string()],
                ));
            }
        }
        return Ok(());
    }

    let uid = ctx.client.id;
    let nick = ctx.nick_or_star();
    let server_name = ctx.server_name().to_string();
    let mut changes: Vec<Mode> = Vec::new();

    {
        let mut chan = chan_lock.write();
        let is_op = chan.is_operator(uid);

        for m in parsed {
            match m.ch {
                'b' => list_mode(&mut changes, ctx, &server_name, &nick, name, is_op, &m, &mut chan.modes.bans),
                'e' => list_mode(&mut changes, ctx, &server_name, &nick, name, is_op, &m, &mut chan.modes.ban_exceptions),
                'I' => list_mode(&mut changes, ctx, &server_name, &nick, name, is_op, &m, &mut chan.modes.invitation_masks),
                'k' => {
                    if !is_op {
                        ctx.send(ChannelError::ChanOpPrivsNeeded.to_irc_reply(&server_name, &nick, name));
                        continue;
                    }
                    match m.action {
                        Action::Plus => {
                            if let Some(key) = m.param.filter(|k| !k.is_empty() && *k != chan.modes.key) {
                                chan.modes.key = key.clone();
                                changes.push(Mode::new(Action::Plus, 'k', Some(key)));
                            }
                        }
                        Action::Minus => {
                            if !chan.modes.key.is_empty() {
                                chan.modes.key.clear();
                                changes.push(Mode::new(Action::Minus, 'k', None));
                            }
                        }
                        Action::Query => {}
                    }
                }
                'l' => {
                    if !is_op {
                        continue;
                    }
                    match m.action {
                        Action::Plus => {
                            if let Some(limit) = m.param.as_deref().and_then(|p| p.parse::<i16>().ok()) {
                                if limit >= 0 && limit as u32 != chan.modes.limit {
                                    chan.modes.limit = limit as u32;
                                    changes.push(Mode::new(Action::Plus, 'l', Some(limit.to_string())));
                                }
                            }
                        }
                        Action::Minus => {
                            if chan.modes.limit != 0 {
                                chan.modes.limit = 0;
                                changes.push(Mode::new(Action::Minus, 'l', None));
                            }
                        }
                        Action::Query => {}
                    }
                }
                'm' => bool_mode(&mut changes, ctx, &server_name, &nick, name, is_op, &m, &mut chan.modes.moderated),
                'n' => bool_mode(&mut changes, ctx, &server_name, &nick, name, is_op, &m, &mut chan.modes.no_external_msgs),
                't' => bool_mode(&mut changes, ctx, &server_name, &nick, name, is_op, &m, &mut chan.modes.topic_lock),
                'o' => {
                    if !is_op {
                        ctx.send(ChannelError::ChanOpPrivsNeeded.to_irc_reply(&server_name, &nick, name));
                        continue;
                    }
                    let Some(target_nick) = m.param.clone() else { continue };
                    let Some(target) = ctx.service.nicks.get(&target_nick) else { continue };
                    if !chan.members.contains_key(&target.id) {
                        continue;
                    }
                    let grant = matches!(m.action, Action::Plus);
                    if chan.modes.operators.contains(&target.id) == grant {
                        continue;
                    }
                    if grant {
                        chan.modes.operators.insert(target.id);
                    } else {
                        chan.modes.operators.remove(&target.id);
                    }
                    changes.push(Mode::new(m.action, 'o', Some(target_nick)));
                }
                'v' => {
                    if !is_op {
                        ctx.send(ChannelError::ChanOpPrivsNeeded.to_irc_reply(&server_name, &nick, name));
                        continue;
                    }
                    let Some(target_nick) = m.param.clone() else { continue };
                    let Some(target) = ctx.service.nicks.get(&target_nick) else { continue };
                    if !chan.members.contains_key(&target.id) {
                        continue;
                    }
                    let grant = matches!(m.action, Action::Plus);
                    if chan.modes.voiced.contains(&target.id) == grant {
                        continue;
                    }
                    if grant {
                        chan.modes.voiced.insert(target.id);
                    } else {
                        chan.modes.voiced.remove(&target.id);
                    }
                    changes.push(Mode::new(m.action, 'v', Some(target_nick)));
                }
                other => {
                    ctx.send(numeric_reply(
                        &server_name,
                        &nick,
                        Numeric::ERR_UNKNOWN_MODE,
                        vec![other.to_string()],
                    ));
                }
            }
        }

        if !changes.is_empty() {
            let formatted = format_modes(&changes);
            let mut params = vec![name.to_string()];
            params.extend(formatted);
            let announce = Message {
                prefix: Some(ctx.client.origin()),
                cmd: "MODE".to_string(),
                target: None,
                params,
                no_spaces: true,
                force_trailing_colon: false,
            };
            chan.broadcast(&announce);
        }
    }

    Ok(())
}

fn list_mode(
    changes: &mut Vec<Mode>,
    ctx: &Context<'_>,
    server_name: &str,
    nick: &str,
    channel_name: &str,
    is_op: bool,
    m: &Mode,
    set: &mut std::collections::HashSet<String>,
) {
    if !is_op {
        ctx.send(ChannelError::ChanOpPrivsNeeded.to_irc_reply(server_name, nick, channel_name));
        return;
    }
    let Some(mask) = m.param.clone() else { return };
    match m.action {
        Action::Plus => {
            if set.insert(mask.clone()) {
                changes.push(Mode::new(Action::Plus, m.ch, Some(mask)));
            }
        }
        Action::Minus => {
            if set.remove(&mask) {
                changes.push(Mode::new(Action::Minus, m.ch, Some(mask)));
            }
        }
        Action::Query => {}
    }
}

fn bool_mode(
    changes: &mut Vec<Mode>,
    ctx: &Context<'_>,
    server_name: &str,
    nick: &str,
    channel_name: &str,
    is_op: bool,
    m: &Mode,
    field: &mut bool,
) {
    if !is_op {
        ctx.send(ChannelError::ChanOpPrivsNeeded.to_irc_reply(server_name, nick, channel_name));
        return;
    }
    let new_value = match m.action {
        Action::Plus => true,
        Action::Minus => false,
        Action::Query => return,
    };
    if *field != new_value {
        *field = new_value;
        changes.push(Mode::new(m.action, m.ch, None));
    }
}
