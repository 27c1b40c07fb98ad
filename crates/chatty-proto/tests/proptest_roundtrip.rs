//! Property-based round-trip tests for the wire codec and the mode
//! parser/formatter.
//!
//! Generates random-but-lawful messages and mode strings and checks that
//! encoding then decoding (or parsing then formatting then re-parsing)
//! gets back to an equivalent value.

use proptest::prelude::*;

use chatty_proto::{format_modes, parse_modes, Action, Message, Mode};

/// A bare token: no spaces, no leading colon, non-empty — safe anywhere
/// in a message except as a space-containing trailing parameter.
fn token_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9_#&]{1,16}").expect("valid regex")
}

/// Text that may contain (single, non-trailing) spaces, destined for
/// the last parameter slot. The wire format collapses runs of spaces
/// outside of this reconstruction, so words are joined by exactly one
/// space each to keep the round trip lossless.
fn trailing_text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::string::string_regex("[a-zA-Z0-9_]{1,8}").expect("valid regex"),
        1..5,
    )
    .prop_map(|words| words.join(" "))
}

fn prefix_strategy() -> impl Strategy<Value = String> {
    (token_strategy(), token_strategy(), token_strategy())
        .prop_map(|(nick, user, host)| format!("{nick}!~{user}@{host}"))
}

/// A lawful `Message`: every non-last parameter is a bare token, the
/// last is either another bare token or free text that may contain
/// spaces (the codec then decides whether it needs a `:`).
fn message_strategy() -> impl Strategy<Value = Message> {
    (
        prop::option::of(prefix_strategy()),
        token_strategy(),
        prop::collection::vec(token_strategy(), 0..4),
        prop_oneof![token_strategy(), trailing_text_strategy()],
    )
        .prop_map(|(prefix, cmd, mut middle, last)| {
            middle.push(last);
            Message {
                prefix,
                cmd: cmd.to_ascii_uppercase(),
                target: None,
                params: middle,
                no_spaces: false,
                force_trailing_colon: false,
            }
        })
}

proptest! {
    /// encode -> decode recovers the same command and parameters.
    #[test]
    fn message_roundtrip(msg in message_strategy()) {
        let encoded = msg.encode();
        let decoded = Message::decode(&encoded);

        prop_assert_eq!(&decoded.cmd, &msg.cmd, "encoded: {encoded:?}");
        prop_assert_eq!(&decoded.params, &msg.params, "encoded: {encoded:?}");
        prop_assert_eq!(&decoded.prefix, &msg.prefix, "encoded: {encoded:?}");
    }

    /// `force_trailing_colon` still round-trips even when the last
    /// parameter has no space to justify a colon on its own.
    #[test]
    fn forced_trailing_colon_roundtrips(chan in token_strategy()) {
        let msg = Message {
            prefix: None,
            cmd: "JOIN".to_string(),
            target: None,
            params: vec![chan.clone()],
            no_spaces: false,
            force_trailing_colon: true,
        };
        let encoded = msg.encode();
        prop_assert!(encoded.ends_with(&format!(":{chan}")), "encoded: {encoded:?}");

        let decoded = Message::decode(&encoded);
        prop_assert_eq!(decoded.params, vec![chan]);
    }

    /// Encoding never panics and never embeds a bare newline.
    #[test]
    fn encode_never_embeds_a_newline(msg in message_strategy()) {
        let encoded = msg.encode();
        prop_assert!(!encoded.contains('\n') && !encoded.contains('\r'));
    }
}

fn chan_takes_arg(action: Action, ch: char) -> bool {
    matches!((action, ch), (Action::Plus | Action::Minus, 'o' | 'v'))
}

/// A sticky `+`/`-` run of boolean letters, e.g. `+nt-m`.
fn bool_mode_string_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        (prop::bool::ANY, prop::sample::select(vec!['n', 't', 'm'])),
        1..6,
    )
    .prop_map(|entries| {
        let mut s = String::new();
        let mut last_plus: Option<bool> = None;
        for (plus, ch) in entries {
            if last_plus != Some(plus) {
                s.push(if plus { '+' } else { '-' });
                last_plus = Some(plus);
            }
            s.push(ch);
        }
        s
    })
}

proptest! {
    /// Parsing a sticky mode-string and formatting it back produces a
    /// mode-string whose parse yields the same (action, char) pairs in
    /// the same order.
    #[test]
    fn bool_mode_parse_format_roundtrip(raw in bool_mode_string_strategy()) {
        let params = vec![raw.clone()];
        let parsed = parse_modes(&params, chan_takes_arg);
        prop_assume!(!parsed.is_empty());

        let formatted = format_modes(&parsed);
        let reparsed = parse_modes(&formatted, chan_takes_arg);

        let simplify = |modes: &[Mode]| -> Vec<(Action, char)> {
            modes.iter().map(|m| (m.action, m.ch)).collect()
        };
        prop_assert_eq!(simplify(&parsed), simplify(&reparsed), "raw: {raw:?}, formatted: {formatted:?}");
    }

    /// An argument-taking letter's parameter survives a format/reparse
    /// cycle alongside its action.
    #[test]
    fn arg_mode_parse_format_roundtrip(plus in prop::bool::ANY, nick in token_strategy()) {
        let action_char = if plus { '+' } else { '-' };
        let params = vec![format!("{action_char}o"), nick.clone()];
        let parsed = parse_modes(&params, chan_takes_arg);
        prop_assert_eq!(parsed.len(), 1);
        prop_assert_eq!(parsed[0].param.as_deref(), Some(nick.as_str()));

        let formatted = format_modes(&parsed);
        let reparsed = parse_modes(&formatted, chan_takes_arg);
        prop_assert_eq!(parsed, reparsed);
    }
}
