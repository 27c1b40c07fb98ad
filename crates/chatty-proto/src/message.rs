use std::fmt;
use std::str::FromStr;

/// Wire length cap, including the line terminator.
///
/// Frames larger than this must be truncated or dropped at the read
/// layer; [`Message::encode`] does not enforce the cap itself, since a
/// badly-formatted oversized message is a connection-layer problem, not
/// a codec one.
pub const MAX_LINE_LEN: usize = 512;

/// One decoded (or to-be-encoded) IRC wire frame.
///
/// `Message` is deliberately untyped — `cmd` is a bare string (a command
/// name or a 3-digit numeric) and `params` is an ordered list of
/// strings. This mirrors the wire format directly instead of projecting
/// it onto a per-command enum, which keeps the codec trivial to reason
/// about and matches how the reference server treats messages: numerics
/// and verbs flow through the same pipe.
///
/// Only the last element of `params` may contain a space; that is the
/// one parameter the wire format lets you spell with embedded spaces,
/// via a leading `:`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Message {
    /// Source of the message, e.g. `nick!~user@host`, colon stripped.
    pub prefix: Option<String>,
    /// Command name or 3-digit numeric. `"*"` when absent on decode.
    pub cmd: String,
    /// For numeric replies, the recipient nick/`*`, inserted right after `cmd`.
    pub target: Option<String>,
    /// Ordered parameters; only the last one may contain a space.
    pub params: Vec<String>,
    /// Suppress the trailing `:` on the last parameter even if it has a
    /// space in it. Set by the MODE formatter, which builds a
    /// space-containing final parameter (e.g. a channel key) that must
    /// not be read back as a trailing-parameter colon escape.
    pub no_spaces: bool,
    /// Force a leading `:` on the last parameter even though it has no
    /// space, for the handful of replies whose wire form is specified
    /// with one regardless (e.g. `JOIN`'s channel-name parameter).
    pub force_trailing_colon: bool,
}

impl Message {
    /// Build a message with no prefix, target, or `no_spaces`.
    pub fn new(cmd: impl Into<String>, params: Vec<String>) -> Self {
        Message {
            prefix: None,
            cmd: cmd.into(),
            target: None,
            params,
            no_spaces: false,
            force_trailing_colon: false,
        }
    }

    /// Decode one line of wire input.
    ///
    /// Splits on single-space runs. A leading `:`-prefixed token is the
    /// prefix. The next token is the command, or `"*"` if the line is
    /// empty. The first remaining token starting with `:` swallows the
    /// rest of the line as one parameter.
    pub fn decode(line: &str) -> Message {
        let mut fields = line.split(' ').filter(|f| !f.is_empty()).peekable();

        let prefix = match fields.peek() {
            Some(f) if f.starts_with(':') => {
                let p = f[1..].to_string();
                fields.next();
                Some(p)
            }
            _ => None,
        };

        let cmd = fields.next().unwrap_or("*").to_string();

        let mut params = Vec::new();
        let mut rest: Vec<&str> = fields.collect();
        while !rest.is_empty() {
            if rest[0].starts_with(':') {
                let joined = rest.join(" ");
                params.push(joined[1..].to_string());
                break;
            }
            params.push(rest[0].to_string());
            rest.remove(0);
        }

        Message {
            prefix,
            cmd,
            target: None,
            params,
            no_spaces: false,
            force_trailing_colon: false,
        }
    }

    /// Encode this message as one wire line, without a trailing
    /// terminator (the writer appends `\n` or `\r\n` itself).
    pub fn encode(&self) -> String {
        let mut fields = Vec::new();
        if let Some(p) = &self.prefix {
            fields.push(format!(":{p}"));
        }
        let cmd = if self.cmd.is_empty() { "*" } else { &self.cmd };
        fields.push(cmd.to_string());

        if let Some(target) = &self.target {
            if cmd.as_bytes().first().is_some_and(|b| b.is_ascii_digit()) {
                fields.push(target.clone());
            }
        }

        let last = self.params.len().saturating_sub(1);
        for (i, param) in self.params.iter().enumerate() {
            let wants_colon =
                i == last && ((param.contains(' ') && !self.no_spaces) || self.force_trailing_colon);
            if wants_colon {
                fields.push(format!(":{param}"));
            } else {
                fields.push(param.clone());
            }
        }
        fields.join(" ")
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for Message {
    type Err = std::convert::Infallible;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        Ok(Message::decode(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_prefix_cmd_and_trailing_param() {
        let m = Message::decode(":nick!~user@host PRIVMSG #chan :hello there");
        assert_eq!(m.prefix.as_deref(), Some("nick!~user@host"));
        assert_eq!(m.cmd, "PRIVMSG");
        assert_eq!(m.params, vec!["#chan".to_string(), "hello there".to_string()]);
    }

    #[test]
    fn decodes_empty_line_as_star() {
        let m = Message::decode("");
        assert_eq!(m.cmd, "*");
        assert!(m.params.is_empty());
    }

    #[test]
    fn decodes_without_prefix() {
        let m = Message::decode("NICK Batman");
        assert!(m.prefix.is_none());
        assert_eq!(m.cmd, "NICK");
        assert_eq!(m.params, vec!["Batman".to_string()]);
    }

    #[test]
    fn encodes_numeric_with_target_before_params() {
        let mut m = Message::new("331", vec!["#gotham".into(), "No topic is set.".into()]);
        m.prefix = Some("irc.localhost".into());
        m.target = Some("Batman".into());
        assert_eq!(
            m.encode(),
            ":irc.localhost 331 Batman #gotham :No topic is set."
        );
    }

    #[test]
    fn last_param_gets_colon_only_with_space() {
        let m = Message::new("PRIVMSG", vec!["#chan".into(), "noSpacesHere".into()]);
        assert_eq!(m.encode(), "PRIVMSG #chan noSpacesHere");
    }

    #[test]
    fn no_spaces_flag_suppresses_colon() {
        let mut m = Message::new("MODE", vec!["#chan".into(), "+k a key".into()]);
        m.no_spaces = true;
        assert_eq!(m.encode(), "MODE #chan +k a key");
    }

    #[test]
    fn force_trailing_colon_applies_even_without_a_space() {
        let mut m = Message::new("JOIN", vec!["#gotham".into()]);
        m.prefix = Some("Batman!~batman@localhost".into());
        m.force_trailing_colon = true;
        assert_eq!(m.encode(), ":Batman!~batman@localhost JOIN :#gotham");
    }

    #[test]
    fn round_trip_preserves_lawful_messages() {
        let cases = vec![
            Message::new("NICK", vec!["Batman".into()]),
            Message::new("JOIN", vec!["#gotham".into()]),
            Message::new("PRIVMSG", vec!["#gotham".into(), "hi there friend".into()]),
        ];
        for m in cases {
            let decoded = Message::decode(&m.encode());
            assert_eq!(decoded.cmd, m.cmd);
            assert_eq!(decoded.params, m.params);
        }
    }

    #[test]
    fn max_line_len_is_512() {
        assert_eq!(MAX_LINE_LEN, 512);
    }
}
