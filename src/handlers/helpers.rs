//! Shared helpers for command handlers: argument extraction and numeric
//! reply construction.

use chatty_proto::{Message, Numeric};

/// Pull a required, non-empty argument out of a message's params,
/// returning `HandlerError::NeedMoreParams(cmd)` otherwise.
///
/// # Usage
/// ```ignore
/// let target = require_arg!(msg, 0, "JOIN");
/// ```
#[macro_export]
macro_rules! require_arg {
    ($msg:expr, $idx:expr, $cmd:expr) => {
        match $msg.params.get($idx) {
            Some(s) if !s.is_empty() => s.clone(),
            _ => return Err($crate::error::HandlerError::NeedMoreParams($cmd.to_string())),
        }
    };
}

/// Build a numeric reply: server prefix, 3-digit code, target nick,
/// caller-supplied params, and — if the numeric has one — its fixed
/// trailing text appended last.
pub fn numeric_reply(
    server_name: &str,
    target: &str,
    numeric: Numeric,
    mut params: Vec<String>,
) -> Message {
    if let Some(text) = numeric.text() {
        params.push(text.to_string());
    }
    Message {
        prefix: Some(server_name.to_string()),
        cmd: numeric.code().to_string(),
        target: Some(target.to_string()),
        params,
        no_spaces: false,
        force_trailing_colon: false,
    }
}
