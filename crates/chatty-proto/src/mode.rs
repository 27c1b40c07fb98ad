//! MODE parameter-list parsing and formatting.
//!
//! The parser and formatter here are command-agnostic: they know the
//! syntax of a mode-string (`+ov-b`-style runs of letters with a sticky
//! `+`/`-` action) and which letters carry an argument, but nothing
//! about what the letters *mean*. The server layer interprets the
//! resulting [`Mode`] values against channel or user state.

use std::fmt;

/// The action a single [`Mode`] entry represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// `+c` — set.
    Plus,
    /// `-c` — clear.
    Minus,
    /// Bare `c` with no preceding `+`/`-` — query.
    Query,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Plus => f.write_str("+"),
            Action::Minus => f.write_str("-"),
            Action::Query => Ok(()),
        }
    }
}

/// One parsed mode character with its action and optional argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mode {
    pub action: Action,
    pub ch: char,
    pub param: Option<String>,
}

impl Mode {
    pub fn new(action: Action, ch: char, param: Option<String>) -> Self {
        Mode { action, ch, param }
    }
}

/// Parse a MODE command's parameter list.
///
/// `params[0]` is expected to be the first mode-string; subsequent
/// `params` are interleaved mode-strings and argument tokens. `takes_arg`
/// decides, for a given `(action, char)` pair, whether the next token
/// should be consumed as that mode's argument.
///
/// The action is sticky across an entire mode-string and carries over
/// from a prior mode-string in the same call only in the sense that
/// each new mode-string restarts at [`Action::Query`] until it sees its
/// own `+`/`-` — matching the wire behavior where a bare leading
/// character (as in `MODE #chan b`) is a query, not a mutation.
pub fn parse_modes(params: &[String], takes_arg: impl Fn(Action, char) -> bool) -> Vec<Mode> {
    let mut modes = Vec::new();
    let mut idx = 0;

    while idx < params.len() {
        let token = params[idx].clone();
        idx += 1;
        let mut action = Action::Query;

        for c in token.chars() {
            match c {
                '+' => action = Action::Plus,
                '-' => action = Action::Minus,
                ch => {
                    let param = if takes_arg(action, ch) && idx < params.len() {
                        let p = params[idx].clone();
                        idx += 1;
                        Some(p)
                    } else {
                        None
                    };
                    modes.push(Mode::new(action, ch, param));
                }
            }
        }
    }

    modes
}

/// Format a list of [`Mode`]s back into a MODE command's parameter list:
/// one combined mode-string (consecutive same-action runs share one
/// `+`/`-`) followed by the collected argument tokens, in order.
///
/// `Action::Query` entries never appear in the formatted mode-string
/// (they exist only to drive list-mode query replies elsewhere). If
/// every entry is a query, or if there simply are no entries at all,
/// the two cases are distinguished: no modes at all formats as a bare
/// `+`, while modes that are all queries format as no parameters.
pub fn format_modes(modes: &[Mode]) -> Vec<String> {
    if modes.is_empty() {
        return vec!["+".to_string()];
    }

    let mut mode_string = String::new();
    let mut args = Vec::new();
    let mut last_action: Option<Action> = None;

    for m in modes {
        if m.action == Action::Query {
            continue;
        }
        if last_action != Some(m.action) {
            mode_string.push(if m.action == Action::Plus { '+' } else { '-' });
            last_action = Some(m.action);
        }
        mode_string.push(m.ch);
        if let Some(p) = &m.param {
            args.push(p.clone());
        }
    }

    if mode_string.is_empty() {
        return Vec::new();
    }

    let mut out = vec![mode_string];
    out.extend(args);
    out
}
