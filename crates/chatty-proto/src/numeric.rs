//! IRC numeric reply codes used by this server.
//!
//! Numerics are transmitted on the wire as literal 3-digit strings; this
//! enum exists so handler code can refer to them by name instead of by
//! magic string, the way `slirc-proto::Response` does for the much
//! larger reference numeric set.

#![allow(non_camel_case_types)]

/// A 3-digit IRC reply/error code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Numeric {
    RPL_WELCOME,
    RPL_YOURHOST,
    RPL_CREATED,
    RPL_MYINFO,
    RPL_END_OF_WHO,
    RPL_CHANNEL_MODE_IS,
    RPL_NO_TOPIC,
    RPL_TOPIC,
    RPL_WHO_REPLY,
    RPL_NAME_REPLY,
    RPL_END_OF_NAMES,
    RPL_BAN_LIST,
    RPL_END_OF_BAN_LIST,
    RPL_MOTD_START,
    RPL_END_OF_MOTD,
    ERR_NO_SUCH_NICK,
    ERR_NO_SUCH_CHANNEL,
    ERR_CANNOT_SEND_TO_CHAN,
    ERR_INVALID_CAP_CMD,
    ERR_NO_MOTD,
    ERR_NO_NICKNAME_GIVEN,
    ERR_NICKNAME_IN_USE,
    ERR_NOT_ON_CHANNEL,
    ERR_NOT_REGISTERED,
    ERR_NEED_MORE_PARAMS,
    ERR_ALREADY_REGISTERED,
    ERR_CHANNEL_IS_FULL,
    ERR_UNKNOWN_MODE,
    ERR_BAD_CHANNEL_KEY,
    ERR_CHAN_OP_PRIVS_NEEDED,
    ERR_U_MODE_UNKNOWN_FLAG,
    ERR_USERS_DONT_MATCH,
    ERR_PASSWORD_MISMATCH,
}

impl Numeric {
    /// The literal 3-digit code transmitted on the wire.
    pub const fn code(self) -> &'static str {
        use Numeric::*;
        match self {
            RPL_WELCOME => "001",
            RPL_YOURHOST => "002",
            RPL_CREATED => "003",
            RPL_MYINFO => "004",
            RPL_END_OF_WHO => "315",
            RPL_CHANNEL_MODE_IS => "324",
            RPL_NO_TOPIC => "331",
            RPL_TOPIC => "332",
            RPL_WHO_REPLY => "352",
            RPL_NAME_REPLY => "353",
            RPL_END_OF_NAMES => "366",
            RPL_BAN_LIST => "367",
            RPL_END_OF_BAN_LIST => "368",
            RPL_MOTD_START => "375",
            RPL_END_OF_MOTD => "376",
            ERR_NO_SUCH_NICK => "401",
            ERR_NO_SUCH_CHANNEL => "403",
            ERR_CANNOT_SEND_TO_CHAN => "404",
            ERR_INVALID_CAP_CMD => "410",
            ERR_NO_MOTD => "422",
            ERR_NO_NICKNAME_GIVEN => "431",
            ERR_NICKNAME_IN_USE => "433",
            ERR_NOT_ON_CHANNEL => "442",
            ERR_NOT_REGISTERED => "451",
            ERR_NEED_MORE_PARAMS => "461",
            ERR_ALREADY_REGISTERED => "462",
            ERR_CHANNEL_IS_FULL => "471",
            ERR_UNKNOWN_MODE => "472",
            ERR_BAD_CHANNEL_KEY => "475",
            ERR_CHAN_OP_PRIVS_NEEDED => "482",
            ERR_U_MODE_UNKNOWN_FLAG => "501",
            ERR_USERS_DONT_MATCH => "502",
            ERR_PASSWORD_MISMATCH => "464",
        }
    }

    /// The canonical English text for numerics whose final parameter is
    /// fixed rather than data-dependent (matches the reference server's
    /// `ErrorText`/`RplText` tables byte-for-byte). Returns `None` for
    /// numerics whose trailing text is built from request data (e.g.
    /// `RPL_TOPIC`, whose text *is* the topic).
    pub const fn text(self) -> Option<&'static str> {
        use Numeric::*;
        match self {
            ERR_ALREADY_REGISTERED => Some("Unauthorized command (already registered)"),
            ERR_BAD_CHANNEL_KEY => Some("Cannot join channel (+k)"),
            ERR_CANNOT_SEND_TO_CHAN => Some("Cannot send to channel"),
            ERR_CHANNEL_IS_FULL => Some("Cannot join channel (+l)"),
            ERR_CHAN_OP_PRIVS_NEEDED => Some("You're not channel operator"),
            ERR_INVALID_CAP_CMD => Some("Invalid CAP command"),
            ERR_NEED_MORE_PARAMS => Some("Not enough parameters"),
            ERR_NICKNAME_IN_USE => Some("Nickname is already in use"),
            ERR_NO_NICKNAME_GIVEN => Some("No nickname given"),
            ERR_NO_SUCH_CHANNEL => Some("No such channel"),
            ERR_NO_SUCH_NICK => Some("No such nick/channel"),
            ERR_NOT_ON_CHANNEL => Some("You're not on that channel"),
            ERR_NOT_REGISTERED => Some("You have not registered"),
            ERR_U_MODE_UNKNOWN_FLAG => Some("Unknown MODE flag"),
            ERR_UNKNOWN_MODE => Some("is unknown mode char to me"),
            ERR_USERS_DONT_MATCH => Some("Cannot change mode for other users"),
            ERR_NO_MOTD => Some("MOTD File is missing"),
            ERR_PASSWORD_MISMATCH => Some("Password incorrect"),
            RPL_NO_TOPIC => Some("No topic is set."),
            RPL_END_OF_NAMES => Some("End of NAMES list."),
            RPL_END_OF_WHO => Some("End of WHO list."),
            RPL_END_OF_BAN_LIST => Some("End of channel ban list."),
            RPL_END_OF_MOTD => Some("End of MOTD command."),
            RPL_MOTD_START => Some("Message of the day -"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_three_digits() {
        for n in [
            Numeric::RPL_WELCOME,
            Numeric::ERR_NOT_REGISTERED,
            Numeric::ERR_USERS_DONT_MATCH,
        ] {
            assert_eq!(n.code().len(), 3);
        }
    }

    #[test]
    fn error_text_matches_reference_wording() {
        assert_eq!(
            Numeric::ERR_NOT_REGISTERED.text(),
            Some("You have not registered")
        );
        assert_eq!(Numeric::RPL_NO_TOPIC.text(), Some("No topic is set."));
    }

    #[test]
    fn data_dependent_numerics_have_no_fixed_text() {
        assert_eq!(Numeric::RPL_TOPIC.text(), None);
        assert_eq!(Numeric::RPL_NAME_REPLY.text(), None);
    }
}
