use thiserror::Error;

use crate::grammar::State;
use crate::model::{DnError, ResultCode, UrlError};

// -----------------------------------------------------------------------------
// ----- DecodeError -----------------------------------------------------------

/// Why a message could not be decoded.
///
/// Every variant aborts the whole message; there is no partial recovery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unexpected tag 0x{tag:02X} in state {state:?}")]
    UnexpectedTag { state: State, tag: u8 },

    #[error("unsupported tag 0x{0:02X}")]
    UnsupportedTag(u8),

    #[error("indefinite length is not allowed")]
    IndefiniteLength,

    #[error("invalid length octets")]
    InvalidLength,

    #[error("length does not fit in usize")]
    LengthOverflow,

    #[error("element of {length} bytes overruns its enclosing element ({remaining} bytes left)")]
    FrameOverrun { length: usize, remaining: usize },

    #[error("message of {length} bytes exceeds the {limit} byte limit")]
    PduTooLarge { length: usize, limit: usize },

    #[error("invalid INTEGER encoding")]
    InvalidInteger,

    #[error("INTEGER does not fit in 32 bits")]
    IntegerOverflow,

    #[error("invalid BOOLEAN encoding")]
    InvalidBoolean,

    #[error("invalid {field}: {value}")]
    InvalidValue { field: &'static str, value: i32 },

    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("invalid DN: {0}")]
    InvalidDn(#[from] DnError),

    #[error("invalid LDAP URL: {0}")]
    InvalidUrl(#[from] UrlError),

    #[error("invalid OID '{0}'")]
    InvalidOid(String),

    #[error("invalid filter: {0}")]
    InvalidFilter(&'static str),

    #[error("{0} is out of order")]
    OutOfOrder(&'static str),

    #[error("message ended before it was complete")]
    Truncated,

    #[error("{0} bytes left after the message")]
    TrailingData(usize),
}

impl DecodeError {
    /// Every decode failure is answered with protocolError.
    #[inline]
    pub fn result_code(&self) -> ResultCode {
        ResultCode::ProtocolError
    }

    /// Framing errors leave the byte stream without a trustworthy message
    /// boundary.
    pub fn is_framing(&self) -> bool {
        matches!(
            self,
            DecodeError::UnsupportedTag(_)
                | DecodeError::IndefiniteLength
                | DecodeError::InvalidLength
                | DecodeError::LengthOverflow
                | DecodeError::FrameOverrun { .. }
                | DecodeError::PduTooLarge { .. }
                | DecodeError::Truncated
                | DecodeError::TrailingData(_)
        )
    }
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_errors_map_to_protocol_error() {
        let errors = [
            DecodeError::IndefiniteLength,
            DecodeError::EmptyField("controls"),
            DecodeError::UnexpectedTag {
                state: State::Start,
                tag: 0x04,
            },
        ];
        for err in errors {
            assert_eq!(err.result_code(), ResultCode::ProtocolError);
        }
    }

    #[test]
    fn framing_vs_semantic() {
        assert!(DecodeError::LengthOverflow.is_framing());
        assert!(DecodeError::FrameOverrun { length: 9, remaining: 2 }.is_framing());
        assert!(!DecodeError::EmptyField("referrals").is_framing());
        assert!(!DecodeError::InvalidFilter("second root filter").is_framing());
    }

    #[test]
    fn display_names_the_tag() {
        let err = DecodeError::UnexpectedTag {
            state: State::MessageId,
            tag: 0xA7,
        };
        assert_eq!(err.to_string(), "unexpected tag 0xA7 in state MessageId");
    }
}

// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
