use std::fmt;
use thiserror::Error;

use super::DecodeError;
use crate::model::{OpKind, ResultCode};

// -----------------------------------------------------------------------------
// ----- ProtocolFailure -------------------------------------------------------

/// A decode failure plus what was known about the message when it failed,
/// enough for a server to answer with protocolError.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("message {}: {error}", display_id(.message_id))]
pub struct ProtocolFailure {
    #[source]
    pub error: DecodeError,
    pub message_id: Option<i32>,
    pub request: Option<OpKind>,
}

impl ProtocolFailure {
    pub fn new(error: DecodeError, message_id: Option<i32>, request: Option<OpKind>) -> Self {
        Self {
            error,
            message_id,
            request,
        }
    }

    #[inline]
    pub fn result_code(&self) -> ResultCode {
        self.error.result_code()
    }

    /// The response that answers the failed request, if it has one.
    pub fn response_kind(&self) -> Option<OpKind> {
        self.request.and_then(OpKind::response)
    }
}

fn display_id(id: &Option<i32>) -> String {
    match id {
        Some(id) => id.to_string(),
        None => "?".to_string(),
    }
}

// -----------------------------------------------------------------------------
// ----- DecodeWarning ---------------------------------------------------------

/// An anomaly the decoder tolerated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeWarning {
    /// The result code was not in the known set and was stored as `Other`.
    UnknownResultCode(i32),

    /// A matched DN was sent with a result code that does not carry one.
    MatchedDnIgnored {
        result_code: ResultCode,
        matched_dn: String,
    },

    /// A text attribute value was not UTF-8 and was kept as raw bytes.
    NonUtf8Value { attribute: String },
}

impl fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeWarning::UnknownResultCode(code) => {
                write!(f, "unknown result code {code}, stored as other")
            }
            DecodeWarning::MatchedDnIgnored {
                result_code,
                matched_dn,
            } => write!(f, "matched DN '{matched_dn}' ignored for {result_code}"),
            DecodeWarning::NonUtf8Value { attribute } => {
                write!(f, "value of '{attribute}' is not UTF-8, kept as binary")
            }
        }
    }
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
