//! Error infrastructure for park-core.
//!
//! Game outcomes (a refused fee change, a full ride table) are never Rust
//! errors: they travel as [`ActionResult`](crate::action::ActionResult)
//! values. The types here cover the plumbing around actions: decoding wire
//! bytes, resolving packet envelopes and handing packets to transports.

use crate::action::ActionType;

/// Severity level of an error, used by callers to pick a recovery strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Retry may succeed (transport hiccup, full queue).
    Recoverable,

    /// Input from a peer or file is invalid; drop it.
    Validation,

    /// Peers disagree on the protocol; the connection should be dropped.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for park-core plumbing errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier of the variant, for logs and tests.
    fn error_code(&self) -> &'static str;
}

/// Failure while reading or writing a [`DataSerialiser`](crate::stream::DataSerialiser).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StreamError {
    #[error("unexpected end of stream: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("{0} trailing bytes after the last field")]
    TrailingBytes(usize),

    #[error("string of {0} bytes exceeds the u16 length prefix")]
    StringTooLong(usize),

    #[error("string field is not valid UTF-8")]
    InvalidUtf8,

    #[error("invalid boolean byte {0:#04x}")]
    InvalidBool(u8),

    #[error("unknown error kind code {0}")]
    InvalidErrorKind(u16),
}

impl GameError for StreamError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::StringTooLong(_) => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnexpectedEof { .. } => "STREAM_UNEXPECTED_EOF",
            Self::TrailingBytes(_) => "STREAM_TRAILING_BYTES",
            Self::StringTooLong(_) => "STREAM_STRING_TOO_LONG",
            Self::InvalidUtf8 => "STREAM_INVALID_UTF8",
            Self::InvalidBool(_) => "STREAM_INVALID_BOOL",
            Self::InvalidErrorKind(_) => "STREAM_INVALID_ERROR_KIND",
        }
    }
}

/// Failure turning a packet into an [`Action`](crate::action::Action).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// The peer speaks a protocol version with action types we never registered.
    #[error("unknown action type {0}")]
    UnknownActionType(ActionType),

    #[error("malformed packet for action type {action_type}: {source}")]
    Malformed {
        action_type: ActionType,
        #[source]
        source: StreamError,
    },

    #[error("packet shorter than its {0}-byte type header")]
    MissingHeader(usize),
}

impl GameError for ProtocolError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownActionType(_) => ErrorSeverity::Fatal,
            Self::Malformed { .. } | Self::MissingHeader(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownActionType(_) => "PROTOCOL_UNKNOWN_ACTION_TYPE",
            Self::Malformed { .. } => "PROTOCOL_MALFORMED",
            Self::MissingHeader(_) => "PROTOCOL_MISSING_HEADER",
        }
    }
}

/// A transport or journal refused a packet.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SinkError {
    #[error("sink is closed")]
    Closed,

    #[error("sink rejected packet: {0}")]
    Rejected(String),
}

impl GameError for SinkError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Closed => ErrorSeverity::Fatal,
            Self::Rejected(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Closed => "SINK_CLOSED",
            Self::Rejected(_) => "SINK_REJECTED",
        }
    }
}
