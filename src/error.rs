//! Contains the Error and Result type used by every codec in the crate.

use std::fmt::Display;

/// An error from encoding or decoding NBT data, in any of its
/// representations.
///
/// Use [`kind`][`Error::kind`] to tell which layer rejected the input, and
/// [`offset`][`Error::offset`] for the position of an SNBT syntax error.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    msg: String,
    kind: ErrorKind,
}

/// The category of an [`Error`].
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// SNBT text violated the grammar. Carries the byte offset of the
    /// violation. The parser never recovers; the first violation aborts the
    /// whole document.
    Syntax { offset: usize },

    /// Input nests containers deeper than the configured limit. Raised by
    /// both the SNBT parser and the binary reader, instead of letting
    /// adversarial input exhaust the call stack.
    DepthExceeded,

    /// The binary reader rejected the bytes.
    MalformedBinary,

    /// The base64 decode rejected the text before the binary reader ever
    /// saw it.
    InvalidBase64,

    /// The hex decode rejected the text, either for odd length or for a
    /// character outside `[0-9a-fA-F]`.
    InvalidHex,

    /// The binary writer was handed a value the wire format cannot express,
    /// such as a heterogeneous list. This is a fault in the data the caller
    /// built, not in any input being decoded.
    InvariantViolation,
}

/// Convenience type for Result.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get the kind of error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Byte offset of a syntax error, `None` for every other kind.
    pub fn offset(&self) -> Option<usize> {
        match self.kind {
            ErrorKind::Syntax { offset } => Some(offset),
            _ => None,
        }
    }

    pub(crate) fn syntax(msg: impl Display, offset: usize) -> Error {
        Error {
            msg: format!("{} at offset {}", msg, offset),
            kind: ErrorKind::Syntax { offset },
        }
    }

    pub(crate) fn depth_exceeded(limit: usize) -> Error {
        Error {
            msg: format!("nesting deeper than the limit of {}", limit),
            kind: ErrorKind::DepthExceeded,
        }
    }

    pub(crate) fn malformed(msg: impl Into<String>) -> Error {
        Error {
            msg: msg.into(),
            kind: ErrorKind::MalformedBinary,
        }
    }

    pub(crate) fn invariant(msg: impl Into<String>) -> Error {
        Error {
            msg: msg.into(),
            kind: ErrorKind::InvariantViolation,
        }
    }

    pub(crate) fn invalid_base64(e: base64::DecodeError) -> Error {
        Error {
            msg: format!("invalid base64: {}", e),
            kind: ErrorKind::InvalidBase64,
        }
    }

    pub(crate) fn invalid_hex(e: hex::FromHexError, len: usize) -> Error {
        let msg = match e {
            hex::FromHexError::OddLength => {
                format!("invalid hex: odd input length: {}", len)
            }
            other => format!("invalid hex: {}", other),
        };
        Error {
            msg,
            kind: ErrorKind::InvalidHex,
        }
    }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.msg)
    }
}

// Readers work over in-memory slices, so the only io error that reaches us
// is running out of input. Writers target Vec<u8> and cannot fail.
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::UnexpectedEof => {
                Error::malformed("eof: unexpectedly ran out of input")
            }
            _ => Error::malformed(format!("io error: {}", e)),
        }
    }
}
