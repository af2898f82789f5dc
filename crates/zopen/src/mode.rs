//! Open-Mode Parsing
//!
//! The caller-supplied mode string is parsed exactly once into a normalized
//! ([`Operation`], [`Encoding`]) pair; everything downstream branches on the
//! pair, never on the string.

use crate::error::{Error, ErrorKind, Result};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// What the handle will be used for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Read,
    /// Truncate-create
    Write,
    /// Create if missing, write at end
    Append,
}

/// How payloads are exchanged with the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// UTF-8 text, the default when the mode string has no flag
    Text,
    /// Raw bytes
    Binary,
}

/// A normalized open mode.
///
/// Parsed from one of `r`, `rb`, `rt`, `w`, `wb`, `wt`, `a`, `ab`, `at`;
/// any other string is an [`InvalidMode`](ErrorKind::InvalidMode) error
/// before any I/O is attempted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Mode {
    pub operation: Operation,
    pub encoding: Encoding,
}

impl FromStr for Mode {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        let (operation, encoding) = match s {
            "r" | "rt" => (Operation::Read, Encoding::Text),
            "rb" => (Operation::Read, Encoding::Binary),
            "w" | "wt" => (Operation::Write, Encoding::Text),
            "wb" => (Operation::Write, Encoding::Binary),
            "a" | "at" => (Operation::Append, Encoding::Text),
            "ab" => (Operation::Append, Encoding::Binary),
            _ => exn::bail!(ErrorKind::InvalidMode(s.to_string())),
        };
        Ok(Mode { operation, encoding })
    }
}

impl Mode {
    /// The canonical two-character form of this mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match (self.operation, self.encoding) {
            (Operation::Read, Encoding::Text) => "rt",
            (Operation::Read, Encoding::Binary) => "rb",
            (Operation::Write, Encoding::Text) => "wt",
            (Operation::Write, Encoding::Binary) => "wb",
            (Operation::Append, Encoding::Text) => "at",
            (Operation::Append, Encoding::Binary) => "ab",
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}
