//! Error Types and Normalization
//!
//! Every fallible operation in this crate reports through the single
//! [`ErrorKind`] vocabulary below, so callers never need to know which codec
//! was in use. The [`IoResultExt`] boundary classifies raw `std::io` failures
//! into that vocabulary; no call site translates I/O errors ad hoc.

use derive_more::{Display, Error};
use std::io;

/// An open/read/write/close error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for stream operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure categories reported to callers.
///
/// These describe what the caller did or can do, never which codec library
/// produced the underlying failure.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The path cannot be accessed: missing file on read, missing parent
    /// directory on write or append, or any other OS-level I/O failure.
    #[display("cannot access file")]
    Access,
    /// The mode string is not one of `r`/`rb`/`rt`/`w`/`wb`/`wt`/`a`/`ab`/`at`.
    #[display("invalid open mode: {_0}")]
    InvalidMode(#[error(not(source))] String),
    /// The codec name is not recognized.
    #[display("unknown codec: {_0}")]
    UnknownCodec(#[error(not(source))] String),
    /// The codec is recognized but its backend is not compiled in.
    #[display("codec not available: {_0}")]
    UnavailableCodec(#[error(not(source))] String),
    /// Append was requested on a codec whose format cannot be appended to.
    #[display("{_0} streams cannot be opened for append")]
    AppendUnsupported(#[error(not(source))] String),
    /// The compressed payload ended before its format declared completion,
    /// or is otherwise corrupt. Don't retry with the same input.
    #[display("compressed stream is corrupt or truncated")]
    Truncated,
    /// Text-mode data is not valid UTF-8.
    #[display("stream is not valid UTF-8")]
    Utf8,
    /// The operation does not match the handle's open mode (reading a write
    /// handle, binary I/O on a text handle, and so on).
    #[display("operation does not match open mode")]
    ModeMismatch,
    /// The handle has already been closed (or fully consumed).
    #[display("handle is closed")]
    Closed,
}

impl ErrorKind {
    /// Returns `true` if retrying the whole open might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::Access)
    }
}

/// Classification boundary for raw I/O results.
///
/// `or_access` is for opening, writing, and closing, where every failure is
/// an access failure. `or_corrupt` is for reads on the decode side, where an
/// early end-of-stream or malformed payload must surface as [`Truncated`]
/// (the codec crates report those as `UnexpectedEof`/`InvalidData`/
/// `InvalidInput`) and anything else as [`Access`].
///
/// [`Truncated`]: ErrorKind::Truncated
/// [`Access`]: ErrorKind::Access
pub(crate) trait IoResultExt<T> {
    fn or_access(self) -> Result<T>;
    fn or_corrupt(self) -> Result<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn or_access(self) -> Result<T> {
        use exn::ResultExt;
        self.or_raise(|| ErrorKind::Access)
    }

    fn or_corrupt(self) -> Result<T> {
        use exn::ResultExt;
        match self {
            Ok(value) => Ok(value),
            Err(err) => match err.kind() {
                io::ErrorKind::UnexpectedEof
                | io::ErrorKind::InvalidData
                | io::ErrorKind::InvalidInput => Err(err).or_raise(|| ErrorKind::Truncated),
                _ => Err(err).or_raise(|| ErrorKind::Access),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_display() {
        assert_eq!(ErrorKind::Access.to_string(), "cannot access file");
        assert_eq!(
            ErrorKind::InvalidMode("rw".to_string()).to_string(),
            "invalid open mode: rw"
        );
        assert_eq!(
            ErrorKind::AppendUnsupported("bzip2".to_string()).to_string(),
            "bzip2 streams cannot be opened for append"
        );
        assert_eq!(
            ErrorKind::Truncated.to_string(),
            "compressed stream is corrupt or truncated"
        );
    }

    #[test]
    fn error_kind_retryable() {
        assert!(ErrorKind::Access.is_retryable());
        assert!(!ErrorKind::Truncated.is_retryable());
        assert!(!ErrorKind::Closed.is_retryable());
        assert!(!ErrorKind::AppendUnsupported("bzip2".to_string()).is_retryable());
    }

    #[test]
    fn access_from_not_found() {
        let result: io::Result<()> =
            Err(io::Error::new(io::ErrorKind::NotFound, "file not found"));
        let err = result.or_access().unwrap_err();
        // Exn<E> implements Deref<Target = E>
        assert_eq!(*err, ErrorKind::Access);
    }

    #[test]
    fn corrupt_from_early_eof() {
        for kind in [
            io::ErrorKind::UnexpectedEof,
            io::ErrorKind::InvalidData,
            io::ErrorKind::InvalidInput,
        ] {
            let result: io::Result<()> = Err(io::Error::new(kind, "truncated"));
            let err = result.or_corrupt().unwrap_err();
            assert_eq!(*err, ErrorKind::Truncated);
        }
    }

    #[test]
    fn corrupt_passes_other_kinds_as_access() {
        let result: io::Result<()> =
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        let err = result.or_corrupt().unwrap_err();
        assert_eq!(*err, ErrorKind::Access);
    }
}
