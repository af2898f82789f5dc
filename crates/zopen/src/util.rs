use crate::Codec;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// The static capability set of a codec: which open operations its on-disk
/// format supports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    pub read: bool,
    pub write: bool,
    pub append: bool,
}

impl Display for Codec {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl AsRef<str> for Codec {
    fn as_ref(&self) -> &'static str {
        self.as_str()
    }
}

impl Codec {
    /// Returns the file extension for this codec.
    #[inline]
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Codec::None => "",
            Codec::Gzip => ".gz",
            Codec::Bzip2 => ".bz2",
            Codec::Xz => ".xz",
        }
    }

    /// Returns the short name for configuration (for displaying to user)
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Codec::None => "none",
            Codec::Gzip => "gzip",
            Codec::Bzip2 => "bzip2",
            Codec::Xz => "xz",
        }
    }

    /// The operations this codec's format supports.
    ///
    /// Bzip2 is the only format that cannot be appended to: its framing does
    /// not allow a second stream to be tacked onto an existing file and read
    /// back as one. Gzip and xz are multi-member formats, and plain files
    /// append trivially.
    #[must_use]
    pub const fn capabilities(&self) -> Capabilities {
        match self {
            Codec::Bzip2 => Capabilities { read: true, write: true, append: false },
            _ => Capabilities { read: true, write: true, append: true },
        }
    }
}
