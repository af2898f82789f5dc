//! Transparent reading and writing of (possibly) compressed files.
//!
//! This crate provides a single entry point, [`open()`], that opens a path for
//! reading, writing, or appending and picks a compression codec from the
//! file's extension, returning a uniform [`Handle`] either way:
//!
//! - **Codec resolution** from file extensions ([`Codec::from_path`]) or
//!   names ([`Codec::from_str`](std::str::FromStr))
//! - **Layered streams** — the raw file wrapped in the codec's transform,
//!   with an optional UTF-8 text layer on top
//! - **Uniform failures** — missing files, unsupported operations, and
//!   corrupt or truncated payloads surface as the same
//!   [`ErrorKind`](error::ErrorKind) vocabulary regardless of codec
//! - **Scoped release** — [`Handle::close`] is idempotent, and dropping an
//!   open handle closes it on every exit path
//!
//! Gzip and Bzip2 are always available. XZ/LZMA sits behind the `xz` feature
//! flag; opening an `.xz` path without it is rejected at open time rather
//! than silently falling back to an uncompressed read.
//!
//! All I/O is synchronous and blocking. A handle is exclusively owned by one
//! caller; there is no internal locking.

mod construct;
pub mod error;
mod handle;
mod mode;
mod open;
mod stream;
mod util;

pub use crate::handle::{ByteLines, Handle, Lines};
pub use crate::mode::{Encoding, Mode, Operation};
pub use crate::open::{Opener, open};
pub use crate::util::Capabilities;

/// A supported compression codec.
///
/// Resolved once, at open time, from the path's extension and fixed for the
/// lifetime of a handle. The [`Xz`](Self::Xz) variant is always part of the
/// enum so that resolution stays a pure function of the path; whether the
/// liblzma backend is actually compiled in is controlled by the `xz` cargo
/// feature and checked separately at open time. Defaults to
/// [`None`](Self::None) (uncompressed).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Codec {
    /// Uncompressed
    #[default]
    None,
    /// Gzip compression (.gz)
    Gzip,
    /// Bzip2 compression (.bz2)
    Bzip2,
    /// XZ/LZMA compression (.xz), backend gated behind the `xz` feature
    Xz,
}

#[cfg(test)]
mod tests {
    use crate::Codec;

    #[test]
    fn codec_default() {
        assert_eq!(Codec::default(), Codec::None);
    }
}
