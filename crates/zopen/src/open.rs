//! Opening Streams
//!
//! The single entry point of the crate: resolve the codec from the path,
//! validate the mode against the codec's capabilities before touching the
//! filesystem, then have the stream factory build the layered handle.

use crate::Codec;
use crate::error::{ErrorKind, Result};
use crate::handle::{Handle, State};
use crate::mode::{Mode, Operation};
use std::path::Path;
use tracing::instrument;

/// Per-open configuration.
///
/// The default configuration resolves the codec from the path suffix and
/// uses each codec's default compression level; [`codec`](Self::codec) and
/// [`level`](Self::level) override those.
///
/// # Examples
///
/// ```no_run
/// use zopen::{Codec, Opener};
///
/// // A gzip stream stored under a name without the `.gz` suffix.
/// let mut handle = Opener::new()
///     .codec(Codec::Gzip)
///     .level(1)
///     .open("archive.part", "wb")
///     .unwrap();
/// handle.write(b"payload").unwrap();
/// handle.close().unwrap();
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Opener {
    codec: Option<Codec>,
    level: Option<u32>,
}

impl Opener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use this codec instead of resolving one from the path suffix.
    #[must_use]
    pub fn codec(mut self, codec: Codec) -> Self {
        self.codec = Some(codec);
        self
    }

    /// Compression level for write and append, on the codec's own scale.
    #[must_use]
    pub fn level(mut self, level: u32) -> Self {
        self.level = Some(level);
        self
    }

    /// Open `path` in the given mode.
    ///
    /// `mode` is one of `r`, `rb`, `rt`, `w`, `wb`, `wt`, `a`, `ab`, `at`
    /// (text assumed when no flag). Mode and codec are validated before any
    /// I/O: append against a codec without append support and `.xz` without
    /// the `xz` feature are rejected here, with nothing touched on disk.
    #[instrument(
        skip(self, path),
        fields(path = %path.as_ref().display(), mode = mode, codec = tracing::field::Empty),
    )]
    pub fn open(&self, path: impl AsRef<Path>, mode: &str) -> Result<Handle> {
        let path = path.as_ref();
        let mode: Mode = mode.parse()?;
        let codec = self.codec.unwrap_or_else(|| Codec::from_path(path));
        tracing::Span::current().record("codec", codec.as_str());

        codec.ensure_available()?;
        if mode.operation == Operation::Append && !codec.capabilities().append {
            exn::bail!(ErrorKind::AppendUnsupported(codec.as_str().to_string()));
        }

        let state = match mode.operation {
            Operation::Read => State::Read(codec.open_reader(path)?),
            operation => {
                State::Write(codec.open_writer(path, operation == Operation::Append, self.level)?)
            },
        };
        Ok(Handle::new(path.to_path_buf(), codec, mode, state))
    }
}

/// Open `path` with the codec resolved from its extension.
///
/// Convenience for [`Opener::new().open(path, mode)`](Opener::open).
///
/// # Examples
///
/// ```no_run
/// let mut handle = zopen::open("notes.txt.gz", "rt").unwrap();
/// for line in handle.lines() {
///     println!("{}", line.unwrap());
/// }
/// ```
pub fn open(path: impl AsRef<Path>, mode: &str) -> Result<Handle> {
    Opener::new().open(path, mode)
}
