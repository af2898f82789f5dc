//! Handle Proxy
//!
//! [`Handle`] is the caller-facing object for an open, possibly
//! codec-layered stream. It owns the layered stream exclusively and walks a
//! one-way state machine: open for reading or writing, then closed. Nothing
//! transitions out of the closed state; a fully consumed handle must be
//! reopened to iterate again.

use crate::Codec;
use crate::error::{ErrorKind, IoResultExt, Result};
use crate::mode::{Encoding, Mode};
use crate::stream::Finish;
use exn::ResultExt;
use std::fmt;
use std::io::{BufRead, Read, Write};
use std::mem;
use std::path::{Path, PathBuf};

pub(crate) enum State {
    Read(Box<dyn BufRead>),
    Write(Box<dyn Finish>),
    Closed,
}

/// An open stream over a possibly compressed file.
///
/// Obtained from [`open`](crate::open()) or [`Opener::open`](crate::Opener).
/// Text-mode handles exchange UTF-8 strings, binary-mode handles raw bytes;
/// supplying the wrong kind is a [`ModeMismatch`](ErrorKind::ModeMismatch).
///
/// Dropping the handle closes it, so a handle scoped to a block is released
/// on every exit path. Prefer an explicit [`close`](Self::close) for write
/// handles: it surfaces the error if the codec's end-of-stream framing
/// cannot be written, where drop can only log it.
pub struct Handle {
    path: PathBuf,
    codec: Codec,
    mode: Mode,
    state: State,
}

impl Handle {
    pub(crate) fn new(path: PathBuf, codec: Codec, mode: Mode, state: State) -> Self {
        Self { path, codec, mode, state }
    }

    /// The codec resolved for this handle at open time.
    pub fn codec(&self) -> Codec {
        self.codec
    }

    /// The normalized mode this handle was opened with.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The path this handle was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether this handle has been closed (explicitly, by drop, or by
    /// consuming the stream to exhaustion).
    pub fn is_closed(&self) -> bool {
        matches!(self.state, State::Closed)
    }

    /// Release the layered stream.
    ///
    /// Idempotent: closing an already-closed handle is a no-op. On write
    /// handles this flushes buffered data and writes the codec's
    /// end-of-stream framing; a failure there is reported, not swallowed.
    pub fn close(&mut self) -> Result<()> {
        match mem::replace(&mut self.state, State::Closed) {
            State::Closed => Ok(()),
            State::Read(reader) => {
                drop(reader);
                Ok(())
            },
            State::Write(mut writer) => writer.finish().or_access(),
        }
    }

    /// Read the next line from a text-mode handle.
    ///
    /// The terminating newline is kept. Returns `Ok(None)` at exhaustion,
    /// which also closes the handle.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        match self.next_unit(Encoding::Text)? {
            Some(bytes) => {
                let line = String::from_utf8(bytes).or_raise(|| ErrorKind::Utf8)?;
                Ok(Some(line))
            },
            None => Ok(None),
        }
    }

    /// Read the next newline-delimited chunk from a binary-mode handle.
    ///
    /// Returns `Ok(None)` at exhaustion, which also closes the handle.
    pub fn read_chunk(&mut self) -> Result<Option<Vec<u8>>> {
        self.next_unit(Encoding::Binary)
    }

    /// Lazily iterate the remaining lines of a text-mode handle.
    ///
    /// The sequence is finite and not restartable: once it ends, the handle
    /// is closed and must be reopened to iterate again.
    pub fn lines(&mut self) -> Lines<'_> {
        Lines { handle: self }
    }

    /// Lazily iterate the remaining newline-delimited chunks of a
    /// binary-mode handle.
    pub fn byte_lines(&mut self) -> ByteLines<'_> {
        ByteLines { handle: self }
    }

    /// Eagerly read the remainder of a text-mode handle, then close it.
    pub fn read_to_string(&mut self) -> Result<String> {
        let bytes = self.drain(Encoding::Text)?;
        String::from_utf8(bytes).or_raise(|| ErrorKind::Utf8)
    }

    /// Eagerly read the remainder of a binary-mode handle, then close it.
    pub fn read_to_end(&mut self) -> Result<Vec<u8>> {
        self.drain(Encoding::Binary)
    }

    /// Write a string to a text-mode handle.
    pub fn write_str(&mut self, data: &str) -> Result<()> {
        self.writer(Encoding::Text)?.write_all(data.as_bytes()).or_access()
    }

    /// Write raw bytes to a binary-mode handle.
    pub fn write(&mut self, data: &[u8]) -> Result<()> {
        self.writer(Encoding::Binary)?.write_all(data).or_access()
    }

    fn next_unit(&mut self, wanted: Encoding) -> Result<Option<Vec<u8>>> {
        let mut buffer = Vec::new();
        let n = self.reader(wanted)?.read_until(b'\n', &mut buffer).or_corrupt()?;
        if n == 0 {
            // Exhausted. Release the stream; the sequence is not restartable.
            self.state = State::Closed;
            return Ok(None);
        }
        Ok(Some(buffer))
    }

    fn drain(&mut self, wanted: Encoding) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.reader(wanted)?.read_to_end(&mut buffer).or_corrupt()?;
        self.state = State::Closed;
        Ok(buffer)
    }

    fn reader(&mut self, wanted: Encoding) -> Result<&mut dyn BufRead> {
        if self.is_closed() {
            exn::bail!(ErrorKind::Closed);
        }
        if self.mode.encoding != wanted {
            exn::bail!(ErrorKind::ModeMismatch);
        }
        match &mut self.state {
            State::Read(reader) => Ok(reader.as_mut()),
            _ => exn::bail!(ErrorKind::ModeMismatch),
        }
    }

    fn writer(&mut self, wanted: Encoding) -> Result<&mut dyn Finish> {
        if self.is_closed() {
            exn::bail!(ErrorKind::Closed);
        }
        if self.mode.encoding != wanted {
            exn::bail!(ErrorKind::ModeMismatch);
        }
        match &mut self.state {
            State::Write(writer) => Ok(writer.as_mut()),
            _ => exn::bail!(ErrorKind::ModeMismatch),
        }
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        if !self.is_closed() && self.close().is_err() {
            tracing::warn!(
                path = %self.path.display(),
                codec = %self.codec,
                "failed to finalize stream while dropping handle"
            );
        }
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("path", &self.path)
            .field("codec", &self.codec)
            .field("mode", &self.mode)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

/// Lazy line iterator for a text-mode [`Handle`], from [`Handle::lines`].
pub struct Lines<'a> {
    handle: &'a mut Handle,
}

impl Iterator for Lines<'_> {
    type Item = Result<String>;
    fn next(&mut self) -> Option<Self::Item> {
        self.handle.read_line().transpose()
    }
}

/// Lazy chunk iterator for a binary-mode [`Handle`], from
/// [`Handle::byte_lines`].
pub struct ByteLines<'a> {
    handle: &'a mut Handle,
}

impl Iterator for ByteLines<'_> {
    type Item = Result<Vec<u8>>;
    fn next(&mut self) -> Option<Self::Item> {
        self.handle.read_chunk().transpose()
    }
}
