//! Stream Factory
//!
//! Opens the raw file and layers the codec's transform over it. Readers come
//! back as [`BufRead`] so the handle can iterate newline-delimited units on
//! the decoded side; writers come back as [`Finish`] so closing a handle can
//! write the codec's end-of-stream framing and surface any failure instead
//! of swallowing it in a drop.

use crate::Codec;
use crate::error::{IoResultExt, Result};
use bzip2::{Compression as BzCompression, read::BzDecoder, write::BzEncoder};
use flate2::{Compression as GzCompression, read::MultiGzDecoder, write::GzEncoder};
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::Path;
#[cfg(feature = "xz")]
use xz2::{read::XzDecoder, write::XzEncoder};

// Use the highest compression level available for the formats; callers that
// find these levels too resource-intensive can override them per open via
// `Opener::level`.
const BZIP2_LEVEL: BzCompression = BzCompression::best();
const GZIP_LEVEL: GzCompression = GzCompression::best();
#[cfg(feature = "xz")]
const XZ_LEVEL: u32 = 9;

/// A writer that knows how to finalize its codec framing.
///
/// `finish` must be safe to call exactly once before the writer is dropped;
/// the encoder crates' own drop glue tolerates an already-finished stream.
pub(crate) trait Finish: Write {
    fn finish(&mut self) -> io::Result<()>;
}

impl Finish for File {
    fn finish(&mut self) -> io::Result<()> {
        self.flush()
    }
}

impl<W: Write> Finish for GzEncoder<W> {
    fn finish(&mut self) -> io::Result<()> {
        self.try_finish()
    }
}

impl<W: Write> Finish for BzEncoder<W> {
    fn finish(&mut self) -> io::Result<()> {
        self.try_finish()
    }
}

#[cfg(feature = "xz")]
impl<W: Write> Finish for XzEncoder<W> {
    fn finish(&mut self) -> io::Result<()> {
        self.try_finish()
    }
}

impl Codec {
    /// Open `path` for reading and layer this codec's decoder over it.
    ///
    /// Gzip and xz use their multi-member decoders so that files produced by
    /// repeated appends read back as one continuous stream. The decoded side
    /// is rebuffered for line iteration. Decoding is lazy: a corrupt payload
    /// does not fail here, it fails at the first read that observes it.
    pub(crate) fn open_reader(&self, path: &Path) -> Result<Box<dyn BufRead>> {
        let raw = BufReader::new(File::open(path).or_access()?);
        Ok(match self {
            Codec::None => Box::new(raw),
            Codec::Gzip => rebuffer(MultiGzDecoder::new(raw)),
            Codec::Bzip2 => rebuffer(BzDecoder::new(raw)),
            #[cfg(feature = "xz")]
            Codec::Xz => rebuffer(XzDecoder::new_multi_decoder(raw)),
            #[cfg(not(feature = "xz"))]
            Codec::Xz => exn::bail!(crate::error::ErrorKind::UnavailableCodec(
                self.as_str().to_string()
            )),
        })
    }

    /// Open `path` for writing (truncate-create) or appending (create if
    /// missing) and layer this codec's encoder over it.
    pub(crate) fn open_writer(
        &self,
        path: &Path,
        append: bool,
        level: Option<u32>,
    ) -> Result<Box<dyn Finish>> {
        let file = if append {
            OpenOptions::new().append(true).create(true).open(path).or_access()?
        } else {
            File::create(path).or_access()?
        };
        Ok(match self {
            Codec::None => Box::new(file),
            Codec::Gzip => {
                Box::new(GzEncoder::new(file, level.map(GzCompression::new).unwrap_or(GZIP_LEVEL)))
            },
            Codec::Bzip2 => {
                Box::new(BzEncoder::new(file, level.map(BzCompression::new).unwrap_or(BZIP2_LEVEL)))
            },
            #[cfg(feature = "xz")]
            Codec::Xz => Box::new(XzEncoder::new(file, level.unwrap_or(XZ_LEVEL))),
            #[cfg(not(feature = "xz"))]
            Codec::Xz => exn::bail!(crate::error::ErrorKind::UnavailableCodec(
                self.as_str().to_string()
            )),
        })
    }
}

fn rebuffer<'a, R: Read + 'a>(decoder: R) -> Box<dyn BufRead + 'a> {
    Box::new(BufReader::new(decoder))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Codec;
    use rstest::rstest;
    use std::io::Read;

    fn roundtrip(codec: Codec, payload: &[u8], append_twice: bool) -> Vec<u8> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(format!("data{}", codec.extension()));

        let mut writer = codec.open_writer(&path, false, None).unwrap();
        writer.write_all(payload).unwrap();
        writer.finish().unwrap();
        drop(writer);

        if append_twice {
            let mut writer = codec.open_writer(&path, true, None).unwrap();
            writer.write_all(payload).unwrap();
            writer.finish().unwrap();
            drop(writer);
        }

        let mut reader = codec.open_reader(&path).unwrap();
        let mut output = Vec::new();
        reader.read_to_end(&mut output).unwrap();
        output
    }

    #[rstest]
    #[case(Codec::None)]
    #[case(Codec::Gzip)]
    #[case(Codec::Bzip2)]
    #[cfg_attr(feature = "xz", case(Codec::Xz))]
    fn test_write_then_read(#[case] codec: Codec) {
        let payload = b"Hello, world! This is a test of layered streams.";
        assert_eq!(roundtrip(codec, payload, false), payload);
    }

    // Append produces a second stream member for compressed formats; the
    // multi-member decoders must read both back as one.
    #[rstest]
    #[case(Codec::None)]
    #[case(Codec::Gzip)]
    #[cfg_attr(feature = "xz", case(Codec::Xz))]
    fn test_append_reads_back_as_one_stream(#[case] codec: Codec) {
        let payload = b"segment";
        assert_eq!(roundtrip(codec, payload, true), b"segmentsegment");
    }

    #[rstest]
    #[case(Codec::None)]
    #[case(Codec::Gzip)]
    #[case(Codec::Bzip2)]
    #[cfg_attr(feature = "xz", case(Codec::Xz))]
    fn test_missing_file_fails_on_open(#[case] codec: Codec) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(format!("missing{}", codec.extension()));
        assert!(codec.open_reader(&path).is_err());
    }
}
