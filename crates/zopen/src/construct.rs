use crate::Codec;
use crate::error::{Error, ErrorKind, Result};
use std::{path::Path, str::FromStr};

impl FromStr for Codec {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Codec::None),
            "gz" | "gzip" => Ok(Codec::Gzip),
            "bz2" | "bzip2" => Ok(Codec::Bzip2),
            "xz" | "lzma" => Ok(Codec::Xz),
            _ => exn::bail!(ErrorKind::UnknownCodec(s.to_string())),
        }
    }
}

impl Codec {
    /// Resolve the codec from a file extension.
    ///
    /// Pure and infallible: an unrecognized or absent extension means the
    /// path is treated as a plain uncompressed file. The suffix match is
    /// case-sensitive (`.GZ` is not gzip).
    #[must_use]
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| match ext {
                "gz" => Codec::Gzip,
                "bz2" => Codec::Bzip2,
                "xz" => Codec::Xz,
                _ => Codec::None,
            })
            .unwrap_or(Codec::None)
    }

    /// Check that this codec's backend is compiled into the crate.
    ///
    /// Always succeeds except for [`Codec::Xz`] when the `xz` feature is
    /// disabled: an `.xz` path is then rejected here, before any I/O, rather
    /// than silently read as uncompressed bytes.
    pub fn ensure_available(&self) -> Result<()> {
        #[cfg(not(feature = "xz"))]
        if matches!(self, Codec::Xz) {
            exn::bail!(ErrorKind::UnavailableCodec(self.as_str().to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::Codec;
    use rstest::rstest;

    #[rstest]
    #[case("none", Codec::None)]
    #[case("gz", Codec::Gzip)]
    #[case("gzip", Codec::Gzip)]
    #[case("GZIP", Codec::Gzip)]
    #[case("bz2", Codec::Bzip2)]
    #[case("bzip2", Codec::Bzip2)]
    #[case("xz", Codec::Xz)]
    #[case("lzma", Codec::Xz)]
    fn test_from_str(#[case] test: &str, #[case] expected: Codec) {
        assert_eq!(test.parse::<Codec>().unwrap(), expected);
    }

    #[rstest]
    #[case("invalid")]
    #[case("definitely not valid")]
    #[case(" ")]
    fn test_from_str_invalid(#[case] test: &str) {
        assert!(test.parse::<Codec>().is_err());
    }

    #[rstest]
    #[case("file.txt", Codec::None)]
    #[case("file", Codec::None)]
    // `.gz` is a dotfile with no extension (like `.bashrc`), and therefore
    // with no extension is considered to have no compression.
    #[case(".gz", Codec::None)]
    #[case("file.gz", Codec::Gzip)]
    #[case("file.txt.gz", Codec::Gzip)]
    #[case("file.bz2", Codec::Bzip2)]
    #[case("file.txt.bz2", Codec::Bzip2)]
    #[case("file.xz", Codec::Xz)]
    #[case("file.txt.xz", Codec::Xz)]
    // Suffix matching is case-sensitive.
    #[case("file.GZ", Codec::None)]
    #[case("file.Bz2", Codec::None)]
    fn test_from_path(#[case] test: &str, #[case] expected: Codec) {
        assert_eq!(Codec::from_path(test), expected);
    }

    #[test]
    fn test_availability() {
        assert!(Codec::None.ensure_available().is_ok());
        assert!(Codec::Gzip.ensure_available().is_ok());
        assert!(Codec::Bzip2.ensure_available().is_ok());
        #[cfg(feature = "xz")]
        assert!(Codec::Xz.ensure_available().is_ok());
        #[cfg(not(feature = "xz"))]
        assert!(Codec::Xz.ensure_available().is_err());
    }
}
