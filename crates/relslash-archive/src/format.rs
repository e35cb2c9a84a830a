#[cfg(feature = "zstd")]
use std::io::BufReader;
use std::io::Read;

use relslash_platform::ArchiveFormat;

use crate::Error;

/// How the members of an archive format are enumerated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArchiveCodec {
    Zip,
    Tar(TarCompress),
}

/// Compression codec wrapped around a tar stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TarCompress {
    None,
    Gzip,
    Xz,
    Zstd,
}

impl ArchiveCodec {
    /// Adapter for `format`, or `None` for bare compressed files.
    pub fn for_format(format: ArchiveFormat) -> Option<Self> {
        match format {
            ArchiveFormat::Zip => Some(Self::Zip),
            ArchiveFormat::Tar => Some(Self::Tar(TarCompress::None)),
            ArchiveFormat::TarGz => Some(Self::Tar(TarCompress::Gzip)),
            ArchiveFormat::TarXz => Some(Self::Tar(TarCompress::Xz)),
            ArchiveFormat::TarZst => Some(Self::Tar(TarCompress::Zstd)),
            ArchiveFormat::Gz | ArchiveFormat::Xz | ArchiveFormat::Zst => None,
        }
    }

    /// The xz decoder must never run twice at once; callers route it through
    /// a single-flight gate.
    pub fn requires_serial_decode(self) -> bool {
        matches!(self, Self::Tar(TarCompress::Xz))
    }
}

impl TarCompress {
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Gzip => "gzip",
            Self::Xz => "xz",
            Self::Zstd => "zstd",
        }
    }

    /// Create a decoder for this compression codec.
    pub fn decoder<R: Read>(self, reader: R) -> Result<Decoder<R>, Error> {
        match self {
            Self::None => Ok(Decoder::Plain(reader)),
            Self::Gzip => Ok(Decoder::Gzip(Box::new(flate2::read::GzDecoder::new(
                reader,
            )))),
            #[cfg(feature = "xz")]
            Self::Xz => Ok(Decoder::Xz(Box::new(xz2::read::XzDecoder::new(reader)))),
            #[cfg(feature = "zstd")]
            Self::Zstd => Ok(Decoder::Zstd(Box::new(zstd::stream::read::Decoder::new(
                reader,
            )?))),
            #[allow(unreachable_patterns)]
            other => Err(Error::CodecDisabled { codec: other.name() }),
        }
    }
}

/// Reader yielding the uncompressed tar bytes of one codec.
pub enum Decoder<R: Read> {
    Plain(R),
    Gzip(Box<flate2::read::GzDecoder<R>>),
    #[cfg(feature = "xz")]
    Xz(Box<xz2::read::XzDecoder<R>>),
    #[cfg(feature = "zstd")]
    Zstd(Box<zstd::stream::read::Decoder<'static, BufReader<R>>>),
}

impl<R: Read> Read for Decoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            Self::Plain(r) => r.read(buf),
            Self::Gzip(d) => d.read(buf),
            #[cfg(feature = "xz")]
            Self::Xz(d) => d.read(buf),
            #[cfg(feature = "zstd")]
            Self::Zstd(d) => d.read(buf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn codec_for_every_format() {
        assert_eq!(ArchiveCodec::for_format(ArchiveFormat::Zip), Some(ArchiveCodec::Zip));
        assert_eq!(
            ArchiveCodec::for_format(ArchiveFormat::TarZst),
            Some(ArchiveCodec::Tar(TarCompress::Zstd))
        );
        for bare in [ArchiveFormat::Gz, ArchiveFormat::Xz, ArchiveFormat::Zst] {
            assert_eq!(ArchiveCodec::for_format(bare), None);
        }
    }

    #[test]
    fn only_xz_is_serialized() {
        let serialized: Vec<_> = [
            ArchiveCodec::Zip,
            ArchiveCodec::Tar(TarCompress::None),
            ArchiveCodec::Tar(TarCompress::Gzip),
            ArchiveCodec::Tar(TarCompress::Xz),
            ArchiveCodec::Tar(TarCompress::Zstd),
        ]
        .into_iter()
        .filter(|c| c.requires_serial_decode())
        .collect();
        assert_eq!(serialized, vec![ArchiveCodec::Tar(TarCompress::Xz)]);
    }

    fn decode(compress: TarCompress, data: Vec<u8>) -> Vec<u8> {
        let mut out = Vec::new();
        compress
            .decoder(Cursor::new(data))
            .unwrap()
            .read_to_end(&mut out)
            .unwrap();
        out
    }

    #[cfg(feature = "xz")]
    #[test]
    fn xz_decoder_inflates_a_block() {
        use std::io::Write;

        let block = vec![0u8; 10 * 512];
        let mut encoder = xz2::write::XzEncoder::new(Vec::new(), 6);
        encoder.write_all(&block).unwrap();
        let compressed = encoder.finish().unwrap();
        assert!(compressed.len() < block.len());

        assert_eq!(decode(TarCompress::Xz, compressed), block);
    }

    #[cfg(feature = "zstd")]
    #[test]
    fn zstd_decoder_handles_concatenated_frames() {
        let mut compressed = zstd::encode_all(&b"ustar "[..], 3).unwrap();
        compressed.extend(zstd::encode_all(&b"entry"[..], 3).unwrap());
        assert_eq!(decode(TarCompress::Zstd, compressed), b"ustar entry");
    }

    #[cfg(feature = "zstd")]
    #[test]
    fn zstd_rejects_foreign_magic() {
        let mut out = Vec::new();
        let gzip_magic = vec![0x1f, 0x8b, 0x08, 0x00];
        let mut decoder = TarCompress::Zstd.decoder(Cursor::new(gzip_magic)).unwrap();
        assert!(decoder.read_to_end(&mut out).is_err());
        assert!(out.is_empty());
    }
}
