//! Member enumeration.
//!
//! Each adapter reads an archive from a forward-only byte stream and returns
//! the paths of its non-directory members in archive order. Content bytes are
//! skipped, never retained.

use std::cell::Cell;
use std::io::{self, Cursor, Read};
use std::rc::Rc;

use tracing::{debug, warn};

use crate::format::{ArchiveCodec, TarCompress};
use crate::{Error, Result};

/// List the members of the archive read from `reader`.
pub fn list_members<R: Read>(reader: R, codec: ArchiveCodec) -> Result<Vec<String>> {
    match codec {
        ArchiveCodec::Zip => list_zip_members(reader),
        ArchiveCodec::Tar(compress) => list_tar_members(reader, compress),
    }
}

/// Zip needs its central directory, found at the end of the file, so the
/// stream is collected into a seekable buffer first.
pub fn list_zip_members<R: Read>(mut reader: R) -> Result<Vec<String>> {
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;
    let mut archive = zip::ZipArchive::new(Cursor::new(buffer))?;

    let mut members = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let file = archive.by_index_raw(index)?;
        if !file.is_dir() {
            members.push(file.name().to_string());
        }
    }
    debug!(count = members.len(), "listed zip members");
    Ok(members)
}

/// List the regular files of a (possibly compressed) tar stream.
///
/// If the tar structure turns out to be malformed after at least one entry was
/// read, the entries read so far are returned instead of an error. Failures
/// of the decompressor or of the underlying stream are always propagated.
pub fn list_tar_members<R: Read>(reader: R, compress: TarCompress) -> Result<Vec<String>> {
    let source_fault = Rc::new(Cell::new(false));
    let decode_fault = Rc::new(Cell::new(false));
    let raw = FaultTracking {
        inner: reader,
        fault: Rc::clone(&source_fault),
    };
    let decoded = FaultTracking {
        inner: compress.decoder(raw)?,
        fault: Rc::clone(&decode_fault),
    };
    let mut archive = tar::Archive::new(decoded);
    let mut members = Vec::new();

    match scan_tar(&mut archive, &mut members) {
        Ok(()) => {
            debug!(count = members.len(), codec = compress.name(), "listed tar members");
            Ok(members)
        }
        Err(err) if source_fault.get() => Err(Error::Io(err)),
        Err(source) if decode_fault.get() => Err(Error::Decode {
            codec: compress.name(),
            source,
        }),
        Err(source) if members.is_empty() => Err(Error::Corrupted { source }),
        Err(err) => {
            warn!(
                count = members.len(),
                error = %err,
                "tar stream malformed, keeping entries read so far"
            );
            Ok(members)
        }
    }
}

fn scan_tar<R: Read>(archive: &mut tar::Archive<R>, members: &mut Vec<String>) -> io::Result<()> {
    for entry in archive.entries()? {
        let entry = entry?;
        let kind = entry.header().entry_type();
        if kind.is_file() || kind.is_contiguous() {
            members.push(String::from_utf8_lossy(&entry.path_bytes()).into_owned());
        }
    }
    Ok(())
}

/// Remembers whether the wrapped reader ever failed, so a tar error can be
/// told apart from a decoder or transport error surfacing through it.
struct FaultTracking<R> {
    inner: R,
    fault: Rc<Cell<bool>>,
}

impl<R: Read> Read for FaultTracking<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf).inspect_err(|_| self.fault.set(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tar_with(files: &[(&str, &[u8])]) -> Vec<u8> {
        let mut builder = tar::Builder::new(Vec::new());
        for (path, data) in files {
            let mut header = tar::Header::new_gnu();
            header.set_size(data.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder.append_data(&mut header, path, *data).unwrap();
        }
        builder.into_inner().unwrap()
    }

    #[test]
    fn directories_are_skipped() {
        let mut builder = tar::Builder::new(Vec::new());
        let mut dir = tar::Header::new_gnu();
        dir.set_entry_type(tar::EntryType::Directory);
        dir.set_size(0);
        dir.set_mode(0o755);
        dir.set_cksum();
        builder.append_data(&mut dir, "pkg/", io::empty()).unwrap();
        let mut file = tar::Header::new_gnu();
        file.set_size(3);
        file.set_mode(0o755);
        file.set_cksum();
        builder.append_data(&mut file, "pkg/bin", &b"abc"[..]).unwrap();
        let data = builder.into_inner().unwrap();

        let members = list_tar_members(Cursor::new(data), TarCompress::None).unwrap();
        assert_eq!(members, vec!["pkg/bin"]);
    }

    #[test]
    fn long_names_survive() {
        let long = format!("{}/file.txt", "nested".repeat(30));
        let data = tar_with(&[(&long, b"x")]);
        let members = list_tar_members(Cursor::new(data), TarCompress::None).unwrap();
        assert_eq!(members, vec![long]);
    }

    #[test]
    fn empty_stream_has_no_members() {
        let members = list_tar_members(io::empty(), TarCompress::None).unwrap();
        assert!(members.is_empty());
    }

    #[test]
    fn source_errors_are_not_salvaged() {
        struct Failing(Vec<u8>, bool);
        impl Read for Failing {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                if self.1 {
                    return Err(io::Error::other("connection reset"));
                }
                self.1 = true;
                let n = self.0.len().min(buf.len());
                buf[..n].copy_from_slice(&self.0[..n]);
                Ok(n)
            }
        }

        // The first read yields one header block, the next fails the way a
        // dropped connection would.
        let data = tar_with(&[("a", b"1"), ("b", b"2")]);
        let err = list_tar_members(Failing(data[..1024].to_vec(), false), TarCompress::None)
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)), "got {err:?}");
        assert!(!err.is_corrupt());
    }

    #[test]
    fn bad_gzip_is_a_decode_error() {
        let mut data = vec![0x1f, 0x8b, 0x08, 0x00, 0, 0, 0, 0, 0, 0xff];
        data.extend_from_slice(&[0xff; 64]);
        let err = list_tar_members(Cursor::new(data), TarCompress::Gzip).unwrap_err();
        assert!(
            matches!(err, Error::Decode { codec: "gzip", .. }),
            "got {err:?}"
        );
        assert!(err.is_corrupt());
    }
}
