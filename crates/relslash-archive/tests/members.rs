use std::io::{Cursor, Write};

use relslash_archive::{ArchiveCodec, Error, TarCompress, list_members};
use relslash_platform::ArchiveFormat;

const FILES: &[(&str, &[u8])] = &[
    ("protoc/bin/protoc", b"\x7fELF"),
    ("protoc/include/google/protobuf/any.proto", b"syntax = \"proto3\";"),
    ("protoc/readme.txt", b"Protocol Buffers"),
];

fn tar_archive(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    let mut dir = tar::Header::new_gnu();
    dir.set_entry_type(tar::EntryType::Directory);
    dir.set_size(0);
    dir.set_mode(0o755);
    dir.set_cksum();
    builder
        .append_data(&mut dir, "protoc/", std::io::empty())
        .unwrap();
    for (path, data) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, path, *data).unwrap();
    }
    builder.into_inner().unwrap()
}

fn zip_archive(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored);
    zip.add_directory("protoc/", options).unwrap();
    for (path, data) in files {
        zip.start_file(*path, options).unwrap();
        zip.write_all(data).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

fn expected() -> Vec<String> {
    FILES.iter().map(|(path, _)| path.to_string()).collect()
}

fn list(data: Vec<u8>, format: ArchiveFormat) -> Result<Vec<String>, Error> {
    let codec = ArchiveCodec::for_format(format).expect("format has members");
    list_members(Cursor::new(data), codec)
}

/// Deterministic bytes that deflate poorly.
fn noise(len: usize) -> Vec<u8> {
    let mut state: u32 = 0x2545_f491;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect()
}

#[test]
fn lists_plain_tar() {
    assert_eq!(list(tar_archive(FILES), ArchiveFormat::Tar).unwrap(), expected());
}

#[test]
fn lists_tar_gz() {
    let data = gzip(&tar_archive(FILES));
    assert_eq!(list(data, ArchiveFormat::TarGz).unwrap(), expected());
}

#[test]
fn lists_tar_xz() {
    let mut encoder = xz2::write::XzEncoder::new(Vec::new(), 6);
    encoder.write_all(&tar_archive(FILES)).unwrap();
    let data = encoder.finish().unwrap();
    assert_eq!(list(data, ArchiveFormat::TarXz).unwrap(), expected());
}

#[test]
fn lists_tar_zst() {
    let data = zstd::encode_all(&tar_archive(FILES)[..], 0).unwrap();
    assert_eq!(list(data, ArchiveFormat::TarZst).unwrap(), expected());
}

#[test]
fn lists_zip_in_central_directory_order() {
    assert_eq!(list(zip_archive(FILES), ArchiveFormat::Zip).unwrap(), expected());
}

#[test]
fn bare_compressed_files_have_no_adapter() {
    for format in [ArchiveFormat::Gz, ArchiveFormat::Xz, ArchiveFormat::Zst] {
        assert!(ArchiveCodec::for_format(format).is_none(), "{format}");
    }
}

#[test]
fn bad_checksum_after_entries_keeps_entries_read() {
    let mut data = tar_archive(FILES);
    // Blocks: dir header, then header + one data block per file. Break the
    // checksum of the third file's header.
    let third_header = 512 * (1 + 2 * 2);
    data[third_header + 148..third_header + 156].copy_from_slice(b"9999999\0");

    let members = list(data, ArchiveFormat::Tar).unwrap();
    assert_eq!(members, expected()[..2]);
}

#[test]
fn truncated_tar_keeps_entries_read() {
    let data = tar_archive(FILES);
    let cut = 512 * (1 + 2) + 100;
    let members = list(data[..cut].to_vec(), ArchiveFormat::Tar).unwrap();
    assert_eq!(members, expected()[..1]);
}

#[test]
fn corruption_before_first_entry_is_fatal() {
    let mut data = tar_archive(FILES);
    data[148..156].copy_from_slice(b"9999999\0");

    let err = list(data, ArchiveFormat::Tar).unwrap_err();
    assert!(matches!(err, Error::Corrupted { .. }), "got {err:?}");
    assert!(err.is_corrupt());
}

#[test]
fn decompressor_errors_are_not_salvaged() {
    let payload = noise(256 * 1024);
    let files: &[(&str, &[u8])] = &[("a.bin", &payload), ("b.bin", &payload)];
    let compressed = gzip(&tar_archive(files));
    let truncated = compressed[..compressed.len() * 3 / 4].to_vec();

    let err = list(truncated, ArchiveFormat::TarGz).unwrap_err();
    assert!(
        matches!(err, Error::Decode { codec: "gzip", .. }),
        "got {err:?}"
    );
    assert!(err.is_corrupt());
}

#[test]
fn garbage_xz_is_a_decode_error() {
    let err = list(noise(64), ArchiveFormat::TarXz).unwrap_err();
    assert!(matches!(err, Error::Decode { codec: "xz", .. }), "got {err:?}");
    assert!(err.is_corrupt());
}

#[test]
fn garbage_zip_is_corrupt() {
    let err = list(b"PK not really a zip".to_vec(), ArchiveFormat::Zip).unwrap_err();
    assert!(err.is_corrupt(), "got {err:?}");
}

#[test]
fn tar_compress_names() {
    assert_eq!(TarCompress::Xz.name(), "xz");
    assert_eq!(TarCompress::Zstd.name(), "zstd");
}
