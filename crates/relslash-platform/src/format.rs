//! Archive format suffixes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Compression/archive format of a release asset, named by its file suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArchiveFormat {
    #[serde(rename = "tar.gz")]
    TarGz,
    #[serde(rename = "tar.xz")]
    TarXz,
    #[serde(rename = "tar.zst")]
    TarZst,
    #[serde(rename = "tar")]
    Tar,
    #[serde(rename = "zip")]
    Zip,
    #[serde(rename = "gz")]
    Gz,
    #[serde(rename = "xz")]
    Xz,
    #[serde(rename = "zst")]
    Zst,
}

/// Suffix table, longest suffixes first so that `tar.gz` wins over `gz`.
pub const ARCHIVE_FORMATS: &[(&str, ArchiveFormat)] = &[
    ("tar.gz", ArchiveFormat::TarGz),
    ("tar.xz", ArchiveFormat::TarXz),
    ("tar.zst", ArchiveFormat::TarZst),
    ("tar", ArchiveFormat::Tar),
    ("zip", ArchiveFormat::Zip),
    ("gz", ArchiveFormat::Gz),
    ("xz", ArchiveFormat::Xz),
    ("zst", ArchiveFormat::Zst),
];

impl ArchiveFormat {
    /// Suffix without the leading dot.
    pub fn suffix(self) -> &'static str {
        match self {
            ArchiveFormat::TarGz => "tar.gz",
            ArchiveFormat::TarXz => "tar.xz",
            ArchiveFormat::TarZst => "tar.zst",
            ArchiveFormat::Tar => "tar",
            ArchiveFormat::Zip => "zip",
            ArchiveFormat::Gz => "gz",
            ArchiveFormat::Xz => "xz",
            ArchiveFormat::Zst => "zst",
        }
    }

    /// Resolve a suffix (no leading dot), ignoring case.
    pub fn from_suffix(token: &str) -> Option<ArchiveFormat> {
        ARCHIVE_FORMATS
            .iter()
            .find(|(suffix, _)| suffix.eq_ignore_ascii_case(token))
            .map(|&(_, format)| format)
    }

    /// Longest known suffix at the end of `file_name`, if any.
    pub fn detect(file_name: &str) -> Option<ArchiveFormat> {
        let lower = file_name.to_ascii_lowercase();
        ARCHIVE_FORMATS
            .iter()
            .find(|(suffix, _)| {
                lower
                    .strip_suffix(suffix)
                    .is_some_and(|stem| stem.ends_with('.'))
            })
            .map(|&(_, format)| format)
    }

    /// Whether the format carries a member listing (as opposed to a single
    /// compressed file).
    pub fn has_members(self) -> bool {
        !matches!(
            self,
            ArchiveFormat::Gz | ArchiveFormat::Xz | ArchiveFormat::Zst
        )
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for ArchiveFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ArchiveFormat::from_suffix(s.trim_start_matches('.'))
            .ok_or_else(|| Error::UnknownFormat(s.to_string()))
    }
}
