//! `{os}-{arch}` platform pairs and the irregular spellings that map to them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Arch, Error, Os};

/// A manifest platform.
///
/// Every `{os}-{arch}` pair is representable, plus the dual-architecture
/// `macos-universal` which has no single `Arch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Platform {
    Target { os: Os, arch: Arch },
    MacosUniversal,
}

/// Platform spellings that do not decompose into an OS and an arch token.
pub const IRREGULAR_PLATFORMS: &[(&str, Platform)] = &[
    ("macos-universal_binary", Platform::MacosUniversal),
    ("osx-universal_binary", Platform::MacosUniversal),
    (
        "win64",
        Platform::Target {
            os: Os::Windows,
            arch: Arch::X86_64,
        },
    ),
];

impl Platform {
    pub const fn new(os: Os, arch: Arch) -> Self {
        Platform::Target { os, arch }
    }

    /// All single-architecture platforms, in canonical order.
    pub fn targets() -> impl Iterator<Item = Platform> {
        Os::ALL
            .into_iter()
            .flat_map(|os| Arch::ALL.into_iter().map(move |arch| Platform::new(os, arch)))
    }

    /// Resolve an irregular platform spelling, ignoring case.
    pub fn from_irregular(token: &str) -> Option<Platform> {
        IRREGULAR_PLATFORMS
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(token))
            .map(|&(_, platform)| platform)
    }

    /// Concrete platforms this one can serve.
    ///
    /// `macos-universal` covers both macOS architectures.
    pub fn covers(self) -> Vec<Platform> {
        match self {
            Platform::Target { .. } => vec![self],
            Platform::MacosUniversal => Arch::ALL
                .into_iter()
                .map(|arch| Platform::new(Os::Macos, arch))
                .collect(),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Target { os, arch } => write!(f, "{os}-{arch}"),
            Platform::MacosUniversal => f.write_str("macos-universal"),
        }
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "macos-universal" {
            return Ok(Platform::MacosUniversal);
        }
        let (os, arch) = s
            .split_once('-')
            .ok_or_else(|| Error::UnknownPlatform(s.to_string()))?;
        match (os.parse::<Os>(), arch.parse::<Arch>()) {
            (Ok(os), Ok(arch)) => Ok(Platform::new(os, arch)),
            _ => Err(Error::UnknownPlatform(s.to_string())),
        }
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.to_string()
    }
}

impl TryFrom<String> for Platform {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
