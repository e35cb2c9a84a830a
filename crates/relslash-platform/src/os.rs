//! Operating system tokens.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Operating systems a release asset can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    Linux,
    Macos,
    Windows,
}

/// Spellings of operating systems found in asset names, lowercase.
///
/// Target-triple vendor/abi tails (`apple-darwin`, `unknown-linux-gnu`, ...)
/// are listed whole so that they are consumed as a single token.
pub const OS_ALIASES: &[(&str, Os)] = &[
    ("apple-darwin", Os::Macos),
    ("pc-windows-gnu", Os::Windows),
    ("pc-windows-msvc", Os::Windows),
    ("unknown-linux-gnu", Os::Linux),
    ("unknown-linux-musl", Os::Linux),
    ("darwin", Os::Macos),
    ("linux", Os::Linux),
    ("macos", Os::Macos),
    ("osx", Os::Macos),
    ("windows", Os::Windows),
];

impl Os {
    pub const ALL: [Os; 3] = [Os::Linux, Os::Macos, Os::Windows];

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Os::Linux => "linux",
            Os::Macos => "macos",
            Os::Windows => "windows",
        }
    }

    /// Resolve any known spelling, ignoring case.
    pub fn from_alias(token: &str) -> Option<Os> {
        OS_ALIASES
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(token))
            .map(|&(_, os)| os)
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Os {
    type Err = Error;

    /// Parses canonical names only; use [`Os::from_alias`] for asset tokens.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Os::ALL
            .into_iter()
            .find(|os| os.as_str() == s)
            .ok_or_else(|| Error::UnknownOS(s.to_string()))
    }
}
