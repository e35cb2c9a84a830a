//! Architecture tokens.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// CPU architectures a release asset can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Arch {
    #[serde(rename = "aarch64")]
    Aarch64,
    #[serde(rename = "x86_64")]
    X86_64,
}

/// Spellings of architectures found in asset names, lowercase.
pub const ARCH_ALIASES: &[(&str, Arch)] = &[
    ("aarch_64", Arch::Aarch64),
    ("aarch64", Arch::Aarch64),
    ("arm64", Arch::Aarch64),
    ("amd64", Arch::X86_64),
    ("x86_64", Arch::X86_64),
    ("x64", Arch::X86_64),
];

impl Arch {
    pub const ALL: [Arch; 2] = [Arch::Aarch64, Arch::X86_64];

    pub fn as_str(self) -> &'static str {
        match self {
            Arch::Aarch64 => "aarch64",
            Arch::X86_64 => "x86_64",
        }
    }

    /// Resolve any known spelling, ignoring case.
    pub fn from_alias(token: &str) -> Option<Arch> {
        ARCH_ALIASES
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(token))
            .map(|&(_, arch)| arch)
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Arch {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Arch::ALL
            .into_iter()
            .find(|arch| arch.as_str() == s)
            .ok_or_else(|| Error::UnknownArch(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_case_insensitively() {
        assert_eq!(Arch::from_alias("AARCH_64"), Some(Arch::Aarch64));
        assert_eq!(Arch::from_alias("arm64"), Some(Arch::Aarch64));
        assert_eq!(Arch::from_alias("AMD64"), Some(Arch::X86_64));
        assert_eq!(Arch::from_alias("x64"), Some(Arch::X86_64));
        assert_eq!(Arch::from_alias("i686"), None);
    }

    #[test]
    fn serde_uses_canonical_names() {
        assert_eq!(serde_json::to_string(&Arch::X86_64).unwrap(), "\"x86_64\"");
        assert_eq!(
            serde_json::from_str::<Arch>("\"aarch64\"").unwrap(),
            Arch::Aarch64
        );
    }
}
