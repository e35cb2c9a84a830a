//! Platform token matchers.
//!
//! Each matcher recognises one way of spelling a platform inside an asset
//! name. They are tried in [`PlatformMatcher::PRECEDENCE`] order and the first
//! one that matches the whole file name wins.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use relslash_platform::{ARCH_ALIASES, Arch, IRREGULAR_PLATFORMS, OS_ALIASES, Os, Platform};

/// One spelling of the platform portion of an asset name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformMatcher {
    /// `{os}{sep}{arch}`, e.g. `linux-aarch_64`.
    OsArch,
    /// `{arch}{sep}{os}`, e.g. `x86_64-apple-darwin`.
    ArchOs,
    /// A literal such as `win64` that names a platform directly.
    Irregular,
}

static OS_ALT: Lazy<String> = Lazy::new(|| alternation(OS_ALIASES.iter().map(|(s, _)| *s)));
static ARCH_ALT: Lazy<String> = Lazy::new(|| alternation(ARCH_ALIASES.iter().map(|(s, _)| *s)));
static IRREGULAR_ALT: Lazy<String> =
    Lazy::new(|| alternation(IRREGULAR_PLATFORMS.iter().map(|(s, _)| *s)));

static TOKEN_REGEXES: Lazy<[Regex; 3]> = Lazy::new(|| {
    PlatformMatcher::PRECEDENCE.map(|matcher| {
        Regex::new(&format!("(?i)^{}$", matcher.pattern())).expect("platform token regex")
    })
});

impl PlatformMatcher {
    pub const PRECEDENCE: [PlatformMatcher; 3] = [
        PlatformMatcher::OsArch,
        PlatformMatcher::ArchOs,
        PlatformMatcher::Irregular,
    ];

    /// Regex fragment for this spelling, with named groups `os`/`arch` or
    /// `irregular`.
    pub(crate) fn pattern(self) -> String {
        match self {
            PlatformMatcher::OsArch => {
                format!("(?<os>{})[-_](?<arch>{})", *OS_ALT, *ARCH_ALT)
            }
            PlatformMatcher::ArchOs => {
                format!("(?<arch>{})[-_](?<os>{})", *ARCH_ALT, *OS_ALT)
            }
            PlatformMatcher::Irregular => format!("(?<irregular>{})", *IRREGULAR_ALT),
        }
    }

    fn index(self) -> usize {
        match self {
            PlatformMatcher::OsArch => 0,
            PlatformMatcher::ArchOs => 1,
            PlatformMatcher::Irregular => 2,
        }
    }

    /// Resolve a standalone platform token (`"osx-aarch_64"`, `"WIN64"`).
    pub fn resolve(self, token: &str) -> Option<Platform> {
        let caps = TOKEN_REGEXES[self.index()].captures(token)?;
        self.platform_from(&caps)
    }

    /// Map the groups captured by [`Self::pattern`] through the alias tables.
    pub(crate) fn platform_from(self, caps: &Captures<'_>) -> Option<Platform> {
        match self {
            PlatformMatcher::OsArch | PlatformMatcher::ArchOs => {
                let os = Os::from_alias(caps.name("os")?.as_str())?;
                let arch = Arch::from_alias(caps.name("arch")?.as_str())?;
                Some(Platform::new(os, arch))
            }
            PlatformMatcher::Irregular => {
                Platform::from_irregular(caps.name("irregular")?.as_str())
            }
        }
    }
}

/// `a|b|c` with each alternative escaped.
pub(crate) fn alternation<'a>(tokens: impl Iterator<Item = &'a str>) -> String {
    tokens.map(regex::escape).collect::<Vec<_>>().join("|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_arch_tokens() {
        assert_eq!(
            PlatformMatcher::OsArch.resolve("osx-aarch_64"),
            Some(Platform::new(Os::Macos, Arch::Aarch64))
        );
        assert_eq!(
            PlatformMatcher::OsArch.resolve("Linux_AMD64"),
            Some(Platform::new(Os::Linux, Arch::X86_64))
        );
        assert_eq!(PlatformMatcher::OsArch.resolve("x86_64-apple-darwin"), None);
    }

    #[test]
    fn arch_os_tokens() {
        assert_eq!(
            PlatformMatcher::ArchOs.resolve("x86_64-pc-windows-msvc"),
            Some(Platform::new(Os::Windows, Arch::X86_64))
        );
        assert_eq!(
            PlatformMatcher::ArchOs.resolve("aarch64-unknown-linux-musl"),
            Some(Platform::new(Os::Linux, Arch::Aarch64))
        );
        assert_eq!(PlatformMatcher::ArchOs.resolve("linux-x86_64"), None);
    }

    #[test]
    fn irregular_tokens() {
        assert_eq!(
            PlatformMatcher::Irregular.resolve("macos-universal_binary"),
            Some(Platform::MacosUniversal)
        );
        assert_eq!(
            PlatformMatcher::Irregular.resolve("Win64"),
            Some(Platform::new(Os::Windows, Arch::X86_64))
        );
        assert_eq!(PlatformMatcher::Irregular.resolve("macos-universal"), None);
    }

    #[test]
    fn alternation_escapes_tokens() {
        assert_eq!(alternation(["a.b", "c"].into_iter()), r"a\.b|c");
    }
}
