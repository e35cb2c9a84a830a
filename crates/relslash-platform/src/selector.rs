//! Platform selection (`all`, an OS, an arch, or a single platform).

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::{Arch, Error, Os, Platform};

/// A string which selects a set of platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformSelector {
    All,
    Os(Os),
    Arch(Arch),
    Platform(Platform),
}

impl PlatformSelector {
    /// Concrete platforms matched by this selector.
    pub fn expand(self) -> Vec<Platform> {
        match self {
            PlatformSelector::All => Platform::targets().collect(),
            PlatformSelector::Os(os) => Arch::ALL
                .into_iter()
                .map(|arch| Platform::new(os, arch))
                .collect(),
            PlatformSelector::Arch(arch) => Os::ALL
                .into_iter()
                .map(|os| Platform::new(os, arch))
                .collect(),
            PlatformSelector::Platform(platform) => platform.covers(),
        }
    }
}

impl fmt::Display for PlatformSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformSelector::All => f.write_str("all"),
            PlatformSelector::Os(os) => os.fmt(f),
            PlatformSelector::Arch(arch) => arch.fmt(f),
            PlatformSelector::Platform(platform) => platform.fmt(f),
        }
    }
}

impl FromStr for PlatformSelector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(PlatformSelector::All);
        }
        if let Ok(os) = s.parse() {
            return Ok(PlatformSelector::Os(os));
        }
        if let Ok(arch) = s.parse() {
            return Ok(PlatformSelector::Arch(arch));
        }
        s.parse()
            .map(PlatformSelector::Platform)
            .map_err(|_| Error::UnknownSelector(s.to_string()))
    }
}

/// Set of concrete platforms selected by a list of selectors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformSet(BTreeSet<Platform>);

impl PlatformSet {
    pub fn all() -> Self {
        Self(Platform::targets().collect())
    }

    pub fn contains(&self, platform: Platform) -> bool {
        self.0.contains(&platform)
    }

    /// Whether an asset built for `platform` is wanted.
    ///
    /// A universal macOS binary is wanted if either macOS arch is.
    pub fn accepts(&self, platform: Platform) -> bool {
        platform.covers().into_iter().any(|p| self.contains(p))
    }

    pub fn iter(&self) -> impl Iterator<Item = Platform> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<PlatformSelector> for PlatformSet {
    fn from_iter<I: IntoIterator<Item = PlatformSelector>>(iter: I) -> Self {
        Self(iter.into_iter().flat_map(PlatformSelector::expand).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(selectors: &[&str]) -> PlatformSet {
        selectors
            .iter()
            .map(|s| s.parse::<PlatformSelector>().unwrap())
            .collect()
    }

    #[test]
    fn parse_selectors() {
        assert_eq!("all".parse(), Ok(PlatformSelector::All));
        assert_eq!("linux".parse(), Ok(PlatformSelector::Os(Os::Linux)));
        assert_eq!("x86_64".parse(), Ok(PlatformSelector::Arch(Arch::X86_64)));
        assert_eq!(
            "windows-aarch64".parse(),
            Ok(PlatformSelector::Platform(Platform::new(
                Os::Windows,
                Arch::Aarch64
            )))
        );
        assert!("solaris".parse::<PlatformSelector>().is_err());
    }

    #[test]
    fn expand_combines_selectors() {
        assert_eq!(set(&["all"]).len(), 6);
        assert_eq!(set(&["macos"]).len(), 2);
        let mixed = set(&["aarch64", "linux-x86_64"]);
        assert_eq!(mixed.len(), 4);
        assert!(mixed.contains(Platform::new(Os::Linux, Arch::X86_64)));
        assert!(!mixed.contains(Platform::new(Os::Windows, Arch::X86_64)));
    }

    #[test]
    fn universal_accepted_by_either_macos_arch() {
        assert!(set(&["macos-x86_64"]).accepts(Platform::MacosUniversal));
        assert!(set(&["aarch64"]).accepts(Platform::MacosUniversal));
        assert!(!set(&["linux", "windows"]).accepts(Platform::MacosUniversal));
    }
}
