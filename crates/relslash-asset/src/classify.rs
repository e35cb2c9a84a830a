//! Asset name grammar.
//!
//! ```text
//! name [ sep (v)? version ]? sep platform (".exe")? [ "." format ]?
//! ```
//!
//! `sep` is `-` or `_`. Matching is case-insensitive; the canonical parts of
//! the result (OS, arch, format) never depend on the input's case.

use once_cell::sync::Lazy;
use regex::Regex;
use relslash_platform::{ARCHIVE_FORMATS, ArchiveFormat, Platform};
use serde::{Deserialize, Serialize};

use crate::matcher::{PlatformMatcher, alternation};

const NAME: &str = "(?<name>[A-Za-z0-9_-]+)";
const VERSION: &str = "[vV]?(?<version>[0-9]+(?:\\.[0-9]+)+(?:[-.][a-zA-Z]+[-.]?[0-9]+)?)";

static MATCHERS: Lazy<Vec<(PlatformMatcher, Regex)>> = Lazy::new(|| {
    let format = alternation(ARCHIVE_FORMATS.iter().map(|(s, _)| *s));
    PlatformMatcher::PRECEDENCE
        .into_iter()
        .map(|matcher| {
            let pattern = format!(
                "(?i)^{NAME}(?:[-_]{VERSION})?[-_]{}(?:\\.exe)?(?:\\.(?<format>{format}))?$",
                matcher.pattern()
            );
            let regex = Regex::new(&pattern).expect("asset name regex");
            (matcher, regex)
        })
        .collect()
});

/// Information extracted from an asset file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<ArchiveFormat>,
}

impl AssetInfo {
    /// Unclassified asset: only a name could be derived.
    pub fn unclassified(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            platform: None,
            format: None,
        }
    }

    /// An asset without a platform cannot be placed in a manifest.
    pub fn is_classified(&self) -> bool {
        self.platform.is_some()
    }

    /// Re-serialize into a file name that classifies back to `self`.
    ///
    /// Returns `None` for unclassified assets.
    pub fn canonical_file_name(&self) -> Option<String> {
        let platform = match self.platform? {
            Platform::MacosUniversal => "macos-universal_binary".to_string(),
            target => target.to_string(),
        };
        let mut file_name = self.name.clone();
        if let Some(version) = &self.version {
            file_name.push('-');
            file_name.push_str(version);
        }
        file_name.push('-');
        file_name.push_str(&platform);
        if let Some(format) = self.format {
            file_name.push('.');
            file_name.push_str(format.suffix());
        }
        Some(file_name)
    }
}

/// Parses an asset name such as `protoc-28.2-linux-x86_64.zip` into its
/// components.
///
/// Never fails: a name outside the grammar yields the part before the first
/// `-` (or the whole name) with everything else unset.
pub fn classify(file_name: &str) -> AssetInfo {
    for (matcher, regex) in MATCHERS.iter() {
        let Some(caps) = regex.captures(file_name) else {
            continue;
        };
        let Some(platform) = matcher.platform_from(&caps) else {
            continue;
        };
        return AssetInfo {
            name: caps["name"].to_ascii_lowercase(),
            version: caps.name("version").map(|m| m.as_str().to_ascii_lowercase()),
            platform: Some(platform),
            format: caps
                .name("format")
                .and_then(|m| ArchiveFormat::from_suffix(m.as_str())),
        };
    }

    tracing::trace!(file_name, "asset name not classified");
    let name = file_name
        .split_once('-')
        .map_or(file_name, |(prefix, _)| prefix);
    AssetInfo::unclassified(name)
}
