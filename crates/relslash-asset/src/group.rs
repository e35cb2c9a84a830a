//! Grouping classified assets by logical name.

use std::collections::BTreeMap;

use relslash_platform::{Platform, PlatformSet};

use crate::{AssetInfo, classify};

/// An asset whose name classified to a platform.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedAsset<A> {
    pub asset: A,
    pub info: AssetInfo,
    pub platform: Platform,
}

/// Assets of one release, grouped by classified name.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetGroups<A> {
    /// Classified assets on a selected platform, keyed (and sorted) by name.
    pub by_name: BTreeMap<String, Vec<ClassifiedAsset<A>>>,
    /// Assets whose names could not be classified.
    pub unknown: Vec<A>,
}

impl<A> AssetGroups<A> {
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Classify every asset by the file name `file_name` returns for it, keep
/// those on a platform accepted by `platforms` and group them by name.
pub fn group_assets<A, I, F>(assets: I, platforms: &PlatformSet, file_name: F) -> AssetGroups<A>
where
    I: IntoIterator<Item = A>,
    F: Fn(&A) -> &str,
{
    let mut by_name: BTreeMap<String, Vec<ClassifiedAsset<A>>> = BTreeMap::new();
    let mut unknown = Vec::new();

    for asset in assets {
        let info = classify(file_name(&asset));
        let Some(platform) = info.platform else {
            unknown.push(asset);
            continue;
        };
        if !platforms.accepts(platform) {
            tracing::debug!(name = %info.name, %platform, "skipping unselected platform");
            continue;
        }
        by_name
            .entry(info.name.clone())
            .or_default()
            .push(ClassifiedAsset {
                asset,
                info,
                platform,
            });
    }

    AssetGroups { by_name, unknown }
}

/// Platforms served by more than one asset in `group`, in platform order.
///
/// A universal macOS asset counts towards both macOS platforms.
pub fn platform_conflicts<A>(group: &[ClassifiedAsset<A>]) -> Vec<Platform> {
    let mut counts: BTreeMap<Platform, usize> = BTreeMap::new();
    for asset in group {
        for platform in asset.platform.covers() {
            *counts.entry(platform).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .filter(|&(_, count)| count > 1)
        .map(|(platform, _)| platform)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use relslash_platform::{Arch, Os, PlatformSelector};

    const PROTOC: &[&str] = &[
        "protoc-28.2-linux-aarch_64.zip",
        "protoc-28.2-linux-x86_64.zip",
        "protoc-28.2-osx-universal_binary.zip",
        "protoc-28.2-osx-x86_64.zip",
        "protoc-28.2-win64.zip",
        "protobuf-28.2.tar.gz",
    ];

    #[test]
    fn groups_by_name_and_collects_unknown() {
        let groups = group_assets(PROTOC.iter().copied(), &PlatformSet::all(), |a| *a);
        assert_eq!(groups.by_name.len(), 1);
        assert_eq!(groups.by_name["protoc"].len(), 5);
        assert_eq!(groups.unknown, vec!["protobuf-28.2.tar.gz"]);
    }

    #[test]
    fn filters_unselected_platforms() {
        let linux: PlatformSet = [PlatformSelector::Os(Os::Linux)].into_iter().collect();
        let groups = group_assets(PROTOC.iter().copied(), &linux, |a| *a);
        let names: Vec<_> = groups.by_name["protoc"].iter().map(|a| a.asset).collect();
        assert_eq!(
            names,
            ["protoc-28.2-linux-aarch_64.zip", "protoc-28.2-linux-x86_64.zip"]
        );
    }

    #[test]
    fn universal_conflicts_with_single_arch_macos() {
        let groups = group_assets(PROTOC.iter().copied(), &PlatformSet::all(), |a| *a);
        assert_eq!(
            platform_conflicts(&groups.by_name["protoc"]),
            vec![Platform::new(Os::Macos, Arch::X86_64)]
        );
    }
}
