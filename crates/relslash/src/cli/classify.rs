use std::io::Write;

use relslash_asset::{AssetGroups, AssetInfo, group_assets, platform_conflicts};
use relslash_platform::{Platform, PlatformSelector, PlatformSet};
use serde::Serialize;
use tracing::warn;

/// Classify asset file names and group them by tool name.
#[derive(Debug, clap::Args)]
pub struct Classify {
    /// Platforms to keep: `all`, an OS, an arch or a `<os>-<arch>` pair.
    #[arg(long, value_delimiter = ',', default_value = "all")]
    pub platforms: Vec<PlatformSelector>,

    /// Asset file names, e.g. `ripgrep-14.1.1-x86_64-unknown-linux-musl.tar.gz`.
    #[arg(required = true)]
    pub names: Vec<String>,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    groups: Vec<GroupReport<'a>>,
    unknown: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
struct GroupReport<'a> {
    name: &'a str,
    assets: Vec<AssetReport<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    conflicts: Vec<Platform>,
}

#[derive(Debug, Serialize)]
struct AssetReport<'a> {
    file_name: &'a str,
    #[serde(flatten)]
    info: &'a AssetInfo,
}

impl Classify {
    pub fn run(self) -> anyhow::Result<()> {
        let platforms: PlatformSet = self.platforms.iter().copied().collect();
        let groups = group_assets(self.names.iter().map(String::as_str), &platforms, |name| *name);
        let report = report(&groups);

        let mut stdout = std::io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, &report)?;
        writeln!(stdout)?;
        Ok(())
    }
}

fn report<'a>(groups: &'a AssetGroups<&'a str>) -> Report<'a> {
    if groups.is_empty() {
        warn!("no asset matched the selected platforms");
    }
    let reports = groups
        .by_name
        .iter()
        .map(|(name, assets)| {
            let conflicts = platform_conflicts(assets);
            if !conflicts.is_empty() {
                warn!(%name, ?conflicts, "several assets for the same platform");
            }
            GroupReport {
                name,
                assets: assets
                    .iter()
                    .map(|a| AssetReport {
                        file_name: a.asset,
                        info: &a.info,
                    })
                    .collect(),
                conflicts,
            }
        })
        .collect();

    Report {
        groups: reports,
        unknown: groups.unknown.clone(),
    }
}
