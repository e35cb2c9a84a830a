//! Release asset name classification.
//!
//! Turns file names such as `ripgrep-14.1.1-x86_64-unknown-linux-musl.tar.gz`
//! into an [`AssetInfo`] (`name`, `version`, `platform`, `format`).
//!
//! # Architecture
//!
//! - `matcher.rs` - Ordered platform spellings (os-arch, arch-os, irregular)
//! - `classify.rs` - Full grammar and fallback
//! - `group.rs` - Grouping a release's assets by classified name

pub use classify::{AssetInfo, classify};
pub use group::{AssetGroups, ClassifiedAsset, group_assets, platform_conflicts};
pub use matcher::PlatformMatcher;

mod classify;
mod group;
mod matcher;
