//! Token tables for release asset names.
//!
//! Canonical operating systems, architectures, platforms and archive formats,
//! together with the alias spellings found in the wild (`apple-darwin`,
//! `aarch_64`, `win64`, ...). No matching logic lives here beyond
//! table lookups; see `relslash-asset` for the classifier.

pub use arch::{ARCH_ALIASES, Arch};
pub use error::{Error, Result};
pub use format::{ARCHIVE_FORMATS, ArchiveFormat};
pub use os::{OS_ALIASES, Os};
pub use platform::{IRREGULAR_PLATFORMS, Platform};
pub use selector::{PlatformSelector, PlatformSet};

pub mod arch;
mod error;
pub mod format;
pub mod os;
pub mod platform;
pub mod selector;
