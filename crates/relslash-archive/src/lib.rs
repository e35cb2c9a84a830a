//! Member listing for release archives.
//!
//! Given a byte stream and the archive's format, returns the paths of the
//! files it contains, in archive order, without extracting anything.
//!
//! # Architecture
//!
//! - `format.rs` - Format to codec mapping and decompression wrappers
//! - `members.rs` - Zip and tar enumeration, with partial-result salvage for
//!   malformed tar streams

pub use error::{Error, Result};
pub use format::{ArchiveCodec, Decoder, TarCompress};
pub use members::{list_members, list_tar_members, list_zip_members};

mod error;
mod format;
mod members;
