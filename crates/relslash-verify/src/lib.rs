//! Content digests for downloaded release assets.
//!
//! Provides incremental hashing so a digest can be computed while the bytes
//! stream past, without holding the payload. BLAKE3 is the default algorithm
//! for dotslash manifests; SHA-256 is available for providers that only
//! publish that.
//!
//! # Example
//!
//! ```
//! use relslash_verify::{DigestAlgorithm, Hasher};
//!
//! let mut hasher = DigestAlgorithm::Blake3.hasher().unwrap();
//! hasher.update(b"hello ");
//! hasher.update(b"world");
//! let digest = hasher.finalize_hex();
//! assert_eq!(digest.len(), 64);
//! ```

pub use self::error::{Result, VerificationError};
pub use self::hasher::{AnyHasher, DigestAlgorithm, Hasher, verify_hex};

#[cfg(feature = "sha256")]
pub use self::hasher::Sha256Hasher;

#[cfg(feature = "blake3")]
pub use self::hasher::Blake3Hasher;

mod error;
mod hasher;
