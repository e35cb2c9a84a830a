use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Result, VerificationError};

/// Incremental digest over a byte stream.
pub trait Hasher: Send {
    fn update(&mut self, data: &[u8]);
    fn finalize(self) -> Vec<u8>;
}

#[cfg(feature = "blake3")]
pub struct Blake3Hasher(blake3::Hasher);

#[cfg(feature = "blake3")]
impl Hasher for Blake3Hasher {
    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }
    fn finalize(self) -> Vec<u8> {
        self.0.finalize().as_bytes().to_vec()
    }
}

#[cfg(feature = "blake3")]
impl Blake3Hasher {
    pub fn new() -> Self {
        Self(blake3::Hasher::new())
    }

    pub fn digest(data: &[u8]) -> Vec<u8> {
        blake3::hash(data).as_bytes().to_vec()
    }
}

#[cfg(feature = "blake3")]
impl Default for Blake3Hasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "sha256")]
pub struct Sha256Hasher(sha2::Sha256);

#[cfg(feature = "sha256")]
impl Hasher for Sha256Hasher {
    fn update(&mut self, data: &[u8]) {
        sha2::Digest::update(&mut self.0, data);
    }
    fn finalize(self) -> Vec<u8> {
        sha2::Digest::finalize(self.0).to_vec()
    }
}

#[cfg(feature = "sha256")]
impl Sha256Hasher {
    pub fn new() -> Self {
        Self(<sha2::Sha256 as sha2::Digest>::new())
    }

    pub fn digest(data: &[u8]) -> Vec<u8> {
        <sha2::Sha256 as sha2::Digest>::digest(data).to_vec()
    }
}

#[cfg(feature = "sha256")]
impl Default for Sha256Hasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Digest algorithms accepted in a dotslash manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    #[default]
    Blake3,
    Sha256,
}

impl DigestAlgorithm {
    pub fn as_str(self) -> &'static str {
        match self {
            DigestAlgorithm::Blake3 => "blake3",
            DigestAlgorithm::Sha256 => "sha256",
        }
    }

    /// A fresh hasher for this algorithm.
    pub fn hasher(self) -> Result<AnyHasher> {
        match self {
            #[cfg(feature = "blake3")]
            DigestAlgorithm::Blake3 => Ok(AnyHasher::Blake3(Blake3Hasher::new())),
            #[cfg(feature = "sha256")]
            DigestAlgorithm::Sha256 => Ok(AnyHasher::Sha256(Sha256Hasher::new())),
            #[allow(unreachable_patterns)]
            other => Err(VerificationError::Disabled(other.as_str())),
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = VerificationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "blake3" => Ok(DigestAlgorithm::Blake3),
            "sha256" => Ok(DigestAlgorithm::Sha256),
            _ => Err(VerificationError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// A hasher for whichever algorithm was picked at runtime.
pub enum AnyHasher {
    #[cfg(feature = "blake3")]
    Blake3(Blake3Hasher),
    #[cfg(feature = "sha256")]
    Sha256(Sha256Hasher),
}

impl AnyHasher {
    pub fn algorithm(&self) -> DigestAlgorithm {
        match self {
            #[cfg(feature = "blake3")]
            AnyHasher::Blake3(_) => DigestAlgorithm::Blake3,
            #[cfg(feature = "sha256")]
            AnyHasher::Sha256(_) => DigestAlgorithm::Sha256,
        }
    }

    /// Finish and render as lowercase hex.
    pub fn finalize_hex(self) -> String {
        hex::encode(self.finalize())
    }
}

impl Hasher for AnyHasher {
    fn update(&mut self, data: &[u8]) {
        match self {
            #[cfg(feature = "blake3")]
            AnyHasher::Blake3(h) => h.update(data),
            #[cfg(feature = "sha256")]
            AnyHasher::Sha256(h) => h.update(data),
        }
    }

    fn finalize(self) -> Vec<u8> {
        match self {
            #[cfg(feature = "blake3")]
            AnyHasher::Blake3(h) => h.finalize(),
            #[cfg(feature = "sha256")]
            AnyHasher::Sha256(h) => h.finalize(),
        }
    }
}

/// Compare a computed hex digest with an expected one, ignoring case.
pub fn verify_hex(expected: &str, actual: &str) -> Result<()> {
    if expected.eq_ignore_ascii_case(actual) {
        Ok(())
    } else {
        Err(VerificationError::Mismatch {
            expected: expected.to_ascii_lowercase(),
            actual: actual.to_string(),
        })
    }
}
