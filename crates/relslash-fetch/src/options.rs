use std::sync::Arc;

use relslash_verify::DigestAlgorithm;

/// Configuration for [`Inspector`](crate::Inspector).
///
/// # Examples
///
/// ```
/// use relslash_fetch::InspectOptions;
/// use relslash_verify::DigestAlgorithm;
///
/// let options = InspectOptions::default()
///     .algorithm(DigestAlgorithm::Sha256)
///     .channel_depth(32)
///     .header("Authorization", "Bearer token");
/// ```
#[derive(Debug, Clone)]
pub struct InspectOptions {
    /// Digest computed over the raw response bytes.
    ///
    /// Default: BLAKE3
    pub algorithm: DigestAlgorithm,

    /// Chunks buffered per consumer before the download waits for it.
    ///
    /// Default: 16
    pub channel_depth: usize,

    /// Custom HTTP headers sent with the request.
    ///
    /// Default: empty
    pub headers: Arc<[(String, String)]>,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            algorithm: DigestAlgorithm::default(),
            channel_depth: 16,
            headers: Arc::new([]),
        }
    }
}

impl InspectOptions {
    pub fn algorithm(mut self, algorithm: DigestAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Values below 1 are raised to 1.
    pub fn channel_depth(mut self, depth: usize) -> Self {
        self.channel_depth = depth.max(1);
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut headers = self.headers.to_vec();
        headers.push((key.into(), value.into()));
        self.headers = headers.into();
        self
    }
}
