#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error("digest mismatch: expected {expected}, got {actual}")]
    Mismatch { expected: String, actual: String },

    #[error("unknown digest algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("digest algorithm `{0}` is not enabled in this build")]
    Disabled(&'static str),
}

pub type Result<T> = std::result::Result<T, VerificationError>;
