use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("unknown architecture: {0}")]
    UnknownArch(String),

    #[error("unknown operating system: {0}")]
    UnknownOS(String),

    #[error("unknown platform: {0}")]
    UnknownPlatform(String),

    #[error("unknown archive format: {0}")]
    UnknownFormat(String),

    #[error("unknown platform selector: {0}")]
    UnknownSelector(String),
}
