use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{codec} decoder is not enabled in this build")]
    CodecDisabled { codec: &'static str },

    #[error("archive is corrupted: {source}")]
    Corrupted { source: io::Error },

    #[error("{codec} stream is corrupted: {source}")]
    Decode {
        codec: &'static str,
        source: io::Error,
    },

    #[error("zip archive is corrupted: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// Whether the archive or its compression was unreadable, as opposed to
    /// the bytes feeding it.
    pub fn is_corrupt(&self) -> bool {
        matches!(
            self,
            Error::Corrupted { .. } | Error::Decode { .. } | Error::Zip(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
