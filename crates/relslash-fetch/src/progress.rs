use std::future::Future;

use futures_util::future::BoxFuture;

/// Bytes received so far for one download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Cumulative body bytes, after the latest chunk.
    pub bytes_read: u64,

    /// Total expected bytes, if known from Content-Length header.
    pub total_bytes: Option<u64>,
}

impl Progress {
    /// Completion in percent, when the total is known and non-zero.
    pub fn percentage(&self) -> Option<f64> {
        match self.total_bytes {
            Some(total) if total > 0 => Some(self.bytes_read as f64 / total as f64 * 100.0),
            _ => None,
        }
    }
}

/// Receives a [`Progress`] after every chunk.
///
/// The returned future is awaited before the next report, so a slow sink
/// slows the download rather than queueing reports.
pub trait OnProgress: Send + Sync {
    fn on_progress(&self, progress: Progress) -> BoxFuture<'_, ()>;
}

impl<F, Fut> OnProgress for F
where
    F: Fn(Progress) -> Fut + Send + Sync,
    Fut: Future<Output = ()> + Send + 'static,
{
    fn on_progress(&self, progress: Progress) -> BoxFuture<'_, ()> {
        Box::pin(self(progress))
    }
}
