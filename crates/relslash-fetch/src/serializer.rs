//! Single-flight gate for decoders that must not run concurrently.
//!
//! The xz decoder is run strictly one at a time. Callers queue on a fair async
//! mutex and are admitted in arrival order; the lock guard travels into the
//! blocking task, so the exclusive window lasts exactly as long as the decode
//! itself, even if the caller stops waiting for the result.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Mutex;
use tokio::task::JoinError;

#[derive(Debug, Default)]
pub struct DecodeSerializer {
    gate: Arc<Mutex<()>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    completed: AtomicUsize,
}

impl DecodeSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `op` on the blocking pool once every earlier caller has finished.
    pub async fn run_blocking<T, F>(self: &Arc<Self>, op: F) -> Result<T, JoinError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let guard = Arc::clone(&self.gate).lock_owned().await;
        let this = Arc::clone(self);
        tokio::task::spawn_blocking(move || {
            let _guard = guard;
            let _window = this.enter();
            op()
        })
        .await
    }

    /// Most operations ever observed inside the gate at once.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    /// Operations that have left the gate, including ones that panicked.
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    fn enter(&self) -> Window<'_> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        Window { serializer: self }
    }
}

struct Window<'a> {
    serializer: &'a DecodeSerializer,
}

impl Drop for Window<'_> {
    fn drop(&mut self) {
        self.serializer.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.serializer.completed.fetch_add(1, Ordering::SeqCst);
    }
}
