//! One response body, several consumers.
//!
//! Each fork is a bounded channel of `Bytes`; chunks are shared by reference
//! count, not copied. The pump waits until every live fork accepted a chunk
//! before pulling the next one, so the slowest consumer sets the pace. A fork
//! whose receiver is gone is dropped from the broadcast.

use std::io::{self, Read};

use bytes::{Buf, Bytes};
use futures_util::future::join_all;
use futures_util::{Stream, TryStreamExt};
use tokio::sync::mpsc;

pub struct Tee {
    depth: usize,
    senders: Vec<mpsc::Sender<Bytes>>,
}

impl Tee {
    pub fn new(depth: usize) -> Self {
        Self {
            depth: depth.max(1),
            senders: Vec::new(),
        }
    }

    /// Add a consumer. Must be called before [`pump`](Self::pump).
    pub fn fork(&mut self) -> mpsc::Receiver<Bytes> {
        let (tx, rx) = mpsc::channel(self.depth);
        self.senders.push(tx);
        rx
    }

    /// Copy `body` to every fork and return the number of bytes read.
    ///
    /// Forks see end-of-stream when this future finishes or is dropped.
    pub async fn pump<S, E>(mut self, mut body: S) -> Result<u64, E>
    where
        S: Stream<Item = Result<Bytes, E>> + Unpin,
    {
        let mut total = 0u64;
        while let Some(chunk) = body.try_next().await? {
            if chunk.is_empty() {
                continue;
            }
            total += chunk.len() as u64;
            self.broadcast(chunk).await;
        }
        Ok(total)
    }

    async fn broadcast(&mut self, chunk: Bytes) {
        let sent = join_all(self.senders.iter().map(|tx| tx.send(chunk.clone()))).await;
        let mut sent = sent.into_iter();
        self.senders
            .retain(|_| sent.next().is_some_and(|result| result.is_ok()));
    }
}

/// Blocking [`Read`] over a fork, for decoders on the blocking pool.
///
/// Must not be read from an async context.
pub struct ChannelReader {
    rx: mpsc::Receiver<Bytes>,
    current: Bytes,
}

impl ChannelReader {
    pub fn new(rx: mpsc::Receiver<Bytes>) -> Self {
        Self {
            rx,
            current: Bytes::new(),
        }
    }
}

impl Read for ChannelReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        while self.current.is_empty() {
            match self.rx.blocking_recv() {
                Some(chunk) => self.current = chunk,
                None => return Ok(0),
            }
        }
        let n = self.current.len().min(buf.len());
        buf[..n].copy_from_slice(&self.current[..n]);
        self.current.advance(n);
        Ok(n)
    }
}
