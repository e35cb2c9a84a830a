//! Single-pass download, digest and archive listing.
//!
//! # Architecture
//!
//! - [`http`] - `HttpClient` seam and the `reqwest` implementation
//! - [`tee`] - Bounded fan-out of one response body to several consumers
//! - [`serializer`] - Single-flight gate for the xz decoder
//! - `inspect` - The pipeline joining download, digest, listing and progress
//!
//! # Key Features
//!
//! - **Single-Pass**: The body is read once; every consumer sees the same
//!   reference-counted chunks
//! - **Backpressure**: Bounded channels; the download runs at the pace of the
//!   slowest consumer
//! - **All-or-Nothing**: The first failure cancels the download and its
//!   siblings

mod error;
pub mod http;
mod inspect;
mod options;
mod progress;
pub mod serializer;
pub mod tee;

pub use error::{FetchError, Result};
pub use http::{BoxStream, HttpClient, HttpResponse};
pub use inspect::{DownloadResult, Inspector};
pub use options::InspectOptions;
pub use progress::{OnProgress, Progress};
pub use serializer::DecodeSerializer;

#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
