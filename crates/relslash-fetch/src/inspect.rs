use std::sync::Arc;

use bytes::Bytes;
use relslash_archive::ArchiveCodec;
use relslash_platform::ArchiveFormat;
use relslash_verify::{AnyHasher, DigestAlgorithm, Hasher};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::error::{FetchError, Result};
use crate::http::HttpClient;
use crate::options::InspectOptions;
use crate::progress::{OnProgress, Progress};
use crate::serializer::DecodeSerializer;
use crate::tee::{ChannelReader, Tee};

/// Digest and member listing of one downloaded asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadResult {
    /// Lowercase hex digest of the raw response body.
    pub digest: String,
    pub algorithm: DigestAlgorithm,
    pub bytes_read: u64,
    /// `None` when the format has no member listing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive_member_names: Option<Vec<String>>,
}

/// Downloads an asset once and, while the bytes stream past, computes its
/// digest, lists its archive members and reports progress.
pub struct Inspector<C: HttpClient> {
    client: C,
    options: InspectOptions,
    serializer: Arc<DecodeSerializer>,
}

impl<C: HttpClient> Inspector<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            options: InspectOptions::default(),
            serializer: Arc::new(DecodeSerializer::new()),
        }
    }

    pub fn with_options(mut self, options: InspectOptions) -> Self {
        self.options = options;
        self
    }

    /// Share a decode gate with other inspectors.
    pub fn with_serializer(mut self, serializer: Arc<DecodeSerializer>) -> Self {
        self.serializer = serializer;
        self
    }

    pub fn serializer(&self) -> &Arc<DecodeSerializer> {
        &self.serializer
    }

    /// Fetch `url` and inspect it as `format`.
    ///
    /// All consumers succeed or the call fails: the first error cancels the
    /// download and the remaining consumers.
    #[instrument(skip(self, on_progress), fields(algorithm = %self.options.algorithm))]
    pub async fn fetch_and_inspect(
        &self,
        url: &str,
        format: Option<ArchiveFormat>,
        on_progress: Option<&dyn OnProgress>,
    ) -> Result<DownloadResult> {
        let hasher = self
            .options
            .algorithm
            .hasher()
            .map_err(|source| FetchError::Digest {
                url: url.to_string(),
                source,
            })?;
        let algorithm = hasher.algorithm();

        let response = self
            .client
            .get(url, &self.options.headers)
            .await
            .map_err(|e| FetchError::network(url, e))?;
        if !response.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status,
            });
        }
        let total_bytes = response.content_length;
        let codec = format.and_then(ArchiveCodec::for_format);
        debug!(?total_bytes, ?codec, "response received");

        let mut tee = Tee::new(self.options.channel_depth);
        let digest_rx = tee.fork();
        let archive = codec.map(|codec| (codec, tee.fork()));
        let progress = on_progress.map(|sink| (sink, tee.fork()));

        let pump = async {
            tee.pump(response.body)
                .await
                .map_err(|e| FetchError::network(url, e))
        };
        let digest = async { Ok::<_, FetchError>(digest_fork(hasher, digest_rx).await) };
        let members = async {
            match archive {
                Some((codec, rx)) => self.list_members(url, codec, rx).await.map(Some),
                None => Ok(None),
            }
        };
        let report = async {
            if let Some((sink, rx)) = progress {
                report_progress(sink, rx, total_bytes).await;
            }
            Ok::<_, FetchError>(())
        };

        let (bytes_read, digest, archive_member_names, ()) =
            tokio::try_join!(pump, digest, members, report)?;

        debug!(
            bytes_read,
            %digest,
            members = archive_member_names.as_ref().map(Vec::len),
            "asset inspected"
        );
        Ok(DownloadResult {
            digest,
            algorithm,
            bytes_read,
            archive_member_names,
        })
    }

    async fn list_members(
        &self,
        url: &str,
        codec: ArchiveCodec,
        rx: mpsc::Receiver<Bytes>,
    ) -> Result<Vec<String>> {
        let reader = ChannelReader::new(rx);
        let job = move || relslash_archive::list_members(reader, codec);
        let joined = if codec.requires_serial_decode() {
            self.serializer.run_blocking(job).await
        } else {
            tokio::task::spawn_blocking(job).await
        };

        joined
            .map_err(|e| FetchError::Task {
                url: url.to_string(),
                message: e.to_string(),
            })?
            .map_err(|source| FetchError::Archive {
                url: url.to_string(),
                source,
            })
    }
}

async fn digest_fork(mut hasher: AnyHasher, mut rx: mpsc::Receiver<Bytes>) -> String {
    while let Some(chunk) = rx.recv().await {
        hasher.update(&chunk);
    }
    hasher.finalize_hex()
}

async fn report_progress(
    sink: &dyn OnProgress,
    mut rx: mpsc::Receiver<Bytes>,
    total_bytes: Option<u64>,
) {
    let mut bytes_read = 0u64;
    while let Some(chunk) = rx.recv().await {
        bytes_read += chunk.len() as u64;
        sink.on_progress(Progress {
            bytes_read,
            total_bytes,
        })
        .await;
    }
}
