use std::io::Write;

use anyhow::Context;
use relslash_asset::classify;
use relslash_fetch::{DownloadResult, InspectOptions, Inspector, OnProgress, ReqwestClient};
use relslash_platform::ArchiveFormat;
use relslash_verify::{DigestAlgorithm, verify_hex};
use tracing::info;

use super::progress::DownloadBar;

/// Download an asset, print its digest and archive members.
#[derive(Debug, clap::Args)]
pub struct Inspect {
    /// URL of the asset.
    pub url: String,

    /// Archive format; guessed from the URL's file name when omitted.
    #[arg(long)]
    pub format: Option<ArchiveFormat>,

    /// Digest algorithm.
    #[arg(long, default_value_t = DigestAlgorithm::Blake3)]
    pub hash: DigestAlgorithm,

    /// Extra request header, as `NAME:VALUE`. Repeatable.
    #[arg(long = "header", value_name = "NAME:VALUE")]
    pub headers: Vec<String>,

    /// Fail unless the downloaded digest equals this hex string.
    #[arg(long, value_name = "HEX")]
    pub expect_digest: Option<String>,

    /// Do not draw a progress bar.
    #[arg(long)]
    pub no_progress: bool,
}

impl Inspect {
    pub async fn run(self) -> anyhow::Result<()> {
        let file_name = file_name(&self.url);
        let format = self.format.or_else(|| guess_format(file_name));
        info!(url = %self.url, ?format, "inspecting asset");

        let mut options = InspectOptions::default().algorithm(self.hash);
        for header in &self.headers {
            let (name, value) = header
                .split_once(':')
                .with_context(|| format!("header `{header}` is not NAME:VALUE"))?;
            options = options.header(name.trim(), value.trim());
        }

        let client = ReqwestClient::new().context("failed to build HTTP client")?;
        let inspector = Inspector::new(client).with_options(options);
        let bar = DownloadBar::new(file_name, !self.no_progress);

        let result = inspector
            .fetch_and_inspect(&self.url, format, Some(&bar as &dyn OnProgress))
            .await
            .with_context(|| format!("failed to inspect {}", self.url));
        bar.finish();
        let result = result?;

        if let Some(expected) = &self.expect_digest {
            check_digest(expected, &result).with_context(|| format!("refusing {}", self.url))?;
            info!(digest = %result.digest, "digest verified");
        }

        let mut stdout = std::io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, &result)?;
        writeln!(stdout)?;
        Ok(())
    }
}

fn check_digest(expected: &str, result: &DownloadResult) -> anyhow::Result<()> {
    verify_hex(expected, &result.digest)
        .with_context(|| format!("{} digest does not match", result.algorithm))
}

/// Last path segment of `url`, without query or fragment.
fn file_name(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/').next().unwrap_or(path)
}

fn guess_format(file_name: &str) -> Option<ArchiveFormat> {
    classify(file_name)
        .format
        .or_else(|| ArchiveFormat::detect(file_name))
}
