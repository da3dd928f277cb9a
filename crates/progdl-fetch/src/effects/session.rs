use std::io;
use std::path::Path;
use std::sync::Arc;

use futures_util::StreamExt;
use progdl_verify::{ChecksumProvider, FileChecksum, Sha256Hasher};
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument, trace, warn};

use crate::core::content_length;
use crate::data::{DownloadConfig, DownloadOutcome, ProgressData};
use crate::effects::emitter::Listeners;
use crate::effects::http::{HttpClient, ReqwestClient};
use crate::error::{Error, Result};

/// A reusable downloader bound to one source URL.
///
/// Each [`download`](Self::download) call either accepts an existing file
/// whose checksum matches, or streams the URL to disk while emitting
/// progress events. Calls take `&mut self`, so one session runs at most one
/// download at a time; the byte counter restarts at 0 on every call.
///
/// # Examples
///
/// ```no_run
/// use progdl_fetch::ProgressDownload;
///
/// # async fn run() -> progdl_fetch::Result<()> {
/// let mut session = ProgressDownload::new("https://example.com/tool.tar.gz")?;
/// session.on_progress(|p| {
///     if let Some(pct) = p.percentage() {
///         println!("{pct:.1}%");
///     }
/// });
///
/// session.download("tool.tar.gz", Some("9f86d081884c7d65"), 0).await?;
/// # Ok(())
/// # }
/// ```
pub struct ProgressDownload<C = ReqwestClient, P = FileChecksum<Sha256Hasher>> {
    url:       String,
    client:    C,
    checksum:  P,
    progress:  u64,
    listeners: Listeners,
}

impl<C, P> std::fmt::Debug for ProgressDownload<C, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressDownload")
            .field("url", &self.url)
            .field("progress", &self.progress)
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

impl ProgressDownload {
    /// Create a session with two sockets per scheme and a 60 s setup timeout.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_config(url, DownloadConfig::default())
    }

    pub fn with_config(url: impl Into<String>, config: DownloadConfig) -> Result<Self> {
        let client = ReqwestClient::new(&config).map_err(Error::network)?;
        Ok(Self::with_parts(url, client, FileChecksum::new()))
    }
}

impl<C: HttpClient, P: ChecksumProvider> ProgressDownload<C, P> {
    /// Create a session from custom transport and checksum collaborators.
    pub fn with_parts(url: impl Into<String>, client: C, checksum: P) -> Self {
        Self {
            url: url.into(),
            client,
            checksum,
            progress: 0,
            listeners: Listeners::default(),
        }
    }

    pub fn url(&self) -> &str { &self.url }

    /// Bytes received so far by the current or most recent call.
    pub fn progress(&self) -> u64 { self.progress }

    pub fn on_progress(&mut self, listener: impl Fn(&ProgressData) + Send + Sync + 'static) -> &mut Self {
        self.listeners.add_progress(Arc::new(listener));
        self
    }

    /// Register an error listener. It receives the same error the failing
    /// call returns.
    pub fn on_error(&mut self, listener: impl Fn(&Error) + Send + Sync + 'static) -> &mut Self {
        self.listeners.add_error(Arc::new(listener));
        self
    }

    pub fn clear_listeners(&mut self) -> &mut Self {
        self.listeners.clear();
        self
    }

    /// Download the session URL to `save_path`.
    ///
    /// When the file already exists and `checksum` equals its digest, no
    /// request is made: one progress event reporting `expected_size` for all
    /// three fields is emitted and [`DownloadOutcome::Skipped`] returned.
    ///
    /// Otherwise the body is streamed into `save_path`, emitting one progress
    /// event per chunk. The call returns once the received bytes reach the
    /// `Content-Length` total, or at end of stream when the server sent none.
    /// A body that ends short of the announced total is a stream failure.
    ///
    /// # Errors
    ///
    /// Any failure is reported to the error listeners first and then
    /// returned. Nothing is retried; the session stays usable.
    #[instrument(name = "download", level = "debug", skip_all, fields(url = %self.url))]
    pub async fn download(
        &mut self,
        save_path: impl AsRef<Path>,
        checksum: Option<&str>,
        expected_size: u64,
    ) -> Result<DownloadOutcome> {
        self.progress = 0;

        match self.run(save_path.as_ref(), checksum, expected_size).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                warn!(error = %e, "download failed");
                self.listeners.emit_error(&e);
                Err(e)
            }
        }
    }

    /// Query the remote size through this session's pools.
    pub async fn file_size(&self) -> Result<u64> {
        crate::effects::size::fetch_file_size_with(&self.client, &self.url).await
    }

    /// Shut down the pooled connections.
    pub fn close(self) { self.client.close(); }

    async fn run(
        &mut self,
        save_path: &Path,
        checksum: Option<&str>,
        expected_size: u64,
    ) -> Result<DownloadOutcome> {
        if let Some(expected) = checksum
            && self.is_current(save_path, expected).await?
        {
            debug!(path = %save_path.display(), "existing file matches checksum");
            self.listeners
                .emit_progress(&ProgressData::already_complete(expected_size));
            return Ok(DownloadOutcome::Skipped);
        }

        let response = self.client.stream(&self.url).await.map_err(Error::network)?;
        let total = content_length(&response.headers);
        debug!(total, "streaming response body");

        let mut file = tokio::fs::File::create(save_path)
            .await
            .map_err(|e| Error::io(save_path, e))?;
        let mut body = response.body;

        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(Error::stream)?;
            file.write_all(&chunk).await.map_err(|e| Error::io(save_path, e))?;

            let len = chunk.len() as u64;
            self.progress += len;
            trace!(progress = self.progress, chunk = len, "chunk written");
            self.listeners.emit_progress(&ProgressData {
                progress: self.progress,
                chunk: len,
                total,
            });

            if total > 0 && self.progress >= total {
                break;
            }
        }

        file.flush().await.map_err(|e| Error::io(save_path, e))?;

        if self.progress < total {
            return Err(Error::stream(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("body ended after {} of {total} bytes", self.progress),
            )));
        }
        debug!(received = self.progress, total, "download complete");

        Ok(DownloadOutcome::Completed {
            received: self.progress,
            total,
        })
    }

    async fn is_current(&self, path: &Path, expected: &str) -> Result<bool> {
        if !tokio::fs::try_exists(path)
            .await
            .map_err(|e| Error::io(path, e))?
        {
            return Ok(false);
        }

        let actual = self
            .checksum
            .checksum(path)
            .await
            .map_err(|source| Error::Checksum {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(actual == expected)
    }
}
