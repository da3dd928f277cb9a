use serde::Serialize;

/// Payload of a `progress` event.
///
/// `total` is the size announced by the server, or 0 when it did not send
/// one. On the skip path all three fields carry the caller's expected size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressData {
    /// Bytes received so far in the current call.
    pub progress: u64,

    /// Size of the chunk that triggered this event.
    pub chunk: u64,

    /// Expected total, 0 if unknown.
    pub total: u64,
}

impl ProgressData {
    /// Event reported when an existing file is accepted without a transfer.
    pub fn already_complete(size: u64) -> Self {
        Self {
            progress: size,
            chunk:    size,
            total:    size,
        }
    }

    /// Percentage of `total` received, `None` while the total is unknown.
    #[must_use]
    pub fn percentage(&self) -> Option<f64> {
        (self.total > 0).then(|| (self.progress as f64 / self.total as f64) * 100.0)
    }

    /// Whether a known total has been reached.
    #[must_use]
    pub fn is_complete(&self) -> bool { self.total > 0 && self.progress >= self.total }
}

/// How a successful `download` call finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The destination already matched the expected checksum.
    Skipped,

    /// The body was streamed to disk.
    Completed { received: u64, total: u64 },
}
