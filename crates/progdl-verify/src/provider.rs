use std::future::Future;
use std::marker::PhantomData;
use std::path::Path;

use tokio::io::AsyncReadExt;

use crate::{Hasher, Result};

const READ_BUF_SIZE: usize = 64 * 1024;

/// Computes the content checksum of a file on disk.
///
/// Implementations return the digest in the textual form callers compare
/// against, typically lowercase hex.
pub trait ChecksumProvider: Send + Sync {
    fn checksum(&self, path: &Path) -> impl Future<Output = Result<String>> + Send;
}

/// Streams a file through `H` and hex-encodes the digest.
pub struct FileChecksum<H> {
    _hasher: PhantomData<fn() -> H>,
}

impl<H> FileChecksum<H> {
    pub fn new() -> Self {
        Self { _hasher: PhantomData }
    }
}

impl<H> Default for FileChecksum<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> std::fmt::Debug for FileChecksum<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileChecksum")
            .field("hasher", &std::any::type_name::<H>())
            .finish()
    }
}

impl<H: Hasher + Default> ChecksumProvider for FileChecksum<H> {
    async fn checksum(&self, path: &Path) -> Result<String> {
        let mut file = tokio::fs::File::open(path).await?;
        let mut hasher = H::default();
        let mut buf = vec![0u8; READ_BUF_SIZE];

        loop {
            let n = file.read(&mut buf).await?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }

        Ok(hex::encode(hasher.finalize()))
    }
}
