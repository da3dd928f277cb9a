//! Checksum primitives for downloaded artifacts.
//!
//! Provides incremental hashers and an asynchronous file checksum used to
//! decide whether a file on disk already holds the expected content. The
//! digest is reported as lowercase hex so it can be compared directly with
//! checksums published next to a download.
//!
//! Both hashers are enabled by default through the `sha256` and `sha1`
//! features; disable default features to build with only one of them.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use progdl_verify::{ChecksumProvider, FileChecksum, Sha256Hasher};
//!
//! # async fn run() -> progdl_verify::Result<()> {
//! let provider = FileChecksum::<Sha256Hasher>::new();
//! let digest = provider.checksum(Path::new("installer.bin")).await?;
//! println!("{digest}");
//! # Ok(())
//! # }
//! ```

pub use self::error::{Result, VerificationError};
pub use self::hasher::Hasher;
pub use self::provider::{ChecksumProvider, FileChecksum};

#[cfg(feature = "sha256")]
pub use self::hasher::Sha256Hasher;

#[cfg(feature = "sha1")]
pub use self::hasher::Sha1Hasher;

mod error;
mod hasher;
mod provider;
