//! Single-stream HTTP downloads with progress events and checksum-based
//! skipping.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Immutable configuration and event payloads
//! - [`core`] - Pure transformations
//! - [`effects`] - I/O operations with trait abstraction
//!
//! # Key Features
//!
//! - **Idempotent re-runs**: an existing file whose checksum matches is kept
//!   and reported as complete without touching the network
//! - **Streaming**: the body is written to disk chunk by chunk, one progress
//!   event per chunk
//! - **Pooled transport**: keep-alive pools per scheme, reused across calls
//! - **Mechanism-only**: no retries, no UI; callers attach listeners

pub mod core;
pub mod data;
pub mod effects;
mod error;

pub use crate::core::{Headers, content_length};
pub use crate::data::{DEFAULT_MAX_SOCKETS, DEFAULT_TIMEOUT, DownloadConfig, DownloadOutcome, ProgressData};
pub use crate::effects::{
    BoxStream, HttpClient, ProgressDownload, ReqwestClient, StreamResponse, fetch_file_size,
    fetch_file_size_with,
};
pub use crate::error::{BoxError, Error, Result, TransportError};

pub use progdl_verify::{ChecksumProvider, FileChecksum, Sha256Hasher, VerificationError};
