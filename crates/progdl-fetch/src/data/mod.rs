//! Immutable data types for download sessions.
//!
//! Configuration consumed when a session is built, and the values handed to
//! listeners or returned from a finished call.

pub mod options;
pub mod progress;

pub use options::{DEFAULT_MAX_SOCKETS, DEFAULT_TIMEOUT, DownloadConfig};
pub use progress::{DownloadOutcome, ProgressData};
