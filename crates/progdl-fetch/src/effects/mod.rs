//! I/O operations for HTTP fetching.
//!
//! The transport seam, the listener registry, the download session and the
//! size query. Everything that touches the network or the filesystem lives
//! here.

mod emitter;
mod http;
mod session;
mod size;

pub use emitter::{ErrorListener, Listeners, ProgressListener};
pub use http::{BoxStream, HttpClient, ReqwestClient, StreamResponse};
pub use session::ProgressDownload;
pub use size::{fetch_file_size, fetch_file_size_with};
