//! Pure transformations for HTTP fetching.
//!
//! Nothing here performs I/O; the effects layer feeds it response data.

mod headers;

pub use headers::{Headers, content_length};
