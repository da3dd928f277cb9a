use std::time::Duration;

use tracing::{debug, instrument};

use crate::core::content_length;
use crate::data::DownloadConfig;
use crate::effects::http::{HttpClient, ReqwestClient};
use crate::error::{Error, Result};

/// Ask the server for the size of `url` with a HEAD request.
///
/// Returns the `Content-Length` of the response, or 0 when the server
/// announces none. Uses a fresh client; see [`fetch_file_size_with`] to reuse
/// an existing one.
///
/// # Errors
///
/// Network failures and timeouts are returned unchanged as
/// [`Error::Network`].
pub async fn fetch_file_size(url: &str, timeout: Duration) -> Result<u64> {
    let client = ReqwestClient::new(&DownloadConfig::default().timeout(timeout)).map_err(Error::network)?;
    fetch_file_size_with(&client, url).await
}

#[instrument(name = "fetch_file_size", level = "debug", skip(client))]
pub async fn fetch_file_size_with<C: HttpClient>(client: &C, url: &str) -> Result<u64> {
    let headers = client.head(url).await.map_err(Error::network)?;
    let size = content_length(&headers);
    debug!(size, "remote size");
    Ok(size)
}
