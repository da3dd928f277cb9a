use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use futures_util::Stream;

use crate::core::Headers;

/// A boxed stream type for HTTP response bodies.
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = T> + Send + 'a>>;

/// Response of a streaming GET: headers are complete, the body is still live.
pub struct StreamResponse<E> {
    pub headers: Headers,
    pub body:    BoxStream<'static, std::result::Result<Bytes, E>>,
}

impl<E> std::fmt::Debug for StreamResponse<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamResponse")
            .field("headers", &self.headers)
            .field("body", &"{ ... }")
            .finish()
    }
}

/// Asynchronous HTTP client abstraction.
///
/// This trait provides the minimal interface a download session needs.
/// Implementations handle their own redirect following, pooling, timeout
/// configuration and error mapping.
///
/// # Implementations
///
/// - [`ReqwestClient`]: Production implementation using `reqwest`
/// - Mock implementations for testing
pub trait HttpClient: Send + Sync {
    /// Error type for HTTP operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Issue a GET and return the headers together with the body as a stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be established (DNS failure,
    /// connection error, timeout, HTTP error status). Errors while the body
    /// flows are yielded by the stream instead.
    fn stream(
        &self,
        url: &str,
    ) -> impl Future<Output = std::result::Result<StreamResponse<Self::Error>, Self::Error>> + Send;

    /// Issue a HEAD and return the response headers.
    fn head(&self, url: &str) -> impl Future<Output = std::result::Result<Headers, Self::Error>> + Send;

    /// Release pooled connections. Requests issued afterwards may fail.
    fn close(&self) {}
}

mod reqwest_impl {
    use std::sync::Arc;
    use std::time::Duration;

    use futures_util::StreamExt;
    use reqwest::Url;
    use reqwest::header::HeaderMap;
    use tokio::sync::{OwnedSemaphorePermit, Semaphore};
    use tracing::debug;

    use super::*;
    use crate::data::DownloadConfig;
    use crate::error::TransportError;

    const TCP_KEEPALIVE: Duration = Duration::from_secs(60);

    /// One keep-alive connection pool and the permits bounding its sockets.
    #[derive(Debug, Clone)]
    struct Pool {
        client:  reqwest::Client,
        permits: Arc<Semaphore>,
    }

    impl Pool {
        fn new(config: &DownloadConfig) -> Result<Self, TransportError> {
            let max_sockets = config.max_sockets.max(1);
            let client = reqwest::Client::builder()
                .pool_max_idle_per_host(max_sockets)
                .tcp_keepalive(Some(TCP_KEEPALIVE))
                .connect_timeout(config.timeout)
                .build()?;

            Ok(Self {
                client,
                permits: Arc::new(Semaphore::new(max_sockets)),
            })
        }

        async fn acquire(&self) -> Result<OwnedSemaphorePermit, TransportError> {
            Arc::clone(&self.permits)
                .acquire_owned()
                .await
                .map_err(|_| TransportError::Closed)
        }
    }

    /// Production HTTP client implementation using reqwest.
    ///
    /// Keeps one pool for `http` and one for `https` URLs, picked by the
    /// scheme of the requested URL. Redirects are followed by reqwest within
    /// the pool that issued the request. Clones share both pools.
    #[derive(Debug, Clone)]
    pub struct ReqwestClient {
        plain:   Pool,
        tls:     Pool,
        timeout: Duration,
    }

    impl ReqwestClient {
        /// Create a client with the given socket limit and setup timeout.
        pub fn new(config: &DownloadConfig) -> Result<Self, TransportError> {
            Ok(Self {
                plain:   Pool::new(config)?,
                tls:     Pool::new(config)?,
                timeout: config.timeout,
            })
        }

        fn route(&self, url: &str) -> Result<(Url, &Pool), TransportError> {
            let url = Url::parse(url).map_err(|e| TransportError::InvalidUrl(format!("{url}: {e}")))?;
            let pool = if url.scheme() == "https" { &self.tls } else { &self.plain };
            Ok((url, pool))
        }

        async fn timed<T>(
            &self,
            setup: impl Future<Output = Result<T, TransportError>>,
        ) -> Result<T, TransportError> {
            tokio::time::timeout(self.timeout, setup)
                .await
                .map_err(|_| TransportError::Timeout(self.timeout))?
        }
    }

    fn collect_headers(map: &HeaderMap) -> Headers {
        map.iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_owned(), value.to_owned()))
            })
            .collect()
    }

    impl HttpClient for ReqwestClient {
        type Error = TransportError;

        async fn stream(&self, url: &str) -> Result<StreamResponse<Self::Error>, Self::Error> {
            let (url, pool) = self.route(url)?;
            let (permit, response) = self
                .timed(async {
                    let permit = pool.acquire().await?;
                    let response = pool.client.get(url).send().await?.error_for_status()?;
                    Ok::<_, TransportError>((permit, response))
                })
                .await?;
            debug!(status = %response.status(), "response received");

            let headers = collect_headers(response.headers());
            // The socket permit is released when the body stream is dropped.
            let body = response.bytes_stream().map(move |chunk| {
                let _permit = &permit;
                chunk.map_err(TransportError::from)
            });

            Ok(StreamResponse {
                headers,
                body: Box::pin(body),
            })
        }

        async fn head(&self, url: &str) -> Result<Headers, Self::Error> {
            let (url, pool) = self.route(url)?;
            let response = self
                .timed(async {
                    let _permit = pool.acquire().await?;
                    Ok::<_, TransportError>(pool.client.head(url).send().await?.error_for_status()?)
                })
                .await?;

            Ok(collect_headers(response.headers()))
        }

        fn close(&self) {
            self.plain.permits.close();
            self.tls.permits.close();
        }
    }

}

pub use reqwest_impl::ReqwestClient;
