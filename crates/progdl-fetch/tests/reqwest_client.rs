use std::time::Duration;

use progdl_fetch::{
    DownloadConfig, DownloadOutcome, Error, FileChecksum, HttpClient, ProgressDownload,
    ReqwestClient, Sha256Hasher, TransportError, content_length, fetch_file_size,
};
use tempfile::tempdir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

async fn read_request(socket: &mut TcpStream) {
    let mut buf = vec![0u8; 8192];
    let mut read = 0;
    loop {
        let n = socket.read(&mut buf[read..]).await.unwrap();
        read += n;
        if n == 0 || buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }
}

/// Answers a single request on a loopback port with a canned response.
async fn serve_once(response: &'static [u8]) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        read_request(&mut socket).await;
        socket.write_all(response).await.unwrap();
        let _ = socket.shutdown().await;
    });

    format!("http://{addr}/file.bin")
}

/// Answers each new connection with the next response and keeps the socket
/// open afterwards, so a short body stays pending.
async fn serve_held(responses: Vec<&'static [u8]>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        for response in responses {
            let (mut socket, _) = listener.accept().await.unwrap();
            tokio::spawn(async move {
                read_request(&mut socket).await;
                socket.write_all(response).await.unwrap();
                tokio::time::sleep(Duration::from_secs(30)).await;
            });
        }
    });

    format!("http://{addr}/file.bin")
}

fn config() -> DownloadConfig { DownloadConfig::default().timeout(Duration::from_secs(5)) }

#[tokio::test]
async fn test_fetch_file_size_reads_content_length() {
    let url = serve_once(b"HTTP/1.1 200 OK\r\nContent-Length: 2048\r\nConnection: close\r\n\r\n").await;

    assert_eq!(fetch_file_size(&url, Duration::from_secs(5)).await.unwrap(), 2048);
}

#[tokio::test]
async fn test_fetch_file_size_without_header_is_zero() {
    let url = serve_once(b"HTTP/1.1 200 OK\r\nConnection: close\r\n\r\n").await;

    assert_eq!(fetch_file_size(&url, Duration::from_secs(5)).await.unwrap(), 0);
}

#[tokio::test]
async fn test_download_over_loopback() {
    let url = serve_once(
        b"HTTP/1.1 200 OK\r\nContent-Length: 11\r\nConnection: close\r\n\r\nhello world",
    )
    .await;
    let dir = tempdir().unwrap();
    let path = dir.path().join("hello.txt");

    let mut session = ProgressDownload::with_config(url, config()).unwrap();
    let outcome = session.download(&path, None, 0).await.unwrap();

    assert_eq!(outcome, DownloadOutcome::Completed { received: 11, total: 11 });
    assert_eq!(std::fs::read(&path).unwrap(), b"hello world");
}

#[tokio::test]
async fn test_skip_uses_sha256_of_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("hello.txt");
    std::fs::write(&path, b"hello world").unwrap();

    // Nothing listens on the discard port; the skip path must not connect.
    let mut session = ProgressDownload::with_config("http://127.0.0.1:9/hello.txt", config()).unwrap();
    let outcome = session
        .download(
            &path,
            Some("b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"),
            11,
        )
        .await
        .unwrap();

    assert_eq!(outcome, DownloadOutcome::Skipped);
}

#[tokio::test]
async fn test_error_status_is_a_setup_failure() {
    let url = serve_once(b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n").await;
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.bin");

    let mut session = ProgressDownload::with_config(url, config()).unwrap();
    let err = session.download(&path, None, 0).await.unwrap_err();

    assert!(matches!(err, Error::Network(_)));
    assert!(!path.exists());
}

#[tokio::test]
async fn test_setup_timeout() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (_socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
    });

    let client = ReqwestClient::new(&DownloadConfig::default().timeout_ms(200)).unwrap();
    let err = client.head(&format!("http://{addr}/slow")).await.unwrap_err();

    assert!(matches!(err, TransportError::Timeout(_)));
}

#[tokio::test]
async fn test_closed_client_refuses_requests() {
    let client = ReqwestClient::new(&config()).unwrap();
    client.close();

    let err = client.head("http://127.0.0.1:9/file.bin").await.unwrap_err();

    assert!(matches!(err, TransportError::Closed));
}

#[tokio::test]
async fn test_invalid_url() {
    let client = ReqwestClient::new(&config()).unwrap();

    let err = client.head("not a url").await.unwrap_err();

    assert!(matches!(err, TransportError::InvalidUrl(_)));
}

#[tokio::test]
async fn test_max_sockets_bounds_concurrent_requests() {
    let url = serve_held(vec![
        b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\npartial",
        b"HTTP/1.1 200 OK\r\nContent-Length: 2048\r\nConnection: close\r\n\r\n",
    ])
    .await;
    let client = ReqwestClient::new(&config().max_sockets(1)).unwrap();

    let response = client.stream(&url).await.unwrap();
    let queued = tokio::time::timeout(Duration::from_millis(200), client.head(&url)).await;
    assert!(queued.is_err(), "second request must wait while the body is held");

    drop(response);
    let headers = client.head(&url).await.unwrap();

    assert_eq!(content_length(&headers), 2048);
}

#[tokio::test]
async fn test_session_close_shuts_shared_pools() {
    let client = ReqwestClient::new(&config()).unwrap();
    let session = ProgressDownload::with_parts(
        "http://127.0.0.1:9/file.bin",
        client.clone(),
        FileChecksum::<Sha256Hasher>::new(),
    );

    session.close();

    for url in ["http://127.0.0.1:9/file.bin", "https://127.0.0.1:9/file.bin"] {
        let err = client.head(url).await.unwrap_err();
        assert!(matches!(err, TransportError::Closed), "{url}: {err}");
    }
}
