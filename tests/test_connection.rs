//! End-to-end request/response exchanges over an in-memory stream.

mod common;

use std::sync::Arc;

use common::{TempDir, gunzip, split_response};
use forge::config::Limits;
use forge::handlers::FileStore;
use forge::http::connection::Connection;
use forge::routing::Router;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

async fn exchange_with(router: Router, limits: Limits, request: &[u8]) -> Vec<u8> {
    let (mut client, server) = tokio::io::duplex(1024);
    let router = Arc::new(router);
    let task = tokio::spawn(async move { Connection::new(server, router, limits).run().await });

    client.write_all(request).await.unwrap();
    client.shutdown().await.unwrap();
    let mut out = Vec::new();
    client.read_to_end(&mut out).await.unwrap();

    task.await.unwrap().unwrap();
    out
}

async fn exchange(request: &[u8]) -> Vec<u8> {
    exchange_with(Router::new(FileStore::disabled()), Limits::default(), request).await
}

#[tokio::test]
async fn test_root_response_bytes() {
    let raw = exchange(b"GET / HTTP/1.1\r\nHost: localhost:4221\r\n\r\n").await;

    assert_eq!(raw, b"HTTP/1.1 200 OK\r\n\r\n".to_vec());
}

#[tokio::test]
async fn test_empty_path_response_bytes() {
    let raw = exchange(b"GET  HTTP/1.1\r\n\r\n").await;

    assert_eq!(raw, b"HTTP/1.1 200 OK\r\n\r\n".to_vec());
}

#[tokio::test]
async fn test_echo_response_bytes() {
    let raw = exchange(b"GET /echo/abc HTTP/1.1\r\n\r\n").await;

    assert_eq!(
        raw,
        b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 3\r\n\r\nabc".to_vec()
    );
}

#[tokio::test]
async fn test_echo_gzip_over_the_wire() {
    let raw = exchange(b"GET /echo/banana HTTP/1.1\r\nAccept-Encoding: gzip\r\n\r\n").await;
    let (status, headers, body) = split_response(&raw);

    assert_eq!(status, "HTTP/1.1 200 OK");
    assert!(headers.contains(&"Content-Encoding: gzip".to_string()));
    assert!(headers.contains(&format!("Content-Length: {}", body.len())));
    assert_eq!(gunzip(&body), b"banana".to_vec());
}

#[tokio::test]
async fn test_user_agent_with_spaces() {
    let raw = exchange(
        b"GET /user-agent HTTP/1.1\r\nUser-Agent: Mozilla/5.0 (X11; Linux)\r\n\r\n",
    )
    .await;
    let (_, headers, body) = split_response(&raw);

    assert!(headers.contains(&"Content-Length: 24".to_string()));
    assert_eq!(body, b"Mozilla/5.0 (X11; Linux)".to_vec());
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let raw = exchange(b"GET /apple HTTP/1.1\r\n\r\n").await;

    assert_eq!(raw, b"HTTP/1.1 404 Not Found\r\n\r\n".to_vec());
}

#[tokio::test]
async fn test_unsupported_method_is_404() {
    let raw = exchange(b"DELETE / HTTP/1.1\r\n\r\n").await;

    assert_eq!(raw, b"HTTP/1.1 404 Not Found\r\n\r\n".to_vec());
}

#[tokio::test]
async fn test_single_token_request_line_is_404() {
    let raw = exchange(b"GET\r\n\r\n").await;

    assert_eq!(raw, b"HTTP/1.1 404 Not Found\r\n\r\n".to_vec());
}

#[tokio::test]
async fn test_malformed_header_is_404() {
    let raw = exchange(b"GET / HTTP/1.1\r\nno colon here\r\n\r\n").await;

    assert_eq!(raw, b"HTTP/1.1 404 Not Found\r\n\r\n".to_vec());
}

#[tokio::test]
async fn test_peer_closing_mid_head_still_answered() {
    let (mut client, server) = tokio::io::duplex(1024);
    let router = Arc::new(Router::new(FileStore::disabled()));
    let task = tokio::spawn(async move {
        Connection::new(server, router, Limits::default()).run().await
    });

    client.write_all(b"GET").await.unwrap();
    client.shutdown().await.unwrap();
    let mut out = Vec::new();
    client.read_to_end(&mut out).await.unwrap();

    task.await.unwrap().unwrap();
    assert_eq!(out, b"HTTP/1.1 404 Not Found\r\n\r\n".to_vec());
}

#[tokio::test]
async fn test_silent_peer_gets_no_response() {
    let raw = exchange(b"").await;

    assert!(raw.is_empty());
}

#[tokio::test]
async fn test_oversized_head_is_404() {
    let limits = Limits {
        max_head_bytes: 64,
        ..Limits::default()
    };
    let mut request = b"GET / HTTP/1.1\r\n".to_vec();
    request.extend_from_slice(format!("X-Filler: {}\r\n\r\n", "a".repeat(200)).as_bytes());

    let raw = exchange_with(Router::new(FileStore::disabled()), limits, &request).await;

    assert_eq!(raw, b"HTTP/1.1 404 Not Found\r\n\r\n".to_vec());
}

#[tokio::test]
async fn test_oversized_body_is_404() {
    let limits = Limits {
        max_body_bytes: 10,
        ..Limits::default()
    };
    let raw = exchange_with(
        Router::new(FileStore::disabled()),
        limits,
        b"POST /files/a HTTP/1.1\r\nContent-Length: 100\r\n\r\n",
    )
    .await;

    assert_eq!(raw, b"HTTP/1.1 404 Not Found\r\n\r\n".to_vec());
}

#[tokio::test]
async fn test_stalled_request_times_out() {
    let limits = Limits {
        header_read_timeout_secs: 1,
        ..Limits::default()
    };
    let (mut client, server) = tokio::io::duplex(1024);
    let router = Arc::new(Router::new(FileStore::disabled()));
    let task = tokio::spawn(async move { Connection::new(server, router, limits).run().await });

    // Never finish the head.
    client.write_all(b"GET / HTTP/1.1\r\n").await.unwrap();
    let mut out = Vec::new();
    client.read_to_end(&mut out).await.unwrap();

    task.await.unwrap().unwrap();
    assert_eq!(out, b"HTTP/1.1 404 Not Found\r\n\r\n".to_vec());
}

#[tokio::test]
async fn test_post_then_get_file() {
    let dir = TempDir::new("conn");

    let raw = exchange_with(
        Router::new(FileStore::new(dir.path())),
        Limits::default(),
        b"POST /files/foo.txt HTTP/1.1\r\nContent-Type: application/octet-stream\r\nContent-Length: 11\r\n\r\nhello world",
    )
    .await;
    assert_eq!(raw, b"HTTP/1.1 201 Created\r\nContent-Length: 0\r\n\r\n".to_vec());

    let raw = exchange_with(
        Router::new(FileStore::new(dir.path())),
        Limits::default(),
        b"GET /files/foo.txt HTTP/1.1\r\n\r\n",
    )
    .await;
    assert_eq!(
        raw,
        b"HTTP/1.1 200 OK\r\nContent-Type: application/octet-stream\r\nContent-Length: 11\r\n\r\nhello world"
            .to_vec()
    );
}

#[tokio::test]
async fn test_large_body_read_to_content_length() {
    let dir = TempDir::new("conn");
    let body: Vec<u8> = (0..100_000u32).map(|i| (i % 253) as u8 + 1).collect();
    let mut request =
        format!("POST /files/big.bin HTTP/1.1\r\nContent-Length: {}\r\n\r\n", body.len()).into_bytes();
    request.extend_from_slice(&body);

    let raw = exchange_with(Router::new(FileStore::new(dir.path())), Limits::default(), &request).await;

    assert!(raw.starts_with(b"HTTP/1.1 201 Created\r\n"));
    assert_eq!(std::fs::read(dir.path().join("big.bin")).unwrap(), body);
}

#[tokio::test]
async fn test_missing_file_over_the_wire() {
    let dir = TempDir::new("conn");

    let raw = exchange_with(
        Router::new(FileStore::new(dir.path())),
        Limits::default(),
        b"GET /files/missing.txt HTTP/1.1\r\n\r\n",
    )
    .await;

    assert_eq!(raw, b"HTTP/1.1 404 Not Found\r\n\r\n".to_vec());
}

#[tokio::test]
async fn test_binary_body_with_trailing_nuls_stored_verbatim() {
    let dir = TempDir::new("conn");

    let raw = exchange_with(
        Router::new(FileStore::new(dir.path())),
        Limits::default(),
        b"POST /files/b.bin HTTP/1.1\r\nContent-Length: 4\r\n\r\nab\0\0",
    )
    .await;
    assert!(raw.starts_with(b"HTTP/1.1 201 Created\r\n"));
    assert_eq!(std::fs::read(dir.path().join("b.bin")).unwrap(), b"ab\0\0".to_vec());

    let raw = exchange_with(
        Router::new(FileStore::new(dir.path())),
        Limits::default(),
        b"GET /files/b.bin HTTP/1.1\r\n\r\n",
    )
    .await;
    let (_, headers, body) = split_response(&raw);
    assert!(headers.contains(&"Content-Length: 4".to_string()));
    assert_eq!(body, b"ab\0\0".to_vec());
}
