//! HTTP protocol implementation.
//!
//! A hand-rolled HTTP/1.1 subset: one request per connection, GET and POST,
//! no chunked encoding.
//!
//! # Architecture
//!
//! - **`connection`**: Per-connection state machine with read and lifetime timeouts
//! - **`framing`**: Reads the request head off the socket, then the declared body
//! - **`parser`**: Parses the request line, headers and body out of raw bytes
//! - **`request`**: HTTP request representation
//! - **`response`**: HTTP response representation with builder pattern
//! - **`encoding`**: gzip content encoding and `Accept-Encoding` negotiation
//! - **`writer`**: Serializes and writes HTTP responses to the client
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Read head, parse, top up body
//!        └──────┬──────┘
//!               │ Request parsed          (malformed → 404 → Writing)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Route and run the handler
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ▼
//!             Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use forge::config::Limits;
//! use forge::handlers::FileStore;
//! use forge::http::connection::Connection;
//! use forge::routing::Router;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:4221").await?;
//!     let router = Arc::new(Router::new(FileStore::new("/tmp")));
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let router = router.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, router, Limits::default());
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod encoding;
pub mod framing;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
