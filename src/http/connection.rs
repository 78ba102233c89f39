use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;

use crate::config::Limits;
use crate::http::framing::{FrameReader, FramingError};
use crate::http::parser::parse_http_request;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::routing::Router;

/// One accepted connection, serving exactly one request.
pub struct Connection<S> {
    stream: S,
    router: Arc<Router>,
    framing: FrameReader,
    limits: Limits,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

/// What came off the wire.
enum Incoming {
    Request(Request),
    /// Unparseable or oversized; answered with a best-effort 404.
    Rejected,
    /// Peer closed before sending anything.
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, router: Arc<Router>, limits: Limits) -> Self {
        Self {
            stream,
            router,
            framing: FrameReader::from_limits(&limits),
            limits,
            state: ConnectionState::Reading,
        }
    }

    /// Drives the connection to completion, bounded by the connection timeout.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let lifetime = self.limits.connection_timeout();

        let result = match timeout(lifetime, self.drive()).await {
            Ok(res) => res,
            Err(_) => {
                tracing::warn!(timeout = ?lifetime, "connection timed out");
                Ok(())
            }
        };

        // The peer may already be gone.
        let _ = self.stream.shutdown().await;
        result
    }

    async fn drive(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    let read_timeout = self.limits.header_read_timeout();

                    let incoming = timeout(read_timeout, self.read_request()).await;

                    self.state = match incoming {
                        Ok(Ok(Incoming::Request(req))) => ConnectionState::Processing(req),
                        Ok(Ok(Incoming::Rejected)) => {
                            ConnectionState::Writing(ResponseWriter::new(&Response::not_found()))
                        }
                        Ok(Ok(Incoming::Closed)) => ConnectionState::Closed,
                        Ok(Err(e)) => return Err(e.into()),
                        Err(_) => {
                            tracing::warn!(timeout = ?read_timeout, "timed out reading request");
                            ConnectionState::Writing(ResponseWriter::new(&Response::not_found()))
                        }
                    };
                }

                ConnectionState::Processing(req) => {
                    tracing::info!(method = req.method.as_str(), path = %req.path, "request");

                    let response = self.router.dispatch(&req).await;
                    tracing::info!(
                        method = req.method.as_str(),
                        path = %req.path,
                        status = response.status.as_u16(),
                        body_len = response.body.len(),
                        "response"
                    );

                    self.state = ConnectionState::Writing(ResponseWriter::new(&response));
                }

                ConnectionState::Writing(mut writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => break,
            }
        }

        Ok(())
    }

    async fn read_request(&mut self) -> Result<Incoming, FramingError> {
        let head = match self.framing.read_head(&mut self.stream).await {
            Ok(Some(head)) => head,
            Ok(None) => return Ok(Incoming::Closed),
            Err(e @ FramingError::ConnectionReadFailed(_)) => return Err(e),
            Err(e) => {
                tracing::warn!(error = %e, "rejecting request");
                return Ok(Incoming::Rejected);
            }
        };

        let mut request = match parse_http_request(&head) {
            Ok(req) => req,
            Err(e) => {
                tracing::warn!(error = %e, "rejecting malformed request");
                return Ok(Incoming::Rejected);
            }
        };

        if let Some(declared) = request.content_length() {
            match self
                .framing
                .read_body_remainder(&mut self.stream, &mut request.body, declared)
                .await
            {
                Ok(()) => {}
                Err(e @ FramingError::ConnectionReadFailed(_)) => return Err(e),
                Err(e) => {
                    tracing::warn!(error = %e, "rejecting request");
                    return Ok(Incoming::Rejected);
                }
            }
        }

        Ok(Incoming::Request(request))
    }
}
