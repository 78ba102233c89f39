//! Reads a request's bytes off a connection.
//!
//! The head is read until the `\r\n\r\n` boundary shows up. The body is only
//! topped up on request, once the parser knows how long it should be.

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::config::Limits;
use crate::http::parser::find_headers_end;

const READ_CHUNK: usize = 4096;

#[derive(Debug, thiserror::Error)]
pub enum FramingError {
    #[error("connection read failed: {0}")]
    ConnectionReadFailed(#[from] std::io::Error),
    #[error("request head exceeds {limit} bytes")]
    HeadTooLarge { limit: usize },
    #[error("declared body of {declared} bytes exceeds {limit} bytes")]
    BodyTooLarge { declared: usize, limit: usize },
}

#[derive(Debug, Clone, Copy)]
pub struct FrameReader {
    max_head_bytes: usize,
    max_body_bytes: usize,
}

impl FrameReader {
    pub fn new(max_head_bytes: usize, max_body_bytes: usize) -> Self {
        Self {
            max_head_bytes,
            max_body_bytes,
        }
    }

    pub fn from_limits(limits: &Limits) -> Self {
        Self::new(limits.max_head_bytes, limits.max_body_bytes)
    }

    /// Reads until the header/body boundary, end of input, or the head limit.
    ///
    /// Returns `None` when the peer closed before sending anything. The
    /// returned bytes include the terminator and whatever body bytes arrived
    /// along with it.
    pub async fn read_head<R>(&self, stream: &mut R) -> Result<Option<BytesMut>, FramingError>
    where
        R: AsyncRead + Unpin,
    {
        let mut buffer = BytesMut::with_capacity(READ_CHUNK);
        let mut scanned: usize = 0;

        loop {
            if buffer.capacity() - buffer.len() < READ_CHUNK {
                buffer.reserve(READ_CHUNK);
            }

            let n = stream.read_buf(&mut buffer).await?;

            if n == 0 {
                if buffer.is_empty() {
                    return Ok(None);
                }
                tracing::debug!(bytes = buffer.len(), "peer closed before header boundary");
                return Ok(Some(buffer));
            }

            // The boundary may straddle two reads.
            let from = scanned.saturating_sub(3);
            if let Some(end) = find_headers_end(&buffer[from..]) {
                if from + end + 4 > self.max_head_bytes {
                    return Err(FramingError::HeadTooLarge {
                        limit: self.max_head_bytes,
                    });
                }
                return Ok(Some(buffer));
            }
            scanned = buffer.len();

            if buffer.len() > self.max_head_bytes {
                return Err(FramingError::HeadTooLarge {
                    limit: self.max_head_bytes,
                });
            }
        }
    }

    /// Tops `body` up to exactly `declared` bytes.
    ///
    /// Surplus bytes are dropped. If the peer closes early, the body keeps
    /// whatever did arrive.
    pub async fn read_body_remainder<R>(
        &self,
        stream: &mut R,
        body: &mut Vec<u8>,
        declared: usize,
    ) -> Result<(), FramingError>
    where
        R: AsyncRead + Unpin,
    {
        if declared > self.max_body_bytes {
            return Err(FramingError::BodyTooLarge {
                declared,
                limit: self.max_body_bytes,
            });
        }

        if body.len() >= declared {
            body.truncate(declared);
            return Ok(());
        }

        body.reserve(declared - body.len());
        let mut chunk = [0u8; READ_CHUNK];

        while body.len() < declared {
            let want = (declared - body.len()).min(READ_CHUNK);
            let n = stream.read(&mut chunk[..want]).await?;

            if n == 0 {
                tracing::debug!(
                    received = body.len(),
                    declared,
                    "peer closed before full body arrived"
                );
                break;
            }

            body.extend_from_slice(&chunk[..n]);
        }

        Ok(())
    }
}
