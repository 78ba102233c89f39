use crate::http::request::{Method, Request};
use std::collections::HashMap;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed request line")]
    MalformedRequestLine,
    #[error("malformed header line")]
    MalformedHeader,
    #[error("unsupported method `{0}`")]
    UnsupportedMethod(String),
}

/// Parses a request out of the bytes handed over by the framing reader.
///
/// Everything before the first `\r\n\r\n` is the head, everything after it is
/// the body. A blob without the terminator is treated as head only.
pub fn parse_http_request(buf: &[u8]) -> Result<Request, ParseError> {
    let (head, body) = match find_headers_end(buf) {
        Some(end) => (&buf[..end], &buf[end + 4..]),
        None => (buf, &buf[buf.len()..]),
    };

    let (request_line, header_block) = match head.windows(2).position(|w| w == b"\r\n") {
        Some(i) => (&head[..i], &head[i + 2..]),
        None => (head, &head[head.len()..]),
    };

    let request_line =
        std::str::from_utf8(request_line).map_err(|_| ParseError::MalformedRequestLine)?;

    // Single spaces only; the version token keeps whatever trails it.
    let mut parts = request_line.splitn(3, ' ');
    let method_str = parts.next().ok_or(ParseError::MalformedRequestLine)?;
    let path = parts.next().ok_or(ParseError::MalformedRequestLine)?;
    let version = parts.next().ok_or(ParseError::MalformedRequestLine)?;

    let method = Method::from_str(method_str)
        .ok_or_else(|| ParseError::UnsupportedMethod(method_str.to_string()))?;

    let path = match path {
        "" => "/",
        p if p.starts_with('/') => p,
        _ => return Err(ParseError::MalformedRequestLine),
    };

    let headers = parse_headers(header_block)?;

    Ok(Request {
        method,
        path: path.to_string(),
        version: version.to_string(),
        headers,
        body: body.to_vec(),
    })
}

fn parse_headers(block: &[u8]) -> Result<HashMap<String, String>, ParseError> {
    let block = std::str::from_utf8(block).map_err(|_| ParseError::MalformedHeader)?;
    let mut headers = HashMap::new();

    for line in block.split("\r\n") {
        if line.is_empty() {
            continue;
        }

        let (key, value) = line.split_once(':').ok_or(ParseError::MalformedHeader)?;

        // Last occurrence wins.
        headers.insert(key.to_string(), value.trim().to_string());
    }

    Ok(headers)
}

pub(crate) fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}
