//! Response content encoding.

use std::io::{self, Write};

use flate2::Compression;
use flate2::write::GzEncoder;

/// Gzip-compresses `data` at the default level.
pub fn gzip(data: &[u8]) -> io::Result<Vec<u8>> {
    let buf = Vec::with_capacity(data.len() / 2 + 32);
    let mut encoder = GzEncoder::new(buf, Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Whether an `Accept-Encoding` value lists gzip.
///
/// Tokens are comma separated, trimmed and compared ignoring ASCII case.
/// Parameters are dropped, except that an explicit `q=0` refuses the coding.
pub fn accepts_gzip(accept_encoding: &str) -> bool {
    accept_encoding.split(',').any(|token| {
        let mut params = token.split(';');
        let coding = params.next().unwrap_or("").trim();

        coding.eq_ignore_ascii_case("gzip") && !params.any(|p| is_zero_quality(p.trim()))
    })
}

fn is_zero_quality(param: &str) -> bool {
    match param.split_once('=') {
        Some((name, value)) if name.trim().eq_ignore_ascii_case("q") => value
            .trim()
            .parse::<f32>()
            .map(|q| q == 0.0)
            .unwrap_or(false),
        _ => false,
    }
}
