use crate::http::encoding::{accepts_gzip, gzip};
use crate::http::request::Request;
use crate::http::response::{Response, ResponseBuilder, StatusCode};

/// Echoes the wildcard capture of `/echo/*`, gzip-compressed when the client
/// accepts it.
pub fn handle(req: &Request, text: &str) -> Response {
    let builder = ResponseBuilder::new(StatusCode::Ok).header("Content-Type", "text/plain");

    let wants_gzip = req.header("Accept-Encoding").is_some_and(accepts_gzip);
    if !wants_gzip {
        return builder.body(text.as_bytes().to_vec()).build();
    }

    match gzip(text.as_bytes()) {
        Ok(compressed) => builder
            .header("Content-Encoding", "gzip")
            .body(compressed)
            .build(),
        Err(e) => {
            tracing::error!(error = %e, "gzip compression failed");
            Response::internal_error()
        }
    }
}
