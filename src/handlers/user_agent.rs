use crate::http::request::Request;
use crate::http::response::{Response, ResponseBuilder, StatusCode};

/// Reflects the `User-Agent` header back as plain text.
///
/// A missing header is answered with an empty body rather than an error.
pub fn handle(req: &Request) -> Response {
    let agent = req.header("User-Agent").unwrap_or_default();

    ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "text/plain")
        .body(agent.as_bytes().to_vec())
        .build()
}
