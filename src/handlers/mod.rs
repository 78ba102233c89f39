//! Route handlers.
//!
//! Each variant of [`RouteHandler`] serves one capability. Handlers never
//! fail: every error is turned into a well-formed response here.

pub mod echo;
pub mod files;
pub mod user_agent;

pub use files::{FileError, FileStore};

use crate::http::request::Request;
use crate::http::response::{Response, StatusCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteHandler {
    /// 200 with no headers and no body.
    Root,
    UserAgent,
    Echo,
    ReadFile,
    WriteFile,
}

impl RouteHandler {
    pub async fn handle(&self, req: &Request, capture: Option<&str>, files: &FileStore) -> Response {
        let capture = capture.unwrap_or("");

        match self {
            RouteHandler::Root => Response::empty(StatusCode::Ok),
            RouteHandler::UserAgent => user_agent::handle(req),
            RouteHandler::Echo => echo::handle(req, capture),
            RouteHandler::ReadFile => files::handle_read(files, capture).await,
            RouteHandler::WriteFile => files::handle_write(files, capture, req.payload()).await,
        }
    }
}
