//! Static file GET/POST under the served directory.
//!
//! Names are single path segments resolved against the configured root.
//! Anything that could step outside it is refused before the filesystem is
//! touched. Concurrent writes to the same name are not synchronized; the last
//! writer wins.

use std::io;
use std::path::PathBuf;

use crate::http::response::{Response, ResponseBuilder, StatusCode};

#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("no served directory configured")]
    NoDirectory,
    #[error("file name `{0}` rejected")]
    PathTraversalRejected(String),
    #[error("file not found: {0}")]
    NotFound(#[source] io::Error),
    #[error("file write failed: {0}")]
    WriteFailed(#[source] io::Error),
}

#[derive(Debug, Clone)]
pub struct FileStore {
    root: Option<PathBuf>,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// A store with no root; every file request answers 404.
    pub fn disabled() -> Self {
        Self { root: None }
    }

    pub fn from_option(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    /// Maps a file name onto a path inside the root.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, FileError> {
        let root = self.root.as_ref().ok_or(FileError::NoDirectory)?;

        let rejected = name.is_empty()
            || name == "."
            || name.contains("..")
            || name.contains(['/', '\\', '\0']);
        if rejected {
            return Err(FileError::PathTraversalRejected(name.to_string()));
        }

        Ok(root.join(name))
    }

    /// Reads the whole file, however large.
    pub async fn read(&self, name: &str) -> Result<Vec<u8>, FileError> {
        let path = self.resolve(name)?;
        tokio::fs::read(&path).await.map_err(FileError::NotFound)
    }

    /// Creates or truncates the file and writes `contents` to it.
    pub async fn write(&self, name: &str, contents: &[u8]) -> Result<(), FileError> {
        let path = self.resolve(name)?;
        tokio::fs::write(&path, contents)
            .await
            .map_err(FileError::WriteFailed)
    }
}

pub async fn handle_read(files: &FileStore, name: &str) -> Response {
    match files.read(name).await {
        Ok(contents) => ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", "application/octet-stream")
            .body(contents)
            .build(),
        Err(e) => {
            log_file_error(name, &e);
            Response::not_found()
        }
    }
}

pub async fn handle_write(files: &FileStore, name: &str, body: &[u8]) -> Response {
    match files.write(name, body).await {
        Ok(()) => {
            tracing::info!(file = name, bytes = body.len(), "file written");
            Response::created()
        }
        Err(e @ FileError::WriteFailed(_)) => {
            log_file_error(name, &e);
            Response::internal_error()
        }
        Err(e) => {
            log_file_error(name, &e);
            Response::not_found()
        }
    }
}

fn log_file_error(name: &str, e: &FileError) {
    match e {
        FileError::PathTraversalRejected(_) => tracing::warn!(file = name, "{}", e),
        FileError::WriteFailed(_) => tracing::error!(file = name, "{}", e),
        _ => tracing::debug!(file = name, "{}", e),
    }
}
