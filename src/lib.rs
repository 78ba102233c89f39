//! Forge - a minimal HTTP/1.1 server over raw TCP.
//!
//! Requests are framed, parsed, routed and answered by hand; no HTTP library
//! sits underneath.

pub mod config;
pub mod handlers;
pub mod http;
pub mod routing;
pub mod server;
