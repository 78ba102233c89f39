//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Parsed Request (method, path)
//!     → router.rs (ordered route scan)
//!     → matcher.rs (method + path pattern)
//!     → Return: handler + wildcard capture, or the 404 fallback
//! ```
//!
//! Routes are registered once at startup and never change afterwards, so a
//! single `Arc<Router>` is shared by every connection. First match wins.

pub mod matcher;
pub mod router;

pub use matcher::{PathMatch, PathPattern, RoutePredicate};
pub use router::{RouteMatch, Router};
