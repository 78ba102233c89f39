//! Route lookup and dispatch.
//!
//! Routes are scanned in registration order and the first one whose
//! predicate holds is invoked. A request nothing matches gets a bare 404.

use crate::handlers::{FileStore, RouteHandler};
use crate::http::request::{Method, Request};
use crate::http::response::Response;
use crate::routing::matcher::RoutePredicate;

#[derive(Debug, Clone)]
struct Route {
    predicate: RoutePredicate,
    handler: RouteHandler,
}

/// The route selected for a request, with its wildcard capture if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteMatch<'r, 'a> {
    pub handler: &'r RouteHandler,
    pub capture: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<Route>,
    files: FileStore,
}

impl Router {
    /// The server's route table, most specific first.
    pub fn new(files: FileStore) -> Self {
        Self::empty(files)
            .add(Method::GET, "/files/*", RouteHandler::ReadFile)
            .add(Method::POST, "/files/*", RouteHandler::WriteFile)
            .add(Method::GET, "/echo/*", RouteHandler::Echo)
            .add(Method::GET, "/", RouteHandler::Root)
            .add(Method::GET, "/user-agent", RouteHandler::UserAgent)
    }

    /// A router with no routes; every request falls through to 404.
    pub fn empty(files: FileStore) -> Self {
        Self {
            routes: Vec::new(),
            files,
        }
    }

    /// Appends a route. Earlier registrations take precedence.
    pub fn add(mut self, method: Method, pattern: &str, handler: RouteHandler) -> Self {
        self.routes.push(Route {
            predicate: RoutePredicate::new(method, pattern),
            handler,
        });
        self
    }

    pub fn route<'r, 'a>(&'r self, req: &'a Request) -> Option<RouteMatch<'r, 'a>> {
        self.routes.iter().find_map(|route| {
            route.predicate.matches(req).map(|m| RouteMatch {
                handler: &route.handler,
                capture: m.capture(),
            })
        })
    }

    pub async fn dispatch(&self, req: &Request) -> Response {
        match self.route(req) {
            Some(m) => m.handler.handle(req, m.capture, &self.files).await,
            None => {
                tracing::debug!(method = req.method.as_str(), path = %req.path, "no route matched");
                Response::not_found()
            }
        }
    }
}
