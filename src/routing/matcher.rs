//! Route matching logic.
//!
//! A path pattern is either a literal path, or `{prefix}/*`: the first
//! segment must equal `prefix` and everything after `/{prefix}/` is captured
//! as a single parameter, slashes included. Matching is case-sensitive.

use crate::http::request::{Method, Request};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    Exact(String),
    Prefix(String),
}

/// Outcome of a successful path match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMatch<'a> {
    Exact,
    Wildcard(&'a str),
}

impl<'a> PathMatch<'a> {
    pub fn capture(&self) -> Option<&'a str> {
        match self {
            PathMatch::Exact => None,
            PathMatch::Wildcard(rest) => Some(rest),
        }
    }
}

impl PathPattern {
    /// Parses `"/echo/*"` into a prefix pattern and anything else into an
    /// exact one.
    ///
    /// ```
    /// # use forge::routing::PathPattern;
    /// assert_eq!(PathPattern::parse("/echo/*"), PathPattern::Prefix("echo".into()));
    /// assert_eq!(PathPattern::parse("/"), PathPattern::Exact("/".into()));
    /// ```
    pub fn parse(pattern: &str) -> Self {
        match pattern
            .strip_prefix('/')
            .and_then(|p| p.strip_suffix("/*"))
        {
            Some(prefix) if !prefix.is_empty() && !prefix.contains('/') => {
                PathPattern::Prefix(prefix.to_string())
            }
            _ => PathPattern::Exact(pattern.to_string()),
        }
    }

    pub fn matches<'a>(&self, path: &'a str) -> Option<PathMatch<'a>> {
        match self {
            PathPattern::Exact(expected) => (path == expected).then_some(PathMatch::Exact),
            PathPattern::Prefix(prefix) => path
                .strip_prefix('/')
                .and_then(|p| p.strip_prefix(prefix.as_str()))
                .and_then(|p| p.strip_prefix('/'))
                .map(PathMatch::Wildcard),
        }
    }
}

/// Method equality combined with a path pattern.
#[derive(Debug, Clone)]
pub struct RoutePredicate {
    pub method: Method,
    pub pattern: PathPattern,
}

impl RoutePredicate {
    pub fn new(method: Method, pattern: &str) -> Self {
        Self {
            method,
            pattern: PathPattern::parse(pattern),
        }
    }

    pub fn matches<'a>(&self, req: &'a Request) -> Option<PathMatch<'a>> {
        if req.method != self.method {
            return None;
        }
        self.pattern.matches(&req.path)
    }
}
