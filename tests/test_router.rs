use forge::handlers::{FileStore, RouteHandler};
use forge::http::request::{Method, Request, RequestBuilder};
use forge::http::response::StatusCode;
use forge::routing::{PathMatch, PathPattern, Router};

fn get(path: &str) -> Request {
    RequestBuilder::new().method(Method::GET).path(path).build().unwrap()
}

fn post(path: &str) -> Request {
    RequestBuilder::new().method(Method::POST).path(path).build().unwrap()
}

#[test]
fn test_pattern_parse() {
    assert_eq!(PathPattern::parse("/files/*"), PathPattern::Prefix("files".into()));
    assert_eq!(PathPattern::parse("/user-agent"), PathPattern::Exact("/user-agent".into()));
    assert_eq!(PathPattern::parse("/*"), PathPattern::Exact("/*".into()));
}

#[test]
fn test_exact_pattern() {
    let p = PathPattern::parse("/user-agent");
    assert_eq!(p.matches("/user-agent"), Some(PathMatch::Exact));
    assert_eq!(p.matches("/user-agent/"), None);
    assert_eq!(p.matches("/User-Agent"), None);
}

#[test]
fn test_wildcard_capture_keeps_slashes() {
    let p = PathPattern::parse("/echo/*");
    let m = p.matches("/echo/a/b/c").unwrap();
    assert_eq!(m.capture(), Some("a/b/c"));
}

#[test]
fn test_default_routes() {
    let router = Router::new(FileStore::disabled());

    let cases = [
        (get("/files/a.txt"), RouteHandler::ReadFile, Some("a.txt")),
        (post("/files/a.txt"), RouteHandler::WriteFile, Some("a.txt")),
        (get("/echo/hello"), RouteHandler::Echo, Some("hello")),
        (get("/"), RouteHandler::Root, None),
        (get(""), RouteHandler::Root, None),
        (get("/user-agent"), RouteHandler::UserAgent, None),
    ];

    for (req, handler, capture) in cases {
        let m = router.route(&req).unwrap_or_else(|| panic!("{} unmatched", req.path));
        assert_eq!(*m.handler, handler, "{}", req.path);
        assert_eq!(m.capture, capture, "{}", req.path);
    }
}

#[test]
fn test_unmatched_requests() {
    let router = Router::new(FileStore::disabled());

    for req in [
        post("/"),
        post("/echo/abc"),
        post("/user-agent"),
        get("/echo"),
        get("/files"),
        get("/index.html"),
        get("/user-agent/extra"),
    ] {
        assert!(router.route(&req).is_none(), "{:?} {} matched", req.method, req.path);
    }
}

#[tokio::test]
async fn test_dispatch_fallback_is_bare_404() {
    let router = Router::new(FileStore::disabled());

    let response = router.dispatch(&get("/nowhere")).await;

    assert_eq!(response.status, StatusCode::NotFound);
    assert!(response.headers.is_empty());
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn test_empty_router_matches_nothing() {
    let router = Router::empty(FileStore::disabled());

    let response = router.dispatch(&get("/")).await;

    assert_eq!(response.status, StatusCode::NotFound);
}

#[tokio::test]
async fn test_custom_route_registration() {
    let router = Router::empty(FileStore::disabled()).add(Method::POST, "/ping", RouteHandler::Root);

    let response = router.dispatch(&post("/ping")).await;

    assert_eq!(response.status, StatusCode::Ok);
}
