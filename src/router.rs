//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. Sub-routers can be
//! mounted under a prefix with [`Router::nest`], which is how the `/api`
//! surface is attached to the root router.

use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;

use http::StatusCode;
use http_body_util::BodyExt;
use hyper::body::Body;
use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;

/// The application router.
///
/// Build it once at startup and pass it to [`Server::serve`](crate::Server::serve).
/// Each registration returns `self` so calls chain naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
    // Registration order, kept so the router can be re-mounted under a prefix.
    entries: Vec<(Method, String, BoxedHandler)>,
}

enum Lookup {
    Found(BoxedHandler, HashMap<String, String>),
    MethodNotAllowed,
    NotFound,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), entries: Vec::new() }
    }

    /// Register a handler for a method + path pair.
    ///
    /// Path parameters use `{name}` syntax and are read back with
    /// `req.param("name")`.
    ///
    /// # Panics
    ///
    /// Panics if `path` conflicts with an already registered route or is not
    /// a valid route pattern.
    pub fn on(self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.add(method, path.to_owned(), handler.into_boxed_handler())
    }

    /// Mounts every route of `router` under `prefix`.
    ///
    /// ```rust
    /// # use trustproofs::{Method, Request, Router};
    /// # async fn list(_: Request) -> &'static str { "" }
    /// let api = Router::new().on(Method::Get, "/trust-proofs", list);
    /// let app = Router::new().nest("/api", api); // GET /api/trust-proofs
    /// ```
    pub fn nest(mut self, prefix: &str, router: Router) -> Self {
        let prefix = prefix.trim_end_matches('/');
        for (method, path, handler) in router.entries {
            let full = if path == "/" { format!("{prefix}/") } else { format!("{prefix}{path}") };
            self = self.add(method, full, handler);
        }
        self
    }

    fn add(mut self, method: Method, path: String, handler: BoxedHandler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path.clone(), Arc::clone(&handler))
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self.entries.push((method, path, handler));
        self
    }

    fn lookup(&self, method: Method, path: &str) -> Lookup {
        let mut found = self.find(method, path);
        // HEAD is served by the GET handler wherever no HEAD handler exists.
        if found.is_none() && method == Method::Head {
            found = self.find(Method::Get, path);
        }
        if let Some(found) = found {
            return found;
        }

        let elsewhere = self.routes.iter()
            .any(|(m, tree)| *m != method && at(tree, path).is_some());
        if elsewhere { Lookup::MethodNotAllowed } else { Lookup::NotFound }
    }

    fn find(&self, method: Method, path: &str) -> Option<Lookup> {
        let matched = at(self.routes.get(&method)?, path)?;
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some(Lookup::Found(Arc::clone(matched.value), params))
    }

    /// Routes one request and produces its one response.
    ///
    /// The body is buffered before the handler runs. Unknown paths get `404`,
    /// known paths with no handler for the method get `405`, and a body that
    /// fails mid-read gets `400`. `HEAD` falls back to the `GET` handler and
    /// answers with its headers only. A trailing slash is ignored when the
    /// exact path has no route.
    pub async fn dispatch<B>(&self, req: http::Request<B>) -> Response
    where
        B: Body,
        B::Error: Display,
    {
        let (parts, body) = req.into_parts();

        let Ok(method) = Method::try_from(&parts.method) else {
            return Response::status(StatusCode::METHOD_NOT_ALLOWED);
        };

        let (handler, params) = match self.lookup(method, parts.uri.path()) {
            Lookup::Found(handler, params) => (handler, params),
            Lookup::MethodNotAllowed => return Response::status(StatusCode::METHOD_NOT_ALLOWED),
            Lookup::NotFound => return Response::status(StatusCode::NOT_FOUND),
        };

        let body = match body.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read request body");
                return Response::status(StatusCode::BAD_REQUEST);
            }
        };

        let response = handler.call(Request::new(method, parts, body, params)).await;
        if method == Method::Head { response.into_head() } else { response }
    }
}

/// Exact match first, then the path without its trailing slash, so
/// `/api/trust-proofs/` reaches the `/api/trust-proofs` handler.
fn at<'t, 'p>(
    tree: &'t MatchitRouter<BoxedHandler>,
    path: &'p str,
) -> Option<matchit::Match<'t, 'p, &'t BoxedHandler>> {
    if let Ok(matched) = tree.at(path) {
        return Some(matched);
    }
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() || trimmed.len() == path.len() {
        return None;
    }
    tree.at(trimmed).ok()
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use http_body_util::Empty;

    use super::*;

    fn get(path: &str) -> http::Request<Empty<Bytes>> {
        http::Request::get(path).body(Empty::new()).unwrap()
    }

    async fn echo_id(req: Request) -> String {
        req.param("id").unwrap_or("none").to_owned()
    }

    #[tokio::test]
    async fn nested_routes_are_prefixed() {
        let api = Router::new()
            .on(Method::Get, "/", |_req: Request| async { "index" })
            .on(Method::Get, "/items/{id}", echo_id);
        let app = Router::new().nest("/api/", api);

        assert_eq!(app.dispatch(get("/api/items/7")).await.body(), b"7");
        assert_eq!(app.dispatch(get("/api/")).await.body(), b"index");
        assert_eq!(app.dispatch(get("/items/7")).await.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn wrong_method_is_405() {
        let app = Router::new().on(Method::Get, "/x", |_req: Request| async { "x" });
        let req = http::Request::post("/x").body(Empty::<Bytes>::new()).unwrap();
        assert_eq!(app.dispatch(req).await.status_code(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn handler_sees_buffered_body() {
        let app = Router::new().on(Method::Post, "/len", |req: Request| async move {
            req.body().len().to_string()
        });
        let req = http::Request::post("/len")
            .body(http_body_util::Full::new(Bytes::from_static(b"abcd")))
            .unwrap();
        assert_eq!(app.dispatch(req).await.body(), b"4");
    }

    #[tokio::test]
    async fn head_uses_get_handler_without_body() {
        let app = Router::new().on(Method::Get, "/x", |_req: Request| async { "four" });
        let req = http::Request::head("/x").body(Empty::<Bytes>::new()).unwrap();

        let res = app.dispatch(req).await;

        assert_eq!(res.status_code(), StatusCode::OK);
        assert!(res.body().is_empty());
        assert_eq!(res.header("content-length"), Some("4"));
        assert_eq!(res.header("content-type"), Some("text/plain; charset=utf-8"));
    }

    #[tokio::test]
    async fn trailing_slash_reaches_route() {
        let app = Router::new()
            .nest("/api", Router::new().on(Method::Get, "/items/{id}", echo_id));

        assert_eq!(app.dispatch(get("/api/items/9/")).await.body(), b"9");
        assert_eq!(app.dispatch(get("/api/items/9//")).await.body(), b"9");
        assert_eq!(app.dispatch(get("/")).await.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn handler_reads_request_line_and_headers() {
        let app = Router::new().on(Method::Delete, "/proofs/{id}", |req: Request| async move {
            format!(
                "{} {} {} {}",
                req.method(),
                req.path(),
                req.param("id").unwrap_or("-"),
                req.header("X-Request-Id").unwrap_or("-"),
            )
        });
        let req = http::Request::delete("/proofs/7?force=1")
            .header("x-request-id", "abc")
            .body(Empty::<Bytes>::new())
            .unwrap();

        assert_eq!(app.dispatch(req).await.body(), b"DELETE /proofs/7 7 abc");
    }

    #[test]
    #[should_panic(expected = "invalid route")]
    fn conflicting_route_panics() {
        let _ = Router::new()
            .on(Method::Get, "/a", |_req: Request| async { "" })
            .on(Method::Get, "/a", |_req: Request| async { "" });
    }
}
