//! Radix-tree request router with a middleware chain.
//!
//! One tree per HTTP method, O(path-length) lookup. Layers added with
//! [`Router::layer`] wrap the routing step; the first layer added sees the
//! request first and the response last.

use std::collections::HashMap;
use std::sync::Arc;

use http::{Method, StatusCode};
use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};
use crate::middleware::{BoxedMiddleware, Middleware, Next};
use crate::request::Request;
use crate::response::Response;

/// The application router.
///
/// Build it once at startup and pass it to [`Server::serve`](crate::Server::serve).
/// Every builder method returns `self` so registrations chain naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
    pub(crate) layers: Vec<BoxedMiddleware>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), layers: Vec::new() }
    }

    /// Register a handler for a method + path pair.
    ///
    /// Path parameters use `{name}` syntax and are read back with
    /// [`Request::param`]:
    ///
    /// ```rust,no_run
    /// # use redo::{Method, Request, Response, Router};
    /// # async fn post(_: Request) -> Response { Response::html("") }
    /// # async fn index(_: Request) -> Response { Response::html("") }
    /// Router::new()
    ///     .on(Method::GET, "/",             index)
    ///     .on(Method::GET, "/posts/{slug}", post);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route pattern or conflicts with an
    /// existing one. Routes are registered at startup, so this surfaces
    /// before the server accepts traffic.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::GET, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::POST, path, handler)
    }

    /// Wrap everything registered on this router in `middleware`.
    pub fn layer(mut self, middleware: impl Middleware) -> Self {
        self.layers.push(Arc::new(middleware));
        self
    }

    /// Runs one request through the layers and the routing table.
    ///
    /// This is what the server calls per request; tests can call it
    /// directly without a socket.
    pub async fn handle(self: &Arc<Self>, req: Request) -> Response {
        Next::new(Arc::clone(self)).run(req).await
    }

    /// Innermost step of the chain: route lookup and handler call.
    pub(crate) async fn route(&self, mut req: Request) -> Response {
        match self.lookup(&req.method, &req.path) {
            Some((handler, params)) => {
                req.params = params;
                handler.call(req).await
            }
            None => Response::status(StatusCode::NOT_FOUND),
        }
    }

    fn lookup(
        &self,
        method: &Method,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    fn get(path: &str) -> Request {
        Request::new(
            http::Request::builder()
                .uri(path)
                .body(Bytes::new())
                .unwrap(),
        )
    }

    async fn show(req: Request) -> String {
        format!("post {}", req.param("slug").unwrap_or("?"))
    }

    #[tokio::test]
    async fn test_routes_with_params() {
        let app = Arc::new(Router::new().get("/posts/{slug}", show));
        let res = app.handle(get("/posts/hello")).await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.body(), b"post hello");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app = Arc::new(Router::new().get("/posts/{slug}", show));
        let res = app.handle(get("/nope")).await;
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_method_mismatch_is_404() {
        let app = Arc::new(Router::new().post("/posts/{slug}", show));
        let res = app.handle(get("/posts/hello")).await;
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    #[should_panic(expected = "invalid route")]
    fn test_conflicting_route_panics() {
        let _ = Router::new().get("/a/{x}", show).get("/a/{y}", show);
    }
}
