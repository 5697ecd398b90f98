//! Middleware layer.
//!
//! A middleware sees every request before the router does and every
//! response after. It receives the request plus a [`Next`] handle to the
//! rest of the chain, and may answer on its own, call `next.run(req)`, or
//! rewrite what comes back.
//!
//! Built-in layers:
//!
//! | Layer           | Concern                                          |
//! |-----------------|--------------------------------------------------|
//! | [`Trace`]       | one log line per request: method, path, status   |
//! | [`Maintenance`] | 503 for everything while maintenance mode is on  |
//! | [`AdminGate`]   | 404 for the admin prefix while admin is disabled |
//! | [`MinifyHtml`]  | minify `text/html` response bodies               |
//!
//! ```rust,no_run
//! use redo::middleware::{AdminGate, MinifyHtml, Trace};
//! use redo::{Request, Response, Router, Settings};
//! # async fn index(_: Request) -> Response { Response::html("") }
//!
//! let settings = Settings::default();
//! let app = Router::new()
//!     .get("/", index)
//!     .layer(Trace)
//!     .layer(AdminGate::new(&settings.admin))
//!     .layer(MinifyHtml::new(&settings.minify));
//! ```
//!
//! Writing your own:
//!
//! ```rust
//! use redo::middleware::{Middleware, Next};
//! use redo::{BoxFuture, Request};
//!
//! struct PoweredBy;
//!
//! impl Middleware for PoweredBy {
//!     fn call(&self, req: Request, next: Next) -> BoxFuture {
//!         Box::pin(async move {
//!             let mut res = next.run(req).await;
//!             res.headers_mut().insert("x-powered-by", "redo".parse().unwrap());
//!             res
//!         })
//!     }
//! }
//! ```

mod admin;
mod maintenance;
mod minify;
mod trace;

use std::sync::Arc;

use crate::handler::BoxFuture;
use crate::request::Request;
use crate::router::Router;

pub use admin::AdminGate;
pub use maintenance::Maintenance;
pub use minify::MinifyHtml;
pub use trace::Trace;

/// A layer wrapped around the router.
pub trait Middleware: Send + Sync + 'static {
    fn call(&self, req: Request, next: Next) -> BoxFuture;
}

pub(crate) type BoxedMiddleware = Arc<dyn Middleware>;

/// The remainder of the chain after the current layer.
pub struct Next {
    router: Arc<Router>,
    index: usize,
}

impl Next {
    pub(crate) fn new(router: Arc<Router>) -> Self {
        Self { router, index: 0 }
    }

    /// Passes the request to the next layer, or to the router once every
    /// layer has run.
    pub fn run(self, req: Request) -> BoxFuture {
        Box::pin(async move {
            match self.router.layers.get(self.index).cloned() {
                Some(layer) => {
                    let next = Next { router: Arc::clone(&self.router), index: self.index + 1 };
                    layer.call(req, next).await
                }
                None => self.router.route(req).await,
            }
        })
    }
}
