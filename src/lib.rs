//! # redo
//!
//! A small async HTTP framework whose responses go out minified.
//!
//! The centrepiece is [`minify::minify`], a regex-driven HTML minifier that
//! also compacts inline CSS, JavaScript and JSON-LD. The
//! [`MinifyHtml`](middleware::MinifyHtml) middleware applies it to every
//! `text/html` response and fixes up `Content-Length`.
//!
//! Around it:
//!
//! - Radix-tree routing via [`matchit`], one tree per method
//! - A middleware chain: tracing, maintenance mode, admin-site gate
//! - [`Settings`] from TOML plus environment overrides
//! - hyper serving (HTTP/1.1 and HTTP/2) with graceful shutdown
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use redo::middleware::{AdminGate, Maintenance, MinifyHtml, Trace};
//! use redo::{Request, Response, Router, Server, Settings};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), redo::Error> {
//!     let settings = Settings::from_env()?;
//!
//!     let app = Router::new()
//!         .get("/", index)
//!         .get("/posts/{slug}", post)
//!         .layer(Trace)
//!         .layer(Maintenance::new(&settings.maintenance))
//!         .layer(AdminGate::new(&settings.admin))
//!         .layer(MinifyHtml::new(&settings.minify));
//!
//!     Server::from_settings(&settings).serve(app).await
//! }
//!
//! async fn index(_req: Request) -> Response {
//!     Response::html("<html>\n  <body>\n    <h1>Hello</h1>\n  </body>\n</html>")
//! }
//!
//! async fn post(req: Request) -> Response {
//!     let slug = req.param("slug").unwrap_or("unknown");
//!     Response::html(format!("<article>  <h1>{slug}</h1>  </article>"))
//! }
//! ```

mod error;
mod handler;
mod request;
mod response;
mod router;
mod server;

pub mod config;
pub mod middleware;
pub mod minify;

pub use config::Settings;
pub use error::Error;
pub use handler::{BoxFuture, Handler};
pub use http::{Method, StatusCode};
pub use request::Request;
pub use response::{ContentType, IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
