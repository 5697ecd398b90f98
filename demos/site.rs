//! A tiny site served through every built-in middleware.
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example site [-- path/to/redo.toml]
//!
//! Try:
//!   curl -i http://localhost:8000/
//!   curl -i http://localhost:8000/posts/hello-world
//!   curl -i http://localhost:8000/admin/
//!   MAINTENANCE_MODE=true cargo run --example site

use redo::middleware::{AdminGate, Maintenance, MinifyHtml, Trace};
use redo::{Request, Response, Router, Server, Settings};

#[tokio::main]
async fn main() -> Result<(), redo::Error> {
    tracing_subscriber::fmt::init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path)?,
        None => Settings::from_env()?,
    };

    let app = Router::new()
        .get("/", index)
        .get("/posts/{slug}", post)
        .get("/admin/", admin)
        .layer(Trace)
        .layer(Maintenance::new(&settings.maintenance))
        .layer(AdminGate::new(&settings.admin))
        .layer(MinifyHtml::new(&settings.minify));

    Server::from_settings(&settings).serve(app).await
}

// GET /
//
// Indented, commented markup; the client receives it on one line.
async fn index(_req: Request) -> Response {
    Response::html(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>redo demo</title>
    <!-- styles -->
    <style>
      body { font-family: sans-serif; margin: 2rem; }
      a:hover { text-decoration: underline; }
    </style>
    <script type="application/ld+json">
      {
        "@context": "https://schema.org",
        "@type": "WebSite",
        "name": "redo demo"
      }
    </script>
  </head>
  <body>
    <h1>Posts</h1>
    <ul>
      <li><a href="/posts/hello-world">Hello, world</a></li>
    </ul>
    <script>
      // log where assets come from
      const cdn = "https://cdn.example.com/assets//v2";
      console.log("assets from", cdn); /* debug */
    </script>
  </body>
</html>
"#,
    )
}

// GET /posts/{slug}
async fn post(req: Request) -> Response {
    let slug = req.param("slug").unwrap_or("unknown");
    Response::html(format!(
        "<article>\n  <h1>{slug}</h1>\n  <p>\n    Nothing here yet.\n  </p>\n</article>\n"
    ))
}

// GET /admin/ (404 unless REDO_ADMIN_ENABLED=true)
async fn admin(_req: Request) -> Response {
    Response::html("<h1>\n  Admin\n</h1>")
}
