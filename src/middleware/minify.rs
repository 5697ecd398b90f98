//! HTML response minification.

use http::header::CONTENT_ENCODING;
use tracing::{debug, warn};

use super::{Middleware, Next};
use crate::config::MinifyConfig;
use crate::handler::BoxFuture;
use crate::minify::{is_html, minify};
use crate::request::Request;
use crate::response::Response;

/// Runs [`minify`] over every `text/html` response body and rewrites
/// `Content-Length` to the new size.
///
/// Responses that are not HTML, that carry a `Content-Encoding`, or whose
/// body is not UTF-8 are passed through as they are.
#[derive(Clone, Copy, Debug)]
pub struct MinifyHtml {
    enabled: bool,
}

impl MinifyHtml {
    pub fn new(config: &MinifyConfig) -> Self {
        Self { enabled: config.enabled }
    }
}

impl Default for MinifyHtml {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Middleware for MinifyHtml {
    fn call(&self, req: Request, next: Next) -> BoxFuture {
        if !self.enabled {
            return next.run(req);
        }
        Box::pin(async move {
            let mut res = next.run(req).await;
            minify_response(&mut res);
            res
        })
    }
}

fn minify_response(res: &mut Response) {
    if !res.content_type().is_some_and(is_html) {
        return;
    }
    if res.headers().contains_key(CONTENT_ENCODING) {
        debug!("skipping minify of encoded body");
        return;
    }
    let html = match std::str::from_utf8(res.body()) {
        Ok(html) => html,
        Err(err) => {
            warn!(%err, "HTML response body is not UTF-8, sent unminified");
            return;
        }
    };

    let before = html.len();
    let minified = minify(html);
    debug!(before, after = minified.len(), "minified HTML response");
    res.set_body(minified);
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::response::ContentType;

    #[test]
    fn test_minifies_html_and_updates_length() {
        let mut res = Response::html("<div>   <p>hi</p>   </div>\n");
        minify_response(&mut res);
        assert_eq!(res.body(), b"<div><p>hi</p></div>");
        assert_eq!(res.header("content-length"), Some("20"));
    }

    #[test]
    fn test_leaves_other_types_alone() {
        let body = "a   {  color : red }";
        let mut res = Response::builder().bytes(ContentType::Css, body);
        minify_response(&mut res);
        assert_eq!(res.body(), body.as_bytes());
        assert_eq!(res.header("content-length"), None);
    }

    #[test]
    fn test_leaves_encoded_html_alone() {
        let mut res = Response::builder()
            .header("content-encoding", "gzip")
            .bytes(ContentType::Html, Bytes::from_static(b"\x1f\x8b  <p> </p>"));
        minify_response(&mut res);
        assert_eq!(res.body(), b"\x1f\x8b  <p> </p>");
    }

    #[test]
    fn test_leaves_invalid_utf8_alone() {
        let mut res = Response::builder().bytes(ContentType::Html, vec![0xff, b' ', b' ', 0xfe]);
        minify_response(&mut res);
        assert_eq!(res.body(), &[0xff, b' ', b' ', 0xfe]);
    }
}
