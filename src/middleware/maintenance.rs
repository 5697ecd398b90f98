//! Maintenance mode.

use http::StatusCode;
use http::header::RETRY_AFTER;

use super::{Middleware, Next};
use crate::config::MaintenanceConfig;
use crate::handler::BoxFuture;
use crate::request::Request;
use crate::response::Response;

const PAGE: &str = "<!DOCTYPE html>\
<html><head><meta charset=\"utf-8\"><title>Down for maintenance</title></head>\
<body><h1>Down for maintenance</h1><p>We'll be back shortly.</p></body></html>";

/// Answers `503 Service Unavailable` to every request while enabled,
/// except paths under one of the exempt prefixes.
#[derive(Clone, Debug)]
pub struct Maintenance {
    enabled: bool,
    exempt: Vec<String>,
    retry_after: u64,
}

impl Maintenance {
    pub fn new(config: &MaintenanceConfig) -> Self {
        Self {
            enabled: config.enabled,
            exempt: config.exempt.clone(),
            retry_after: config.retry_after,
        }
    }

    fn applies_to(&self, path: &str) -> bool {
        self.enabled && !self.exempt.iter().any(|prefix| path.starts_with(prefix.as_str()))
    }

    fn unavailable(&self) -> Response {
        let mut res = Response::builder()
            .status(StatusCode::SERVICE_UNAVAILABLE)
            .html(PAGE);
        res.headers_mut().insert(RETRY_AFTER, self.retry_after.into());
        res
    }
}

impl Middleware for Maintenance {
    fn call(&self, req: Request, next: Next) -> BoxFuture {
        if self.applies_to(req.path()) {
            let res = self.unavailable();
            return Box::pin(async move { res });
        }
        next.run(req)
    }
}
