//! Admin-site gate.

use http::StatusCode;
use tracing::debug;

use super::{Middleware, Next};
use crate::config::AdminConfig;
use crate::handler::BoxFuture;
use crate::request::Request;
use crate::response::Response;

/// Hides the admin URL space behind a `404 Not Found` while the admin site
/// is disabled. Requests outside the prefix, or any request while it is
/// enabled, pass through untouched.
#[derive(Clone, Debug)]
pub struct AdminGate {
    enabled: bool,
    prefix: String,
}

impl AdminGate {
    pub fn new(config: &AdminConfig) -> Self {
        Self { enabled: config.enabled, prefix: config.path.clone() }
    }

    fn blocks(&self, path: &str) -> bool {
        !self.enabled && path.starts_with(&self.prefix)
    }
}

impl Middleware for AdminGate {
    fn call(&self, req: Request, next: Next) -> BoxFuture {
        if self.blocks(req.path()) {
            debug!(path = req.path(), "admin site disabled");
            return Box::pin(async { Response::status(StatusCode::NOT_FOUND) });
        }
        next.run(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate(enabled: bool) -> AdminGate {
        AdminGate::new(&AdminConfig { enabled, path: "/admin/".to_owned() })
    }

    #[test]
    fn test_blocks_prefix_when_disabled() {
        let gate = gate(false);
        assert!(gate.blocks("/admin/"));
        assert!(gate.blocks("/admin/users/1"));
        assert!(!gate.blocks("/administrator"));
        assert!(!gate.blocks("/"));
    }

    #[test]
    fn test_never_blocks_when_enabled() {
        assert!(!gate(true).blocks("/admin/users/1"));
    }
}
