//! Per-request tracing.

use std::time::Instant;

use tracing::{Instrument, info, info_span};

use super::{Middleware, Next};
use crate::handler::BoxFuture;
use crate::request::Request;

/// Emits one `info` event per request with method, path, status and
/// latency, inside a `request` span. Add it first so it times the whole
/// chain.
#[derive(Clone, Copy, Debug, Default)]
pub struct Trace;

impl Middleware for Trace {
    fn call(&self, req: Request, next: Next) -> BoxFuture {
        let span = info_span!("request", method = %req.method(), path = req.path());
        Box::pin(
            async move {
                let start = Instant::now();
                let res = next.run(req).await;
                info!(
                    status = res.status_code().as_u16(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "served"
                );
                res
            }
            .instrument(span),
        )
    }
}
