//! Unified error type.

use thiserror::Error;

use crate::config::ConfigError;

/// The error type returned by redo's fallible operations.
///
/// Application-level errors (404, 503, etc.) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// startup and infrastructure failures: bad settings, binding to a port.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("config: {0}")]
    Config(#[from] ConfigError),
}
