//! One struct per settings table.
//!
//! ```toml
//! [server]
//! addr = "0.0.0.0:8000"
//!
//! [admin]
//! enabled = false       # hide the admin site behind a 404
//! path = "/admin/"
//!
//! [minify]
//! enabled = true        # minify text/html responses
//!
//! [maintenance]
//! enabled = false
//! exempt = ["/static/"]
//! retry_after = 300     # seconds, sent as `Retry-After`
//! ```

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use serde::Deserialize;

/// `[server]`
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Address the listener binds to.
    pub addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8000) }
    }
}

/// `[admin]`
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdminConfig {
    /// When false, every path under `path` answers 404.
    pub enabled: bool,
    /// URL prefix of the admin site. Must start with `/`.
    pub path: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self { enabled: false, path: "/admin/".to_owned() }
    }
}

/// `[minify]`
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MinifyConfig {
    pub enabled: bool,
}

impl Default for MinifyConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// `[maintenance]`
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MaintenanceConfig {
    pub enabled: bool,
    /// Path prefixes still served while maintenance mode is on.
    pub exempt: Vec<String>,
    /// Seconds clients are told to wait before retrying.
    pub retry_after: u64,
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self { enabled: false, exempt: Vec::new(), retry_after: 300 }
    }
}
