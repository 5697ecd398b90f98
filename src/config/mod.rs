//! Application settings.
//!
//! Loaded from a TOML file (every key optional, see [`section`] for the
//! layout), then overridden from the environment:
//!
//! | Variable             | Setting               |
//! |----------------------|-----------------------|
//! | `REDO_ADDR`          | `server.addr`         |
//! | `REDO_ADMIN_ENABLED` | `admin.enabled`       |
//! | `REDO_ADMIN_PATH`    | `admin.path`          |
//! | `REDO_MINIFY`        | `minify.enabled`      |
//! | `MAINTENANCE_MODE`   | `maintenance.enabled` |
//!
//! Booleans accept `true`/`false` in any case, and `1`/`0`.

mod error;
pub mod section;

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

pub use error::ConfigError;
pub use section::{AdminConfig, MaintenanceConfig, MinifyConfig, ServerConfig};

/// Root settings, one field per TOML table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub server: ServerConfig,
    pub admin: AdminConfig,
    pub minify: MinifyConfig,
    pub maintenance: MaintenanceConfig,
}

impl Settings {
    /// Reads `path`, applies environment overrides, and validates.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let mut settings: Self = toml::from_str(&text)?;
        settings.apply_env()?;
        settings.validate()?;
        debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    /// Defaults plus environment overrides, for running without a file.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut settings = Self::default();
        settings.apply_env()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parses and validates TOML text. The environment is not consulted.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(addr) = lookup("REDO_ADDR") {
            self.server.addr = addr
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid("REDO_ADDR", format!("{e}")))?;
        }
        if let Some(flag) = lookup("REDO_ADMIN_ENABLED") {
            self.admin.enabled = parse_bool("REDO_ADMIN_ENABLED", &flag)?;
        }
        if let Some(path) = lookup("REDO_ADMIN_PATH") {
            self.admin.path = path;
        }
        if let Some(flag) = lookup("REDO_MINIFY") {
            self.minify.enabled = parse_bool("REDO_MINIFY", &flag)?;
        }
        if let Some(flag) = lookup("MAINTENANCE_MODE") {
            self.maintenance.enabled = parse_bool("MAINTENANCE_MODE", &flag)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.admin.path.starts_with('/') {
            return Err(ConfigError::invalid("admin.path", "must start with `/`"));
        }
        if let Some(prefix) = self.maintenance.exempt.iter().find(|p| !p.starts_with('/')) {
            return Err(ConfigError::invalid(
                "maintenance.exempt",
                format!("`{prefix}` must start with `/`"),
            ));
        }
        Ok(())
    }
}

fn parse_bool(field: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(ConfigError::invalid(field, format!("expected a boolean, got `{other}`"))),
    }
}
