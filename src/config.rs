//! Application configuration.
//!
//! Loaded from TOML at `$HOTEL_ADMIN_CONFIG` or
//! `~/.config/hotel-admin/config.toml`. Every section has defaults, so a
//! missing file or a partial file is fine.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::lister::{ListSettings, MatchCount};

pub const CONFIG_ENV: &str = "HOTEL_ADMIN_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// `$HOTEL_ADMIN_CONFIG`, or the platform config dir.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hotel-admin")
        .join("config.toml")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub security: SecurityConfig,
    pub pagination: PaginationConfig,
    pub media: MediaConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Missing file yields defaults; a malformed one is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds allowed for in-flight requests after a shutdown signal.
    pub shutdown_timeout: u64,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: "sqlite://./hotel-admin.db?mode=rwc".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub admin_email: String,
    pub admin_name: String,
    pub admin_password: String,
    pub bcrypt_cost: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_hours: 24,
            admin_email: "admin@hotel.local".to_string(),
            admin_name: "Administrator".to_string(),
            admin_password: "admin12345".to_string(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

/// `[pagination]` table. `per_entity` keys are the resource names used in
/// the URL (`floors`, `bed-types`, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub default_page_size: u32,
    pub per_entity: HashMap<String, u32>,
    /// Count filtered matches across all pages instead of the fetched page.
    pub count_matches_globally: bool,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            per_entity: HashMap::new(),
            count_matches_globally: false,
        }
    }
}

impl PaginationConfig {
    pub fn page_size_for(&self, entity: &str) -> u32 {
        self.per_entity
            .get(entity)
            .copied()
            .unwrap_or(self.default_page_size)
            .max(1)
    }

    pub fn list_settings(&self, entity: &str) -> ListSettings {
        ListSettings {
            page_size: self.page_size_for(entity),
            match_count: if self.count_matches_globally {
                MatchCount::Global
            } else {
                MatchCount::PageLocal
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    pub upload_dir: PathBuf,
    /// URL prefix the upload dir is served under.
    pub public_prefix: String,
    pub max_upload_bytes: usize,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("./uploads"),
            public_prefix: "/uploads".to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.pagination.default_page_size, 10);
        assert!(!cfg.pagination.count_matches_globally);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn per_entity_page_sizes() {
        let cfg = AppConfig::from_toml(
            r#"
            [pagination]
            default_page_size = 20
            count_matches_globally = true

            [pagination.per_entity]
            floors = 5
            bookings = 0
            "#,
        )
        .unwrap();

        assert_eq!(cfg.pagination.page_size_for("floors"), 5);
        assert_eq!(cfg.pagination.page_size_for("rooms"), 20);
        assert_eq!(cfg.pagination.page_size_for("bookings"), 1);

        let settings = cfg.pagination.list_settings("floors");
        assert_eq!(settings.page_size, 5);
        assert_eq!(settings.match_count, MatchCount::Global);
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(AppConfig::from_toml("[server]\nport = \"x\"").is_err());
    }

    #[test]
    fn file_on_disk_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 9191\n\n[pagination.per_entity]\nrooms = 7\n").unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded.server.port, 9191);
        assert_eq!(loaded.pagination.page_size_for("rooms"), 7);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.database.url, AppConfig::default().database.url);
    }
}
