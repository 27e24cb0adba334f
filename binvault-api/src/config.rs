//! Configuration loading
//!
//! Settings resolve in priority order: command-line argument (highest),
//! environment variable, TOML config file, compiled default. Admin
//! credentials are injected configuration — a salted password hash in the
//! TOML `[admin]` section or `BINVAULT_ADMIN_*` environment variables —
//! never compiled into source.

use binvault_common::auth::AdminCredentials;
use binvault_common::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default listen port
pub const DEFAULT_PORT: u16 = 5730;

/// Raw TOML config file contents
#[derive(Debug, Default, Deserialize)]
struct TomlConfig {
    port: Option<u16>,
    data_dir: Option<PathBuf>,
    admin: Option<AdminCredentials>,
}

/// Resolved service configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Directory holding both persisted artifacts
    pub data_dir: PathBuf,
    pub admin: AdminCredentials,
}

impl Config {
    /// Resolve configuration from the config file plus CLI/env overrides.
    ///
    /// A missing config file is not fatal as long as credentials arrive via
    /// environment; missing credentials are a startup error.
    pub fn resolve(
        config_path: &Path,
        cli_port: Option<u16>,
        cli_data_dir: Option<PathBuf>,
    ) -> Result<Self> {
        let file = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            toml::from_str::<TomlConfig>(&content).map_err(|e| {
                Error::Config(format!("{}: {}", config_path.display(), e))
            })?
        } else {
            warn!(
                "Config file {} not found, using environment and defaults",
                config_path.display()
            );
            TomlConfig::default()
        };

        let admin = admin_from_env().or(file.admin).ok_or_else(|| {
            Error::Config(
                "admin credentials not configured; set [admin] in the config file \
                 or the BINVAULT_ADMIN_* environment variables"
                    .to_string(),
            )
        })?;
        validate_credentials(&admin)?;

        Ok(Self {
            port: cli_port.or(file.port).unwrap_or(DEFAULT_PORT),
            data_dir: cli_data_dir
                .or(file.data_dir)
                .unwrap_or_else(|| PathBuf::from(".")),
            admin,
        })
    }

    /// Path of the record store file.
    pub fn sites_path(&self) -> PathBuf {
        self.data_dir.join("sites.json")
    }

    /// Path of the event log file.
    pub fn stats_path(&self) -> PathBuf {
        self.data_dir.join("stats.json")
    }
}

/// Read credentials from `BINVAULT_ADMIN_USERNAME`,
/// `BINVAULT_ADMIN_PASSWORD_HASH`, and `BINVAULT_ADMIN_PASSWORD_SALT`.
///
/// All three must be present; a partial set falls through to the config
/// file.
fn admin_from_env() -> Option<AdminCredentials> {
    let username = std::env::var("BINVAULT_ADMIN_USERNAME").ok()?;
    let password_hash = std::env::var("BINVAULT_ADMIN_PASSWORD_HASH").ok()?;
    let password_salt = std::env::var("BINVAULT_ADMIN_PASSWORD_SALT").ok()?;
    Some(AdminCredentials {
        username,
        password_hash,
        password_salt,
    })
}

fn validate_credentials(admin: &AdminCredentials) -> Result<()> {
    if admin.username.is_empty() {
        return Err(Error::Config("admin username must not be empty".to_string()));
    }
    if admin.password_hash.len() != 64
        || !admin.password_hash.chars().all(|c| c.is_ascii_hexdigit())
    {
        return Err(Error::Config(
            "admin password_hash must be 64 hex characters (SHA-256)".to_string(),
        ));
    }
    Ok(())
}
