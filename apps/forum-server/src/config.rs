// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is read from the environment once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `TOKEN_SIGNING_KEY` | HS256 secret for session tokens | Random per process |
//! | `SEED_ADMIN_USERNAME` | Username of an admin created at startup | Optional |
//! | `SEED_ADMIN_EMAIL` | Email of the seeded admin | `<username>@localhost` |
//! | `SEED_ADMIN_PASSWORD` | Password of the seeded admin | Required with username |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::SocketAddr;

use thiserror::Error;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";

/// HS256 secret for session tokens.
///
/// When unset a random key is generated, so tokens do not survive a restart.
/// Sessions are in memory anyway, so nothing is lost.
pub const TOKEN_SIGNING_KEY_ENV: &str = "TOKEN_SIGNING_KEY";

pub const SEED_ADMIN_USERNAME_ENV: &str = "SEED_ADMIN_USERNAME";
pub const SEED_ADMIN_EMAIL_ENV: &str = "SEED_ADMIN_EMAIL";
pub const SEED_ADMIN_PASSWORD_ENV: &str = "SEED_ADMIN_PASSWORD";

pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT must be a port number, got '{0}'")]
    InvalidPort(String),
    #[error("invalid bind address '{0}'")]
    InvalidAddress(String),
    #[error("SEED_ADMIN_PASSWORD is required when SEED_ADMIN_USERNAME is set")]
    MissingAdminPassword,
}

/// Admin account created at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedAdmin {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub signing_key: Option<Vec<u8>>,
    pub seed_admin: Option<SeedAdmin>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup(PORT_ENV) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let addr = format!("{host}:{port}");
        let bind_addr = addr
            .parse()
            .map_err(|_| ConfigError::InvalidAddress(addr))?;

        let signing_key = lookup(TOKEN_SIGNING_KEY_ENV)
            .filter(|key| !key.is_empty())
            .map(String::into_bytes);

        let seed_admin = match lookup(SEED_ADMIN_USERNAME_ENV).filter(|u| !u.is_empty()) {
            Some(username) => {
                let password = lookup(SEED_ADMIN_PASSWORD_ENV)
                    .filter(|p| !p.is_empty())
                    .ok_or(ConfigError::MissingAdminPassword)?;
                let email = lookup(SEED_ADMIN_EMAIL_ENV)
                    .unwrap_or_else(|| format!("{username}@localhost"));
                Some(SeedAdmin {
                    username,
                    email,
                    password,
                })
            }
            None => None,
        };

        Ok(Self {
            bind_addr,
            signing_key,
            seed_admin,
        })
    }
}

/// Whether logs should be emitted as JSON.
pub fn json_logs(format: Option<&str>) -> bool {
    matches!(format, Some(f) if f.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:8080");
        assert!(config.signing_key.is_none());
        assert!(config.seed_admin.is_none());
    }

    #[test]
    fn host_port_and_key_are_read() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            (HOST_ENV, "127.0.0.1"),
            (PORT_ENV, "3000"),
            (TOKEN_SIGNING_KEY_ENV, "secret"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
        assert_eq!(config.signing_key.as_deref(), Some(b"secret".as_slice()));
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = ServerConfig::from_lookup(lookup_from(&[(PORT_ENV, "http")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidPort("http".to_string()));
    }

    #[test]
    fn seed_admin_needs_password() {
        let err = ServerConfig::from_lookup(lookup_from(&[(SEED_ADMIN_USERNAME_ENV, "root")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingAdminPassword);

        let config = ServerConfig::from_lookup(lookup_from(&[
            (SEED_ADMIN_USERNAME_ENV, "root"),
            (SEED_ADMIN_PASSWORD_ENV, "hunter22"),
        ]))
        .unwrap();
        let admin = config.seed_admin.unwrap();
        assert_eq!(admin.email, "root@localhost");
        assert_eq!(admin.password, "hunter22");
    }

    #[test]
    fn log_format_detection() {
        assert!(json_logs(Some("json")));
        assert!(json_logs(Some("JSON")));
        assert!(!json_logs(Some("pretty")));
        assert!(!json_logs(None));
    }
}
