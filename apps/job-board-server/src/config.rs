// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is read from the environment at startup (a `.env` file in
//! the working directory is loaded first when present).
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `5000` |
//! | `DATA_DIR` | Directory holding `job-board.redb` | `./data` |
//! | `JWT_SECRET` | HMAC secret for session tokens | Required |
//! | `TOKEN_TTL_SECS` | Session token lifetime in seconds | `3600` |
//! | `APP_ENV` | `production` marks the session cookie `Secure` | `development` |
//! | `CORS_ALLOWED_ORIGINS` | Comma-separated browser origins | `http://localhost:5173` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::{fmt, path::PathBuf, time::Duration};

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const DATA_DIR_ENV: &str = "DATA_DIR";
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";
pub const TOKEN_TTL_ENV: &str = "TOKEN_TTL_SECS";
pub const APP_ENV_ENV: &str = "APP_ENV";
pub const CORS_ORIGINS_ENV: &str = "CORS_ALLOWED_ORIGINS";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

/// Default tracing filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Database file name inside `DATA_DIR`.
pub const DATABASE_FILE: &str = "job-board.redb";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    /// Production mode (secure cookies)
    pub production: bool,
    pub cors_allowed_origins: Vec<String>,
    pub log_format: LogFormat,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("data_dir", &self.data_dir)
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("production", &self.production)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl ServerConfig {
    /// Load from the process environment, after reading `.env` if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let port = match var(PORT_ENV) {
            Some(raw) => raw.trim().parse().map_err(|e| ConfigError::Invalid {
                name: PORT_ENV,
                reason: format!("{e}"),
            })?,
            None => DEFAULT_PORT,
        };

        let token_ttl_secs = match var(TOKEN_TTL_ENV) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                name: TOKEN_TTL_ENV,
                reason: format!("{e}"),
            })?,
            None => DEFAULT_TOKEN_TTL_SECS,
        };
        if token_ttl_secs == 0 {
            return Err(ConfigError::Invalid {
                name: TOKEN_TTL_ENV,
                reason: "must be greater than zero".into(),
            });
        }
        if i64::try_from(token_ttl_secs).is_err() {
            return Err(ConfigError::Invalid {
                name: TOKEN_TTL_ENV,
                reason: format!("must not exceed {}", i64::MAX),
            });
        }

        let log_format = match var(LOG_FORMAT_ENV).as_deref().map(str::trim) {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: LOG_FORMAT_ENV,
                    reason: format!("expected `json` or `pretty`, got `{other}`"),
                })
            }
        };

        let cors_allowed_origins = var(CORS_ORIGINS_ENV)
            .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect();

        Ok(Self {
            host: var(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            data_dir: var(DATA_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            jwt_secret: var(JWT_SECRET_ENV).ok_or(ConfigError::Missing(JWT_SECRET_ENV))?,
            token_ttl: Duration::from_secs(token_ttl_secs),
            production: var(APP_ENV_ENV).is_some_and(|env| env.trim() == "production"),
            cors_allowed_origins,
            log_format,
        })
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let config = ServerConfig::from_lookup(lookup(&[(JWT_SECRET_ENV, "s3cret")])).unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:5000");
        assert_eq!(config.database_path(), PathBuf::from("./data/job-board.redb"));
        assert_eq!(config.token_ttl, Duration::from_secs(3600));
        assert!(!config.production);
        assert_eq!(config.cors_allowed_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn secret_is_required() {
        let result = ServerConfig::from_lookup(lookup(&[(PORT_ENV, "8080")]));
        assert!(matches!(result, Err(ConfigError::Missing(JWT_SECRET_ENV))));
    }

    #[test]
    fn explicit_values_are_parsed() {
        let config = ServerConfig::from_lookup(lookup(&[
            (JWT_SECRET_ENV, "s3cret"),
            (HOST_ENV, "127.0.0.1"),
            (PORT_ENV, "8080"),
            (DATA_DIR_ENV, "/var/lib/job-board"),
            (TOKEN_TTL_ENV, "10"),
            (APP_ENV_ENV, "production"),
            (CORS_ORIGINS_ENV, "https://jobs.test, https://admin.jobs.test"),
            (LOG_FORMAT_ENV, "json"),
        ]))
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(
            config.database_path(),
            PathBuf::from("/var/lib/job-board/job-board.redb")
        );
        assert_eq!(config.token_ttl, Duration::from_secs(10));
        assert!(config.production);
        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://jobs.test", "https://admin.jobs.test"]
        );
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn invalid_values_are_rejected() {
        for (name, value) in [
            (PORT_ENV, "not-a-port"),
            (TOKEN_TTL_ENV, "0"),
            (TOKEN_TTL_ENV, "-5"),
            (TOKEN_TTL_ENV, "9223372036854775808"),
            (TOKEN_TTL_ENV, "18446744073709551615"),
            (LOG_FORMAT_ENV, "xml"),
        ] {
            let result =
                ServerConfig::from_lookup(lookup(&[(JWT_SECRET_ENV, "s3cret"), (name, value)]));
            assert!(
                matches!(result, Err(ConfigError::Invalid { name: n, .. }) if n == name),
                "{name}={value} should be rejected"
            );
        }
    }

    #[test]
    fn largest_accepted_ttl_still_issues_tokens() {
        let config = ServerConfig::from_lookup(lookup(&[
            (JWT_SECRET_ENV, "s3cret"),
            (TOKEN_TTL_ENV, "9223372036854775807"),
        ]))
        .unwrap();

        let tokens = crate::auth::TokenService::new(&config.jwt_secret, config.token_ttl);
        assert!(tokens.issue(serde_json::Map::new()).is_ok());
    }

    #[test]
    fn debug_redacts_secret() {
        let config = ServerConfig::from_lookup(lookup(&[(JWT_SECRET_ENV, "s3cret")])).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("<redacted>"));
    }
}
