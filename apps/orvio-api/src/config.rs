//! Environment configuration.
//!
//! Loaded once at startup and fails fast on anything malformed. The
//! production environment additionally refuses weak signing secrets.

use std::str::FromStr;

use thiserror::Error;

use orvio_auth::DEFAULT_TOKEN_TTL_SECS;
use orvio_store::TenantStatus;

/// Secret that ships in `.env.example`; never acceptable in production.
const DEV_SECRET: &str = "dev-secret-change-me";
const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    InvalidVar { name: &'static str, reason: String },

    #[error("JWT_SECRET is not acceptable in production: {0}")]
    InsecureSecret(&'static str),
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppEnvironment {
    #[default]
    Development,
    Production,
}

impl FromStr for AppEnvironment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" | "dev" => Ok(AppEnvironment::Development),
            "production" | "prod" => Ok(AppEnvironment::Production),
            other => Err(format!("Unknown environment: {other}")),
        }
    }
}

impl AppEnvironment {
    #[must_use]
    pub fn is_production(self) -> bool {
        self == AppEnvironment::Production
    }
}

/// Server configuration, fully resolved.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: AppEnvironment,
    pub jwt_secret: String,
    pub token_ttl_secs: i64,
    pub hash_memory_kib: u32,
    pub hash_iterations: u32,
    pub default_tenant_status: TenantStatus,
    pub bootstrap_admin_email: Option<String>,
    pub bootstrap_admin_password: Option<String>,
}

impl Config {
    /// Load from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(|name| std::env::var(name).ok())
    }

    /// Load through an injected lookup, so tests never touch the
    /// process environment.
    pub fn load(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let environment = parse_or_default(&lookup, "APP_ENV", AppEnvironment::default())?;

        let jwt_secret = lookup("JWT_SECRET").ok_or(ConfigError::MissingVar("JWT_SECRET"))?;
        if environment.is_production() {
            if jwt_secret == DEV_SECRET {
                return Err(ConfigError::InsecureSecret("development default"));
            }
            if jwt_secret.len() < MIN_SECRET_LEN {
                return Err(ConfigError::InsecureSecret("shorter than 32 bytes"));
            }
        }

        let default_tenant_status =
            parse_or_default(&lookup, "DEFAULT_TENANT_STATUS", TenantStatus::Trial)?;
        if !matches!(
            default_tenant_status,
            TenantStatus::Trial | TenantStatus::Active
        ) {
            return Err(ConfigError::InvalidVar {
                name: "DEFAULT_TENANT_STATUS",
                reason: "must be 'trial' or 'active'".to_string(),
            });
        }

        let token_ttl_secs: i64 =
            parse_or_default(&lookup, "TOKEN_TTL_SECS", DEFAULT_TOKEN_TTL_SECS)?;
        if token_ttl_secs <= 0 {
            return Err(ConfigError::InvalidVar {
                name: "TOKEN_TTL_SECS",
                reason: "must be positive".to_string(),
            });
        }

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or_default(&lookup, "PORT", 8080)?,
            environment,
            jwt_secret,
            token_ttl_secs,
            hash_memory_kib: parse_or_default(
                &lookup,
                "HASH_MEMORY_KIB",
                orvio_auth::DEFAULT_MEMORY_KIB,
            )?,
            hash_iterations: parse_or_default(
                &lookup,
                "HASH_ITERATIONS",
                orvio_auth::DEFAULT_ITERATIONS,
            )?,
            default_tenant_status,
            bootstrap_admin_email: lookup("BOOTSTRAP_ADMIN_EMAIL"),
            bootstrap_admin_password: lookup("BOOTSTRAP_ADMIN_PASSWORD"),
        })
    }

    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or_default<T>(
    lookup: impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::InvalidVar {
            name,
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn minimal_config_applies_defaults() {
        let config = Config::load(env(&[("JWT_SECRET", DEV_SECRET)])).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.token_ttl_secs, 86_400);
        assert_eq!(config.default_tenant_status, TenantStatus::Trial);
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn jwt_secret_is_required() {
        let err = Config::load(env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("JWT_SECRET")));
    }

    #[test]
    fn production_refuses_weak_secrets() {
        let err = Config::load(env(&[
            ("APP_ENV", "production"),
            ("JWT_SECRET", DEV_SECRET),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_)));

        let err = Config::load(env(&[("APP_ENV", "production"), ("JWT_SECRET", "short")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_)));

        let strong = "s".repeat(48);
        assert!(Config::load(env(&[
            ("APP_ENV", "production"),
            ("JWT_SECRET", &strong),
        ]))
        .is_ok());
    }

    #[test]
    fn development_accepts_the_dev_secret() {
        assert!(Config::load(env(&[("JWT_SECRET", DEV_SECRET)])).is_ok());
    }

    #[test]
    fn default_tenant_status_is_restricted() {
        let config = Config::load(env(&[
            ("JWT_SECRET", DEV_SECRET),
            ("DEFAULT_TENANT_STATUS", "active"),
        ]))
        .unwrap();
        assert_eq!(config.default_tenant_status, TenantStatus::Active);

        for bad in ["suspended", "inactive", "bogus"] {
            let result = Config::load(env(&[
                ("JWT_SECRET", DEV_SECRET),
                ("DEFAULT_TENANT_STATUS", bad),
            ]));
            assert!(result.is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn malformed_numbers_fail_fast() {
        let err = Config::load(env(&[
            ("JWT_SECRET", DEV_SECRET),
            ("PORT", "not-a-port"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar { name: "PORT", .. }));

        let err = Config::load(env(&[
            ("JWT_SECRET", DEV_SECRET),
            ("TOKEN_TTL_SECS", "-5"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidVar {
                name: "TOKEN_TTL_SECS",
                ..
            }
        ));
    }
}
