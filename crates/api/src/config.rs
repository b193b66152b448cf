use std::ops::RangeInclusive;

use axum::http::HeaderValue;
use showcase_media::cloudinary::{CloudinaryConfig, DEFAULT_TIMEOUT_SECS};

use crate::auth::cookie::{CookieConfig, DEFAULT_LIFETIME_DAYS, MAX_LIFETIME_DAYS};
use crate::auth::jwt::{JwtConfig, DEFAULT_EXPIRY_SECS, MAX_EXPIRY_SECS};

/// Largest accepted `BODY_LIMIT_MB`.
pub const MAX_BODY_LIMIT_MB: usize = 1024;

/// A configuration value that is missing or unparseable.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<HeaderValue>,
    /// Request body cap in bytes.
    pub body_limit_bytes: usize,
    /// Store URL; `memory://` selects the in-memory store.
    pub database_url: String,
    /// Whether `POST /api/users/register` is mounted.
    pub allow_registration: bool,
    pub jwt: JwtConfig,
    pub cookie: CookieConfig,
    pub media: CloudinaryConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                 | Required | Default                 |
    /// |-------------------------|----------|-------------------------|
    /// | `HOST`                  | no       | `0.0.0.0`               |
    /// | `PORT`                  | no       | `5000`                  |
    /// | `DATABASE_URL`          | **yes**  | --                      |
    /// | `JWT_SECRET`            | **yes**  | --                      |
    /// | `JWT_EXPIRES`           | no       | `90d`                   |
    /// | `COOKIE_EXPIRES_DAYS`   | no       | `90`                    |
    /// | `APP_ENV`               | no       | `development`           |
    /// | `CORS_ORIGINS`          | no       | `http://localhost:5173` |
    /// | `BODY_LIMIT_MB`         | no       | `50`                    |
    /// | `ALLOW_REGISTRATION`    | no       | `false`                 |
    /// | `CLOUDINARY_NAME`       | **yes**  | --                      |
    /// | `CLOUDINARY_API_KEY`    | **yes**  | --                      |
    /// | `CLOUDINARY_API_SECRET` | **yes**  | --                      |
    /// | `MEDIA_TIMEOUT_SECS`    | no       | `60`                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let host = env.or("HOST", "0.0.0.0");
        let port = env.parsed("PORT", 5000u16)?;

        let cors_origins = env
            .or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|origin| {
                origin.parse::<HeaderValue>().map_err(|e| ConfigError::Invalid {
                    key: "CORS_ORIGINS",
                    reason: format!("'{origin}': {e}"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let body_limit_mb = env.bounded("BODY_LIMIT_MB", 50usize, 1..=MAX_BODY_LIMIT_MB)?;
        let production = env.or("APP_ENV", "development") == "production";

        let expiry_secs = match env.get("JWT_EXPIRES") {
            Some(raw) => parse_duration_secs(&raw).ok_or_else(|| ConfigError::Invalid {
                key: "JWT_EXPIRES",
                reason: format!("'{raw}' is not a duration like 90d, 12h, 30m or 45s"),
            })?,
            None => DEFAULT_EXPIRY_SECS,
        };
        if expiry_secs > MAX_EXPIRY_SECS {
            return Err(ConfigError::Invalid {
                key: "JWT_EXPIRES",
                reason: format!("must be at most {MAX_EXPIRY_SECS} seconds"),
            });
        }

        let jwt = JwtConfig {
            secret: env.required("JWT_SECRET")?,
            expiry_secs,
        };

        let cookie = CookieConfig {
            secure: production,
            lifetime_days: env.bounded(
                "COOKIE_EXPIRES_DAYS",
                DEFAULT_LIFETIME_DAYS,
                1..=MAX_LIFETIME_DAYS,
            )?,
        };

        let media = CloudinaryConfig {
            cloud_name: env.required("CLOUDINARY_NAME")?,
            api_key: env.required("CLOUDINARY_API_KEY")?,
            api_secret: env.required("CLOUDINARY_API_SECRET")?,
            timeout_secs: env.parsed("MEDIA_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            body_limit_bytes: body_limit_mb * 1024 * 1024,
            database_url: env.required("DATABASE_URL")?,
            allow_registration: env.parsed("ALLOW_REGISTRATION", false)?,
            jwt,
            cookie,
            media,
        })
    }
}

struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    fn or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.get(key).ok_or(ConfigError::Missing(key))
    }

    fn parsed<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(key) {
            Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                key,
                reason: e.to_string(),
            }),
            None => Ok(default),
        }
    }

    fn bounded<T>(
        &self,
        key: &'static str,
        default: T,
        range: RangeInclusive<T>,
    ) -> Result<T, ConfigError>
    where
        T: std::str::FromStr + PartialOrd + std::fmt::Display,
        T::Err: std::fmt::Display,
    {
        let value = self.parsed(key, default)?;
        if range.contains(&value) {
            Ok(value)
        } else {
            Err(ConfigError::Invalid {
                key,
                reason: format!(
                    "{value} is outside {}..={}",
                    range.start(),
                    range.end()
                ),
            })
        }
    }
}

/// Parse `<n>[s|m|h|d]` into seconds. A bare number is taken as seconds.
pub fn parse_duration_secs(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let (digits, unit) = match raw.char_indices().last()? {
        (i, c) if c.is_ascii_alphabetic() => (&raw[..i], c),
        _ => (raw, 's'),
    };
    let n: i64 = digits.parse().ok().filter(|n| *n > 0)?;
    let scale = match unit {
        's' => 1,
        'm' => 60,
        'h' => 60 * 60,
        'd' => 24 * 60 * 60,
        _ => return None,
    };
    n.checked_mul(scale)
}
