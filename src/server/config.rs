use std::str::FromStr;

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_ACCESS_TOKEN_TTL_SECONDS: i64 = 300;
const DEFAULT_REFRESH_TOKEN_TTL_SECONDS: i64 = 86_400;

pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_address: String,

    pub access_token_ttl_seconds: i64,
    pub refresh_token_ttl_seconds: i64,

    /// Single origin allowed by CORS. Unset disables cross-origin requests.
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            bind_address: lookup("BIND_ADDRESS")
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            access_token_ttl_seconds: parse_positive(
                &lookup,
                "ACCESS_TOKEN_TTL_SECONDS",
                DEFAULT_ACCESS_TOKEN_TTL_SECONDS,
            )?,
            refresh_token_ttl_seconds: parse_positive(
                &lookup,
                "REFRESH_TOKEN_TTL_SECONDS",
                DEFAULT_REFRESH_TOKEN_TTL_SECONDS,
            )?,
            cors_allowed_origin: lookup("CORS_ALLOWED_ORIGIN").filter(|value| !value.is_empty()),
        })
    }
}

fn parse_positive<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + Default,
{
    let Some(value) = lookup(name).filter(|value| !value.is_empty()) else {
        return Ok(default);
    };

    match value.parse::<T>() {
        Ok(parsed) if parsed > T::default() => Ok(parsed),
        _ => Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        }),
    }
}
