use std::env;

use thiserror::Error;

const DEFAULT_UPSTREAM_BASE_URL: &str = "http://localhost:8088/api/v1";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required configuration value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
    #[error("unsupported token algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

#[derive(Debug, Clone)]
pub struct Settings {
    security: SecuritySettings,
    upstream: UpstreamSettings,
    telemetry: TelemetrySettings,
}

#[derive(Debug, Clone)]
pub struct SecuritySettings {
    pub secret_key: String,
    pub algorithm: String,
}

#[derive(Debug, Clone)]
pub struct UpstreamSettings {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub connect_timeout_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct TelemetrySettings {
    pub log_level: String,
    pub json: bool,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let secret_key =
            env_optional("SECRET_KEY").ok_or(ConfigError::MissingValue("SECRET_KEY"))?;
        let algorithm = env_or_default("ALGORITHM", "HS256");
        if algorithm != "HS256" {
            return Err(ConfigError::UnsupportedAlgorithm(algorithm));
        }

        let base_url = env_or_default("RESOURCE_API_BASE_URL", DEFAULT_UPSTREAM_BASE_URL)
            .trim_end_matches('/')
            .to_string();
        let timeout_seconds = parse_u64(
            "RESOURCE_API_TIMEOUT_SECONDS",
            env_or_default("RESOURCE_API_TIMEOUT_SECONDS", "30"),
        )?;
        let connect_timeout_seconds = parse_u64(
            "RESOURCE_API_CONNECT_TIMEOUT_SECONDS",
            env_or_default("RESOURCE_API_CONNECT_TIMEOUT_SECONDS", "10"),
        )?;

        let log_level = env_or_default("LOG_LEVEL", "info");
        let log_json = env_optional("LOG_JSON").map(|value| parse_bool(&value)).unwrap_or(false);

        Ok(Self {
            security: SecuritySettings { secret_key, algorithm },
            upstream: UpstreamSettings { base_url, timeout_seconds, connect_timeout_seconds },
            telemetry: TelemetrySettings { log_level, json: log_json },
        })
    }

    pub fn security(&self) -> &SecuritySettings {
        &self.security
    }

    pub fn upstream(&self) -> &UpstreamSettings {
        &self.upstream
    }

    pub fn telemetry(&self) -> &TelemetrySettings {
        &self.telemetry
    }
}

#[cfg(test)]
impl Settings {
    /// Deterministic settings for unit tests; avoids process-wide env churn.
    pub(crate) fn with_secret(secret_key: &str) -> Self {
        Self {
            security: SecuritySettings {
                secret_key: secret_key.to_string(),
                algorithm: "HS256".to_string(),
            },
            upstream: UpstreamSettings {
                base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
                timeout_seconds: 30,
                connect_timeout_seconds: 10,
            },
            telemetry: TelemetrySettings { log_level: "info".to_string(), json: false },
        }
    }
}

fn env_optional(key: &str) -> Option<String> {
    env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

fn env_or_default(key: &str, default: &str) -> String {
    env_optional(key).unwrap_or_else(|| default.to_string())
}

fn parse_u64(field: &'static str, value: String) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidValue { field, value })
}

fn parse_bool(value: &str) -> bool {
    matches!(value, "1" | "true" | "TRUE" | "yes" | "YES" | "on" | "ON")
}
