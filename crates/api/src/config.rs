use inventory_core::api_keys::hash_api_key;
use inventory_core::rate_limit::{DEFAULT_WINDOW_SECS, DEFAULT_WRITE_PERMITS};

/// Environment name that hides internal error details from clients.
pub const PRODUCTION_ENV: &str = "production";

/// Log output format for the `fmt` subscriber layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Server configuration loaded from environment variables.
///
/// Everything except `API_KEY` has a default suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Deployment environment name (default: `development`).
    pub environment: String,
    /// SHA-256 hex digest of the API key required on write requests.
    pub api_key_hash: String,
    /// Category write requests allowed per client per window.
    pub write_rate_limit: u32,
    pub write_rate_window_secs: u64,
    /// Insert demo categories and products at startup.
    pub seed_demo_data: bool,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                    |
    /// |--------------------------|----------------------------|
    /// | `HOST`                   | `0.0.0.0`                  |
    /// | `PORT`                   | `3000`                     |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                       |
    /// | `APP_ENV`                | `development`              |
    /// | `API_KEY`                | required                   |
    /// | `WRITE_RATE_LIMIT`       | `10`                       |
    /// | `WRITE_RATE_WINDOW_SECS` | `60`                       |
    /// | `SEED_DEMO_DATA`         | `false`                    |
    /// | `LOG_FORMAT`             | `pretty` (or `json`)       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let environment = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());

        let api_key = std::env::var("API_KEY").expect("API_KEY must be set");
        assert!(!api_key.trim().is_empty(), "API_KEY must not be empty");

        let write_rate_limit: u32 = std::env::var("WRITE_RATE_LIMIT")
            .unwrap_or_else(|_| DEFAULT_WRITE_PERMITS.to_string())
            .parse()
            .expect("WRITE_RATE_LIMIT must be a valid u32");

        let write_rate_window_secs: u64 = std::env::var("WRITE_RATE_WINDOW_SECS")
            .unwrap_or_else(|_| DEFAULT_WINDOW_SECS.to_string())
            .parse()
            .expect("WRITE_RATE_WINDOW_SECS must be a valid u64");

        let seed_demo_data = std::env::var("SEED_DEMO_DATA")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        let log_format = match std::env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            environment,
            api_key_hash: hash_api_key(&api_key),
            write_rate_limit,
            write_rate_window_secs,
            seed_demo_data,
            log_format,
        }
    }

    /// Whether internal error details must be withheld from responses.
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case(PRODUCTION_ENV)
    }
}

/// Parse a boolean env flag (`1`, `true`, `yes`, `on`).
fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_parsing() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" ON "));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }
}
