//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Cache backend selection
//!
//! The cache backend is chosen by configuration alone:
//!
//! ```bash
//! # External backend (Redis enforces entry expiry)
//! export REDIS_URL="redis://localhost:6379/0"
//!
//! # ...or from components
//! export REDIS_HOST="localhost"
//! export REDIS_PORT="6379"
//! export REDIS_PASSWORD=""
//! export REDIS_DB="0"
//! ```
//!
//! Without any Redis configuration the service runs the in-process cache
//! with lazy expiry and a periodic sweep.
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `BEHIND_PROXY` - Read client IPs from forwarded headers (default: false)
//! - `RATE_LIMIT_MAX` - Rate limit burst size per client IP (default: 100)
//! - `ALLOWED_ORIGINS` - Comma-separated CORS origins (default: `*`)
//! - `NOMINATIM_URL` - Geocoding provider base URL
//! - `IPAPI_URL` - IP geolocation provider base URL
//! - `USER_AGENT` - Identification sent to providers that require it
//! - `PROVIDER_TIMEOUT_SECONDS` - Upstream request timeout (default: 10)
//! - `SWEEP_INTERVAL_SECONDS` - In-process cache sweep cadence (default: 3600)

use anyhow::Result;
use std::env;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Redis connection string; `None` selects the in-process cache.
    pub redis_url: Option<String>,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// When true, rate limiting reads client IP from X-Forwarded-For / X-Real-IP headers.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,
    /// Token-bucket burst size per client IP.
    pub rate_limit_burst: u32,
    /// CORS origin allowlist; `["*"]` means any origin, without credentials.
    pub allowed_origins: Vec<String>,

    // ── Upstream provider settings ──────────────────────────────────────────
    /// Nominatim base URL (`NOMINATIM_URL`).
    pub nominatim_url: String,
    /// ipapi.co base URL (`IPAPI_URL`).
    pub ipapi_url: String,
    /// User-Agent sent upstream; Nominatim's usage policy requires one.
    pub user_agent: String,
    /// Upstream request timeout in seconds (`PROVIDER_TIMEOUT_SECONDS`).
    pub provider_timeout_seconds: u64,

    /// Cadence of the in-process cache's expiry sweep in seconds
    /// (`SWEEP_INTERVAL_SECONDS`). Ignored when Redis is configured.
    pub sweep_interval_seconds: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Self {
        let redis_url = Self::load_redis_url();

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let behind_proxy = env::var("BEHIND_PROXY")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let rate_limit_burst = env::var("RATE_LIMIT_MAX")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(100);

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_else(|_| vec!["*".to_string()]);

        let nominatim_url = env::var("NOMINATIM_URL")
            .unwrap_or_else(|_| "https://nominatim.openstreetmap.org".to_string());

        let ipapi_url = env::var("IPAPI_URL").unwrap_or_else(|_| "https://ipapi.co".to_string());

        let user_agent = env::var("USER_AGENT").unwrap_or_else(|_| {
            format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
        });

        let provider_timeout_seconds = env::var("PROVIDER_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let sweep_interval_seconds = env::var("SWEEP_INTERVAL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3600);

        Self {
            redis_url,
            listen_addr,
            log_level,
            log_format,
            behind_proxy,
            rate_limit_burst,
            allowed_origins,
            nominatim_url,
            ipapi_url,
            user_agent,
            provider_timeout_seconds,
            sweep_interval_seconds,
        }
    }

    /// Loads Redis URL with fallback to component-based configuration.
    ///
    /// Priority:
    /// 1. `REDIS_URL` environment variable
    /// 2. Constructed from `REDIS_HOST`, `REDIS_PORT`, `REDIS_PASSWORD`, `REDIS_DB`
    ///
    /// Returns `None` if Redis is not configured.
    fn load_redis_url() -> Option<String> {
        // Priority 1: Use REDIS_URL if provided
        if let Ok(url) = env::var("REDIS_URL") {
            return Some(url);
        }

        // Priority 2: Build from components (if REDIS_HOST is set)
        let host = env::var("REDIS_HOST").ok()?;
        let port = env::var("REDIS_PORT").unwrap_or_else(|_| "6379".to_string());
        let password = env::var("REDIS_PASSWORD").ok();
        let db = env::var("REDIS_DB").unwrap_or_else(|_| "0".to_string());

        let url = if let Some(pwd) = password {
            // Empty password means no authentication
            if pwd.is_empty() {
                format!("redis://{}:{}/{}", host, port, db)
            } else {
                format!("redis://:{}@{}:{}/{}", pwd, host, port, db)
            }
        } else {
            format!("redis://{}:{}/{}", host, port, db)
        };

        Some(url)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any setting is out of range or malformed.
    pub fn validate(&self) -> Result<()> {
        // Validate log format
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        // Validate listen address format
        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        // Validate Redis URL format (if present)
        if let Some(ref redis_url) = self.redis_url
            && !redis_url.starts_with("redis://")
            && !redis_url.starts_with("rediss://")
        {
            anyhow::bail!(
                "REDIS_URL must start with 'redis://' or 'rediss://', got '{}'",
                redis_url
            );
        }

        // Validate provider base URLs
        for (name, value) in [
            ("NOMINATIM_URL", &self.nominatim_url),
            ("IPAPI_URL", &self.ipapi_url),
        ] {
            let parsed = url::Url::parse(value)
                .map_err(|e| anyhow::anyhow!("{} is not a valid URL ('{}'): {}", name, value, e))?;
            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                anyhow::bail!("{} must use http or https, got '{}'", name, value);
            }
        }

        if self.user_agent.is_empty() {
            anyhow::bail!("USER_AGENT must not be empty");
        }

        if self.rate_limit_burst == 0 {
            anyhow::bail!("RATE_LIMIT_MAX must be at least 1");
        }

        if self.provider_timeout_seconds == 0 || self.provider_timeout_seconds > 120 {
            anyhow::bail!(
                "PROVIDER_TIMEOUT_SECONDS must be between 1 and 120, got {}",
                self.provider_timeout_seconds
            );
        }

        if self.sweep_interval_seconds == 0 {
            anyhow::bail!("SWEEP_INTERVAL_SECONDS must be greater than 0");
        }

        Ok(())
    }

    /// Returns whether the external cache backend is configured.
    pub fn is_redis_enabled(&self) -> bool {
        self.redis_url.is_some()
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);

        if let Some(ref redis_url) = self.redis_url {
            tracing::info!("  Cache backend: redis ({})", mask_connection_string(redis_url));
        } else {
            tracing::info!(
                "  Cache backend: in-memory (sweep every {}s)",
                self.sweep_interval_seconds
            );
        }

        tracing::info!("  Geocoding provider: {}", self.nominatim_url);
        tracing::info!("  IP provider: {}", self.ipapi_url);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Rate limit burst: {}", self.rate_limit_burst);
    }
}

/// Masks sensitive information in connection strings for logging.
///
/// Replaces password with `***` in URLs like:
/// - `redis://:password@host:port/db` → `redis://:***@host:port/db`
fn mask_connection_string(url: &str) -> String {
    if let Some(start) = url.find("://") {
        let scheme_end = start + 3;
        let rest = &url[scheme_end..];

        if let Some(at_pos) = rest.find('@') {
            let credentials = &rest[..at_pos];
            let host_part = &rest[at_pos..];

            // Check if there's a password (contains ':')
            if let Some(colon_pos) = credentials.rfind(':') {
                let username = &credentials[..colon_pos];
                return format!("{}://{}:***{}", &url[..start], username, host_part);
            }
        }
    }

    url.to_string()
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env();
    config.validate()?;
    Ok(config)
}
