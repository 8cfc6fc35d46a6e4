//! Application settings and configuration structures.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Root configuration structure containing all application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Server configuration (host, port)
    pub server: ServerSettings,

    /// Upstream backend that owns all business logic
    pub backend: BackendSettings,

    /// Proxy behaviour
    pub proxy: ProxySettings,

    /// CORS configuration
    pub cors: CorsSettings,

    /// Console client defaults (page size, refresh interval)
    pub console: ConsoleSettings,

    /// Current environment (development, staging, production)
    pub environment: String,
}

/// Server binding configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to (e.g., "0.0.0.0")
    pub host: String,

    /// Port number to listen on
    pub port: u16,
}

/// Backend service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendSettings {
    /// Base URL of the backend (e.g., "http://127.0.0.1:8000")
    pub url: String,

    /// Whole-request timeout in seconds
    pub timeout_secs: u64,

    /// TCP connect timeout in seconds
    pub connect_timeout_secs: u64,
}

/// Proxy configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ProxySettings {
    /// Value of the `x-proxy-source` header attached to every proxied exchange
    pub source_name: String,

    /// Largest request body the proxy will buffer
    pub max_body_bytes: usize,
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// Allowed origins (comma-separated in env)
    pub allowed_origins: Vec<String>,
}

/// Console client defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct ConsoleSettings {
    /// Default table page size
    pub page_size: u32,

    /// Auto-refresh interval in seconds
    pub auto_refresh_secs: u64,
}

impl Settings {
    /// Load settings from environment variables and configuration files.
    ///
    /// The loading order is:
    /// 1. config/default.toml (base configuration)
    /// 2. config/{RUN_ENV}.toml (environment-specific overrides)
    /// 3. Environment variables (highest priority)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or parsed,
    /// or if the backend URL is not an absolute http(s) URL.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        Config::builder()
            .set_default("environment", environment.clone())?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("backend.url", "http://127.0.0.1:8000")?
            .set_default("backend.timeout_secs", 30)?
            .set_default("backend.connect_timeout_secs", 5)?
            .set_default("proxy.source_name", "seat-console")?
            .set_default("proxy.max_body_bytes", 10_485_760_i64)? // 10MB
            .set_default("cors.allowed_origins", vec!["http://localhost:3000"])?
            .set_default("console.page_size", 20)?
            .set_default("console.auto_refresh_secs", 30)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // APP__BACKEND__URL=http://backend:8000 -> backend.url
            .add_source(
                Environment::default()
                    .prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("backend.url", std::env::var("BACKEND_URL").ok())?
            .build()?
            .try_deserialize()
            .and_then(|settings: Self| {
                settings.backend.validate()?;
                Ok(settings)
            })
    }

    /// Get the full server address as a string.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl BackendSettings {
    /// Check that the URL is absolute and uses http or https.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.url).map_err(|e| {
            ConfigError::Message(format!("Invalid backend URL '{}': {}", self.url, e))
        })?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ConfigError::Message(format!(
                "Backend URL must use http or https, got '{}'",
                other
            ))),
        }
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Join a path (with or without leading slash) onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url(), path.trim_start_matches('/'))
    }
}

impl Default for ProxySettings {
    fn default() -> Self {
        Self {
            source_name: "seat-console".into(),
            max_body_bytes: 10 * 1024 * 1024,
        }
    }
}

impl ConsoleSettings {
    /// Auto-refresh period; never shorter than one second.
    pub fn refresh_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.auto_refresh_secs.max(1))
    }
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            page_size: 20,
            auto_refresh_secs: 30,
        }
    }
}
