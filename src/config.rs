use crate::error::ConfigError;
use crate::logging::LoggingConfig;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_CLIENT_URL: &str = "http://localhost:3000";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://property-dashboard.db";
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Configuration parameters for the service and the client.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// The port to listen for HTTP requests on.
    pub port: u16,
    /// Origin allowed to call the API from a browser.
    pub client_url: String,
    /// Datastore connection string (`memory://`, `sqlite://<path>` or a path).
    pub database_url: String,
    /// Base URL the client uses to reach the API.
    pub api_url: String,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            client_url: DEFAULT_CLIENT_URL.to_string(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; unset or blank keys keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Config::default();

        if let Some(port) = get("PORT") {
            config.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: "PORT",
                reason: format!("'{port}' is not a valid port number"),
            })?;
        }
        if let Some(client_url) = get("CLIENT_URL") {
            config.client_url = client_url;
        }
        if let Some(database_url) = get("DATABASE_URL") {
            config.database_url = database_url;
        }
        if let Some(api_url) = get("API_URL") {
            if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
                return Err(ConfigError::InvalidValue {
                    field: "API_URL",
                    reason: format!("'{api_url}' must be an http(s) URL"),
                });
            }
            config.api_url = api_url;
        }
        if let Some(level) = get("LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Some(format) = get("LOG_FORMAT") {
            if format != "json" && format != "pretty" {
                return Err(ConfigError::InvalidValue {
                    field: "LOG_FORMAT",
                    reason: format!("expected 'json' or 'pretty', got '{format}'"),
                });
            }
            config.logging.format = format;
        }

        Ok(config)
    }
}
