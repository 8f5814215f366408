//! API configuration.

use std::path::PathBuf;
use std::time::Duration;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// CORS origins
    pub cors_origins: Vec<String>,
    /// Max request body size
    pub max_body_size: usize,
    /// Environment (development/production)
    pub environment: String,
    /// Directory for uploaded source images
    pub uploads_dir: PathBuf,
    /// JSON snapshot file for the video store; in-memory when unset
    pub store_path: Option<PathBuf>,
    /// JSON catalog override; built-in samples when unset
    pub catalog_path: Option<PathBuf>,
    /// Simulated generation latency
    pub simulation_delay: Duration,
    /// How long shutdown waits for in-flight simulations
    pub shutdown_grace: Duration,
    /// Expose Prometheus metrics at /metrics
    pub metrics_enabled: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: vec!["*".to_string()],
            max_body_size: 10 * 1024 * 1024, // 10MB
            environment: "development".to_string(),
            uploads_dir: PathBuf::from("uploads"),
            store_path: None,
            catalog_path: None,
            simulation_delay: Duration::from_secs(3),
            shutdown_grace: Duration::from_secs(10),
            metrics_enabled: true,
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: std::env::var("API_HOST").unwrap_or(defaults.host),
            port: env_parse("API_PORT").unwrap_or(defaults.port),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or(defaults.cors_origins),
            max_body_size: env_parse("MAX_BODY_SIZE").unwrap_or(defaults.max_body_size),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            uploads_dir: std::env::var("UPLOADS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.uploads_dir),
            store_path: env_path("STORE_PATH"),
            catalog_path: env_path("CATALOG_PATH"),
            simulation_delay: env_parse("SIMULATION_DELAY_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.simulation_delay),
            shutdown_grace: env_parse("SHUTDOWN_GRACE_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.shutdown_grace),
            metrics_enabled: std::env::var("METRICS_ENABLED")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.metrics_enabled),
        }
    }

    /// Check if running in production mode.
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.parse().ok())
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var(key).ok().filter(|s| !s.is_empty()).map(PathBuf::from)
}
