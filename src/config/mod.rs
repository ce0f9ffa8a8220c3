// Configuration module entry point
// Loads server and handler settings from file, environment and defaults

mod types;

use std::net::SocketAddr;

// Re-export public types
pub use types::{Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig};

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Missing files are fine; environment variables use the `JSON_HANDLER` prefix
    /// with `__` between sections, e.g. `JSON_HANDLER_SERVER__PORT=9000`
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("JSON_HANDLER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("http.max_body_size", 10_485_760)? // 10MB
            .build()?;

        settings.try_deserialize()
    }

    /// Load `config.toml` from the working directory
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::load_from("definitely-missing-config").unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.http.max_body_size, 10_485_760);
        assert_eq!(cfg.performance.keep_alive_timeout, 75);
        assert!(cfg.logging.error_log_file.is_none());
        assert_eq!(
            cfg.get_socket_addr().unwrap(),
            "127.0.0.1:8080".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = std::env::temp_dir().join(format!("json-handler-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("custom.toml");
        std::fs::write(
            &path,
            "[server]\nport = 9090\n\n[logging]\nerror_log_file = \"logs/error.log\"\n\n[http]\nmax_body_size = 1024\n",
        )
        .unwrap();

        let cfg = Config::load_from(&dir.join("custom").to_string_lossy()).unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.http.max_body_size, 1024);
        assert_eq!(cfg.logging.error_log_file.as_deref(), Some("logs/error.log"));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_environment_overrides() {
        std::env::set_var("JSON_HANDLER_SERVER__WORKERS", "3");
        let cfg = Config::load_from("definitely-missing-config");
        std::env::remove_var("JSON_HANDLER_SERVER__WORKERS");

        assert_eq!(cfg.unwrap().server.workers, Some(3));
    }

    #[test]
    fn test_invalid_address() {
        let mut cfg = Config::load_from("definitely-missing-config").unwrap();
        cfg.server.host = "not a host".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }
}
