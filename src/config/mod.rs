// Configuration module entry point
// Loads application settings from file and environment at startup

mod types;

use std::net::SocketAddr;

use crate::error::ShellError;

// Re-export public types
pub use types::{
    AppConfig, Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig,
    StaticFilesConfig,
};

impl Config {
    /// Load configuration from the default "config.toml" in the working
    /// directory, merged with `SAMUI_*` environment variables.
    pub fn load() -> Result<Self, ShellError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// The file is optional; defaults below describe a complete server. Any
    /// value present but malformed is a startup failure, never a partial
    /// server.
    pub fn load_from(config_path: &str) -> Result<Self, ShellError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                // SAMUI_HTTP__SERVER_NAME addresses http.server_name; the
                // double separator keeps keys with underscores intact
                config::Environment::with_prefix("SAMUI")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("app.debug", false)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("http.server_name", "samui")?
            .set_default("http.max_body_size", 10_485_760)? // 10MB
            .set_default("static_files.root", "static")?
            .set_default("static_files.index_file", "index.html")?
            .set_default("static_files.default_max_age", 3600)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, ShellError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse().map_err(|e| ShellError::InvalidAddr {
            addr,
            reason: format!("{e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_config_file() {
        let cfg = Config::load_from("nonexistent-config-for-tests").unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8000);
        assert!(!cfg.app.debug);
        assert!(cfg.logging.access_log);
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert_eq!(cfg.static_files.root, "static");
        assert_eq!(cfg.static_files.default_max_age, 3600);
        assert_eq!(cfg.http.max_body_size, 10_485_760);
    }

    #[test]
    fn test_socket_addr_parses() {
        let cfg = Config::load_from("nonexistent-config-for-tests").unwrap();
        let addr = cfg.get_socket_addr().unwrap();
        assert_eq!(addr.port(), 8000);
    }

    #[test]
    fn test_env_override_applies() {
        // server_name is asserted by no other test, so a leaked variable
        // cannot race a parallel config load
        std::env::set_var("SAMUI_HTTP__SERVER_NAME", "samui-from-env");
        let cfg = Config::load_from("nonexistent-config-for-tests").unwrap();
        std::env::remove_var("SAMUI_HTTP__SERVER_NAME");
        assert_eq!(cfg.http.server_name, "samui-from-env");
    }

    #[test]
    fn test_invalid_host_is_fatal() {
        let mut cfg = Config::load_from("nonexistent-config-for-tests").unwrap();
        cfg.server.host = "not a host".to_string();
        assert!(matches!(
            cfg.get_socket_addr(),
            Err(crate::error::ShellError::InvalidAddr { .. })
        ));
    }
}
