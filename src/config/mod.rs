// Configuration module entry point
// Loads the bundled server's settings from file, environment and defaults

mod types;

use std::net::SocketAddr;

pub use types::{
    Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig, SwaggerConfig,
};

/// Environment variable prefix, e.g. `SWAGGER_SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "SWAGGER";

impl Config {
    /// Load configuration from specified file path (extension optional)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.enable_cors", false)?
            .set_default("swagger.route", "/swagger/*")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
