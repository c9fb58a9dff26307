//! Configuration management.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Configuration structure that matches the TOML file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    server: ServerConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ServerConfig {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,
    /// Allowed CORS origins (empty allows any origin)
    #[serde(default)]
    cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_allowed_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct LoggingConfig {
    /// Path to log file (if set, logs will be written to file in addition to stdout)
    log_file: Option<PathBuf>,
    /// Log level (trace, debug, info, warn, error)
    /// If not set, uses RUST_LOG environment variable or defaults to "info"
    log_level: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    tally_types::DEFAULT_PORT
}

/// Values given on the command line. Any field left `None` falls through
/// to env vars, config files and defaults.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
    /// Extra config file merged above the discovered ones
    pub config_file: Option<PathBuf>,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Allowed CORS origins (empty allows any origin)
    pub cors_allowed_origins: Vec<String>,
    /// Path to log file (if set, logs will be written to file in addition to stdout)
    pub log_file: Option<PathBuf>,
    /// Log level (if set, overrides RUST_LOG environment variable)
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration with full priority chain: CLI args > env vars > config files > defaults.
    ///
    /// Config files are searched in this order:
    /// 1. `config.toml` in the user config directory (~/.config/tally/ on Linux)
    /// 2. `.tally.toml` in the current directory
    /// 3. the file passed as `overrides.config_file`
    ///
    /// Environment variables use the `TALLY_` prefix with `__` between
    /// section and key, e.g. `TALLY_SERVER__PORT=9000`.
    pub fn from_figment(overrides: Overrides) -> anyhow::Result<Self> {
        let local_config = std::env::current_dir().ok().map(|d| d.join(".tally.toml"));
        let user_config = directories::ProjectDirs::from("", "", "tally")
            .map(|dirs| dirs.config_dir().join("config.toml"));

        // defaults < user config < local config < explicit config < env vars < CLI args
        let mut figment = Figment::new().merge(Serialized::defaults(ConfigFile::default()));

        for path in [user_config, local_config].into_iter().flatten() {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        if let Some(ref path) = overrides.config_file {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("TALLY_").split("__"));

        if let Some(ref host) = overrides.host {
            figment = figment.merge(Serialized::default("server.host", host));
        }
        if let Some(port) = overrides.port {
            figment = figment.merge(Serialized::default("server.port", port));
        }
        if let Some(ref level) = overrides.log_level {
            figment = figment.merge(Serialized::default("logging.log_level", level));
        }
        if let Some(ref file) = overrides.log_file {
            figment = figment.merge(Serialized::default("logging.log_file", file));
        }

        let config_file: ConfigFile = figment.extract()?;

        let host: IpAddr = config_file
            .server
            .host
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid host '{}': {}", config_file.server.host, e))?;

        Ok(Self {
            host,
            port: config_file.server.port,
            cors_allowed_origins: config_file.server.cors_allowed_origins,
            log_file: config_file.logging.log_file,
            log_level: config_file.logging.log_level,
        })
    }

    /// Socket address the server binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: tally_types::DEFAULT_PORT,
            cors_allowed_origins: Vec::new(),
            log_file: None,
            log_level: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    /// Run `f` with the current directory set to `dir`, restoring it afterwards.
    fn in_dir<T>(dir: &TempDir, f: impl FnOnce() -> T) -> T {
        let original_dir = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir).unwrap();
        let out = f();
        // Restore (ignore errors)
        let _ = std::env::set_current_dir(original_dir);
        out
    }

    fn clear_env() {
        std::env::remove_var("TALLY_SERVER__PORT");
        std::env::remove_var("TALLY_SERVER__HOST");
        std::env::remove_var("TALLY_LOGGING__LOG_LEVEL");
    }

    #[test]
    #[serial]
    fn test_from_figment_defaults() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();

        let config = in_dir(&temp_dir, || Config::from_figment(Overrides::default())).unwrap();

        assert_eq!(config.port, tally_types::DEFAULT_PORT);
        assert_eq!(config.host, IpAddr::from([0, 0, 0, 0]));
        assert!(config.cors_allowed_origins.is_empty());
        assert!(config.log_level.is_none());
    }

    #[test]
    #[serial]
    fn test_from_figment_config_file() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(".tally.toml"),
            r#"
[server]
host = "127.0.0.1"
port = 7777
cors_allowed_origins = ["http://localhost:3000"]

[logging]
log_level = "debug"
"#,
        )
        .unwrap();

        let config = in_dir(&temp_dir, || Config::from_figment(Overrides::default())).unwrap();

        assert_eq!(config.port, 7777);
        assert_eq!(config.socket_addr(), "127.0.0.1:7777".parse().unwrap());
        assert_eq!(config.cors_allowed_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    #[serial]
    fn test_from_figment_env_vars_override_config_file() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(".tally.toml"), "[server]\nport = 7777").unwrap();
        std::env::set_var("TALLY_SERVER__PORT", "8888");

        let config = in_dir(&temp_dir, || Config::from_figment(Overrides::default()));
        clear_env();

        assert_eq!(config.unwrap().port, 8888);
    }

    #[test]
    #[serial]
    fn test_from_figment_cli_overrides_env_and_config() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(".tally.toml"), "[server]\nport = 7777").unwrap();
        std::env::set_var("TALLY_SERVER__PORT", "8888");

        let config = in_dir(&temp_dir, || {
            Config::from_figment(Overrides {
                port: Some(9999),
                log_level: Some("warn".to_string()),
                ..Default::default()
            })
        });
        clear_env();

        let config = config.unwrap();
        assert_eq!(config.port, 9999);
        assert_eq!(config.log_level.as_deref(), Some("warn"));
    }

    #[test]
    #[serial]
    fn test_explicit_config_file() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.toml");
        fs::write(&path, "[server]\nport = 6543\n[logging]\nlog_file = \"tally.log\"").unwrap();

        let config = in_dir(&temp_dir, || {
            Config::from_figment(Overrides {
                config_file: Some(path.clone()),
                ..Default::default()
            })
        })
        .unwrap();

        assert_eq!(config.port, 6543);
        assert_eq!(config.log_file, Some(PathBuf::from("tally.log")));
    }

    #[test]
    #[serial]
    fn test_missing_explicit_config_file() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let result = Config::from_figment(Overrides {
            config_file: Some(temp_dir.path().join("nope.toml")),
            ..Default::default()
        });
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_invalid_host() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let result = in_dir(&temp_dir, || {
            Config::from_figment(Overrides {
                host: Some("not-an-ip".to_string()),
                ..Default::default()
            })
        });
        assert!(result.is_err());
    }
}
