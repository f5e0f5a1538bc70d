//! Configuration module for teamforge-server.
//!
//! Handles loading configuration from TOML files, CLI arguments,
//! and environment variables.

pub mod file;
pub mod runtime;

use crate::config::file::{FileConfig, MailConfig as FileMailConfig};
use crate::config::runtime::{MailConfig, SchedulerConfig, ServerConfig, SmtpConfig};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("DATABASE_URL environment variable not set")]
    MissingDatabaseUrl,
}

/// Loaded configuration result containing all parts.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub server: ServerConfig,
    pub scheduler: SchedulerConfig,
    pub mail: MailConfig,
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: std::path::PathBuf,
    listen_override: Option<SocketAddr>,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(config_path: impl AsRef<Path>, listen_override: Option<SocketAddr>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            listen_override,
        }
    }

    /// Load and process the configuration.
    ///
    /// This will:
    /// 1. Read the TOML file
    /// 2. Apply CLI overrides
    /// 3. Validate the configuration
    /// 4. Build the runtime configuration
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let config_content = std::fs::read_to_string(&self.config_path)?;
        self.parse(&config_content)
    }

    fn parse(&self, config_content: &str) -> Result<LoadedConfig, ConfigError> {
        let mut file_config: FileConfig = toml::from_str(config_content)?;

        if let Some(listen) = self.listen_override {
            file_config.server.listen = listen;
        }

        self.validate(&file_config)?;

        Ok(self.build_loaded_config(file_config))
    }

    fn validate(&self, config: &FileConfig) -> Result<(), ConfigError> {
        if config.scheduler.tick_interval_secs == 0 {
            return Err(ConfigError::ValidationError(
                "scheduler.tick_interval_secs must be positive".to_string(),
            ));
        }

        let mail = &config.mail;
        if mail.enabled {
            if mail.smtp_host.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "mail.smtp_host is required when mail is enabled".to_string(),
                ));
            }
            if mail.from_address.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "mail.from_address is required when mail is enabled".to_string(),
                ));
            }
        }
        Ok(())
    }

    fn build_loaded_config(&self, file_config: FileConfig) -> LoadedConfig {
        LoadedConfig {
            server: ServerConfig {
                listen: file_config.server.listen,
            },
            scheduler: SchedulerConfig {
                tick_interval: Duration::from_secs(file_config.scheduler.tick_interval_secs),
            },
            mail: convert_mail(file_config.mail),
        }
    }
}

fn convert_mail(m: FileMailConfig) -> MailConfig {
    if !m.enabled {
        return MailConfig::Disabled;
    }
    MailConfig::Smtp(SmtpConfig {
        host: m.smtp_host,
        port: m.smtp_port,
        username: m.username,
        password: m.password,
        from_address: m.from_address,
        from_name: m.from_name,
    })
}

/// Get the database URL from the environment.
pub fn get_database_url() -> Result<String, ConfigError> {
    std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loader(listen_override: Option<SocketAddr>) -> ConfigLoader {
        ConfigLoader::new("./teamforge-config.toml", listen_override)
    }

    #[test]
    fn test_builds_runtime_config() {
        let loaded = loader(None)
            .parse(
                r#"
[server]
listen = "127.0.0.1:9000"

[scheduler]
tick_interval_secs = 15

[mail]
enabled = true
smtp_host = "smtp.example.com"
username = "bot"
password = "secret"
from_address = "bot@example.com"
"#,
            )
            .unwrap();

        assert_eq!(loaded.server.listen.port(), 9000);
        assert_eq!(loaded.scheduler.tick_interval, Duration::from_secs(15));
        match loaded.mail {
            MailConfig::Smtp(smtp) => {
                assert_eq!(smtp.host, "smtp.example.com");
                assert_eq!(smtp.port, 587);
                assert_eq!(smtp.from_name, "Hackathon Teams");
            }
            MailConfig::Disabled => panic!("mail should be enabled"),
        }
    }

    #[test]
    fn test_listen_override_wins() {
        let addr: SocketAddr = "0.0.0.0:4000".parse().unwrap();
        let loaded = loader(Some(addr))
            .parse("[server]\nlisten = \"127.0.0.1:9000\"\n")
            .unwrap();
        assert_eq!(loaded.server.listen, addr);
    }

    #[test]
    fn test_disabled_mail_skips_smtp_validation() {
        let loaded = loader(None)
            .parse("[server]\n\n[mail]\nenabled = false\n")
            .unwrap();
        assert!(matches!(loaded.mail, MailConfig::Disabled));
        assert_eq!(loaded.scheduler, SchedulerConfig::default());
    }

    #[test]
    fn test_zero_tick_interval_is_rejected() {
        let result = loader(None).parse("[server]\n\n[scheduler]\ntick_interval_secs = 0\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_enabled_mail_requires_host_and_sender() {
        let no_host = loader(None).parse(
            "[server]\n\n[mail]\nenabled = true\nfrom_address = \"bot@example.com\"\n",
        );
        assert!(matches!(no_host, Err(ConfigError::ValidationError(_))));

        let no_sender =
            loader(None).parse("[server]\n\n[mail]\nenabled = true\nsmtp_host = \"smtp\"\n");
        assert!(matches!(no_sender, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = ConfigLoader::new("/nonexistent/teamforge-config.toml", None).load();
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let result = loader(None).parse("[server\nlisten = ");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
