//! Application settings, read from `settings.toml` when present and
//! overridable through `BENGKEL__`-prefixed environment variables
//! (e.g. `BENGKEL__SERVER__PORT=8080`).

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: None,
            port: default_port(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Database {
    #[serde(default = "default_database_url")]
    pub url: String,
}

impl Default for Database {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Bootstrap {
    /// Initial password of the `admin` account; only used when the
    /// account does not exist yet.
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
}

impl Default for Bootstrap {
    fn default() -> Self {
        Self {
            admin_password: default_admin_password(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    #[serde(default)]
    pub server: Server,
    #[serde(default)]
    pub database: Database,
    #[serde(default)]
    pub bootstrap: Bootstrap,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_database_url() -> String {
    "sqlite:./bengkel.db?mode=rwc".to_string()
}

fn default_admin_password() -> String {
    "admin123".to_string()
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("settings").required(false))
            .add_source(Environment::with_prefix("BENGKEL").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}
