//! Server configuration.
//!
//! Values are layered: built-in defaults, then a TOML file, then `CERTCAL_*`
//! environment variables (e.g. `CERTCAL_PORT=8080`).

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use certcal_core::event::DEFAULT_UID_DOMAIN;
use certcal_core::ics::{DEFAULT_PRODUCT_ID, IcsOptions};
use certcal_core::{CertCalError, CertCalResult};
use config::{Config, Environment, File};
use serde::Deserialize;

static DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_product_id() -> String {
    DEFAULT_PRODUCT_ID.to_string()
}

fn default_uid_domain() -> String {
    DEFAULT_UID_DOMAIN.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// PRODID of the generated feed
    #[serde(default = "default_product_id")]
    pub product_id: String,

    /// Suffix for generated event UIDs
    #[serde(default = "default_uid_domain")]
    pub uid_domain: String,

    /// Name shown by calendar clients that subscribe to the feed
    pub calendar_name: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: default_host(),
            port: default_port(),
            product_id: default_product_id(),
            uid_domain: default_uid_domain(),
            calendar_name: None,
        }
    }
}

impl ServerConfig {
    /// ~/.config/certcal/config.toml
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("certcal").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, `./certcal.toml` and the
    /// user config file are both optional.
    pub fn load(path: Option<&Path>) -> CertCalResult<Self> {
        let mut builder = Config::builder();

        match path {
            Some(path) => {
                builder = builder.add_source(File::from(path).required(true));
            }
            None => {
                if let Some(user_path) = Self::user_config_path() {
                    builder = builder.add_source(File::from(user_path).required(false));
                }
                builder = builder.add_source(File::with_name("certcal").required(false));
            }
        }

        builder
            .add_source(Environment::with_prefix("CERTCAL"))
            .build()
            .map_err(|e| CertCalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CertCalError::Config(e.to_string()))
    }

    pub fn socket_addr(&self) -> CertCalResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| CertCalError::Config(format!("Invalid listen address: {e}")))
    }

    pub fn ics_options(&self) -> IcsOptions {
        IcsOptions {
            product_id: self.product_id.clone(),
            uid_domain: self.uid_domain.clone(),
            calendar_name: self.calendar_name.clone(),
        }
    }
}
