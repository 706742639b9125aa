use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::reactor::default_worker_count;

/// Names a YAML configuration file to load instead of the defaults.
pub const CONFIG_ENV: &str = "COURIER_CONFIG";

/// Overrides `server.listen_addr`.
pub const LISTEN_ENV: &str = "LISTEN";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub client: ClientConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub workers: usize,
    /// Directory request paths are resolved against.
    pub static_root: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3333".to_string(),
            workers: default_worker_count(),
            static_root: PathBuf::from("http_root"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub workers: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { workers: 1 }
    }
}

impl Config {
    /// Loads the file named by `COURIER_CONFIG` (or the defaults), then applies `LISTEN`.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Ok(listen_addr) = std::env::var(LISTEN_ENV) {
            cfg.server.listen_addr = listen_addr;
        }

        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        Self::from_yaml(&contents)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_yaml(contents: &str) -> anyhow::Result<Self> {
        let cfg: Config = serde_yaml::from_str(contents).context("failed to parse YAML")?;

        if cfg.server.workers == 0 {
            anyhow::bail!("server.workers must be at least 1");
        }
        if cfg.client.workers == 0 {
            anyhow::bail!("client.workers must be at least 1");
        }

        Ok(cfg)
    }
}
