//! Service configuration with file and environment layering.

use anyhow::Result;
use quadro_agent::agent::AgentConfig;
use quadro_agent::providers::ChatProviderConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration for the quadro service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub files: FilesConfig,
    pub provider: ChatProviderConfig,
    pub agent: AgentConfig,
    pub cors: CorsConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8001,
        }
    }
}

/// Where uploaded CSV files are stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    pub dir: PathBuf,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("files"),
        }
    }
}

/// Browser origin allowed by CORS. "*" means permissive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allow_origin: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origin: "*".to_string(),
        }
    }
}

impl AppConfig {
    /// Layer an optional TOML file and `QUADRO_*` environment variables
    /// over the defaults. Nested keys use `__`, e.g.
    /// `QUADRO_SERVER__PORT=8080`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = config::Config::try_from(&AppConfig::default())?;
        let mut builder = config::Config::builder().add_source(defaults);
        builder = match path {
            Some(path) => builder.add_source(config::File::from(path)),
            None => builder.add_source(config::File::with_name("quadro").required(false)),
        };
        let settings = builder
            .add_source(config::Environment::with_prefix("QUADRO").separator("__"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_local_frontend_setup() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8001);
        assert_eq!(config.files.dir, PathBuf::from("files"));
        assert_eq!(config.cors.allow_origin, "*");
    }

    #[test]
    fn load_without_a_file_falls_back_to_defaults() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.provider.kind, "groq");
    }
}
