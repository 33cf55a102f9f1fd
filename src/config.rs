use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("CF_HOME is not set and no home directory could be determined")]
    NoHomeDir,
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct EntityFields {
    pub guid: String,
    pub name: String,
}

/// Session state written by `cf login` and read by every other command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Config {
    pub target: String,
    /// Full `Authorization` header value, including the `bearer` prefix.
    pub access_token: String,
    pub username: String,
    pub organization_fields: EntityFields,
    pub space_fields: EntityFields,
    #[serde(rename = "SSLDisabled")]
    pub ssl_disabled: bool,
}

impl Config {
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let home = std::env::var_os("CF_HOME")
            .map(PathBuf::from)
            .or_else(dirs::home_dir)
            .ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".cf").join("config.json"))
    }

    /// A missing file is a logged-out session, not an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn has_api_endpoint(&self) -> bool {
        !self.target.is_empty()
    }

    pub fn is_logged_in(&self) -> bool {
        !self.access_token.is_empty()
    }

    pub fn organization_name(&self) -> &str {
        &self.organization_fields.name
    }

    pub fn space_name(&self) -> &str {
        &self.space_fields.name
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}
