//! Optional `resbundle.toml` project configuration.

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "resbundle.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResbundleConfig {
    pub root: Option<PathBuf>,
    pub aggregation_module: Option<String>,
    pub resource_dir: Option<PathBuf>,
    pub base_dir: Option<String>,
    pub file_name: Option<String>,
    pub indent: Option<String>,
    pub keep_orphan_comments: Option<bool>,
    pub exclude_modules: Option<Vec<String>>,
    pub languages: Option<Vec<String>>,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Loads `explicit` if given, otherwise `resbundle.toml` in `dir` when present.
///
/// An explicitly named file must exist; an absent default file yields the empty config. A relative
/// `root` is taken relative to the directory holding the config file.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<ResbundleConfig, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let default = dir.join(CONFIG_FILE_NAME);
            if !default.is_file() {
                return Ok(ResbundleConfig::default());
            }
            default
        }
    };
    let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let mut config: ResbundleConfig =
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
    if let Some(base) = path.parent() {
        config.root = config.root.map(|root| base.join(root));
    }
    Ok(config)
}
