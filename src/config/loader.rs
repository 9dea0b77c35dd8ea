//! Configuration loading from disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::Configuration;

/// Extension tried when the path hint has none.
pub const CONFIG_EXTENSION: &str = "toml";

/// Error type for configuration loading.
///
/// A missing file is not an error; see [`read_config_file`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Paths probed for a hint, in order.
///
/// The hint may name the file without its extension (`config` finds
/// `config.toml`).
pub fn candidate_paths(hint: &Path) -> Vec<PathBuf> {
    let mut paths = vec![hint.to_path_buf()];
    if hint.extension().is_none() {
        paths.push(hint.with_extension(CONFIG_EXTENSION));
    }
    paths
}

/// Load the configuration file for `hint`.
///
/// Returns `Ok(None)` when no candidate path exists. Missing keys take their
/// defaults; a file that exists but cannot be read or mapped is fatal.
pub fn read_config_file(hint: &Path) -> Result<Option<(PathBuf, Configuration)>, ConfigError> {
    for path in candidate_paths(hint) {
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        return match toml::from_str(&content) {
            Ok(config) => Ok(Some((path, config))),
            Err(source) => Err(ConfigError::Parse { path, source }),
        };
    }

    Ok(None)
}
