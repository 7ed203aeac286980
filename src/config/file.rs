//! inifile.toml discovery and loading

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::toml_schema::InifileToml;

pub const CONFIG_FILE_NAME: &str = "inifile.toml";

/// Error type for configuration loading
#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be read
    Io { path: PathBuf, source: io::Error },
    /// The config file is not valid TOML for the schema
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            ConfigError::Parse { path, source } => {
                write!(f, "failed to parse {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

/// Walk from `start_dir` towards the filesystem root looking for `filename`.
///
/// With `stop_at_git_root`, a directory containing `.git` is the last one
/// searched.
pub fn find_file_upward(
    start_dir: &Path,
    filename: &str,
    stop_at_git_root: bool,
) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .scan(false, |past_root, dir| {
            if *past_root {
                return None;
            }
            *past_root = stop_at_git_root && dir.join(".git").exists();
            Some(dir)
        })
        .map(|dir| dir.join(filename))
        .find(|candidate| candidate.is_file())
}

/// Find inifile.toml upward from `start_dir`, not leaving the git repository.
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    find_file_upward(start_dir, CONFIG_FILE_NAME, true)
}

pub fn load_config(path: &Path) -> Result<InifileToml, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
