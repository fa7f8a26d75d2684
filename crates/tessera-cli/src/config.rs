//! Locating and loading the tool's TOML configuration.
//!
//! The engine defaults (currently just the grid row capacity) can be
//! overridden per project or per machine. The loader checks, in order: a
//! path given with `--config`, `tessera/config.toml` relative to the
//! working directory, and the platform config directory. With nothing
//! found the built-in defaults apply; only an explicitly named file is
//! required to exist.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::debug;
use thiserror::Error;

use tessera_engine::config::AppConfig;

use crate::CliError;

/// Failures while locating or parsing a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but is not valid TOML for [`AppConfig`].
    #[error("failed to parse configuration {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// A `--config` path that does not point at a file.
    #[error("configuration file not found: {0}")]
    MissingFile(PathBuf),
}

/// Loads the engine configuration.
///
/// # Errors
///
/// Returns [`ConfigError::MissingFile`] for an explicit path that does
/// not exist, [`ConfigError::Parse`] for a file that is not valid TOML,
/// and an I/O error when a probed file cannot be read.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, CliError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::MissingFile(path.to_path_buf()).into());
        }
        return parse_file(path);
    }

    for candidate in probe_locations() {
        if candidate.exists() {
            debug!(path:% = candidate.display(); "Using configuration file");
            return parse_file(&candidate);
        }
    }

    debug!("No configuration file found, engine defaults apply");
    Ok(AppConfig::default())
}

/// The probed configuration locations, most specific first.
fn probe_locations() -> Vec<PathBuf> {
    let mut locations = vec![PathBuf::from("tessera/config.toml")];
    if let Some(dirs) = ProjectDirs::from("works", "tessera", "tessera") {
        locations.push(dirs.config_dir().join("config.toml"));
    }
    locations
}

fn parse_file(path: &Path) -> Result<AppConfig, CliError> {
    let content = fs::read_to_string(path).map_err(tessera_engine::TesseraError::from)?;
    let config = toml::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let err = load_config(Some("does/not/exist.toml")).unwrap_err();
        assert!(matches!(
            err,
            CliError::Config(ConfigError::MissingFile(_))
        ));
    }

    #[test]
    fn test_invalid_toml_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[grid]\nrow_capacity = \"wide\"\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        match err {
            CliError::Config(ConfigError::Parse { path: reported, .. }) => {
                assert_eq!(reported, path);
            }
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_capacity_override_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[grid]\nrow_capacity = 2\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.grid().row_capacity(), 2);
    }
}
