//! Host configuration handling.
//! Finds the directory modules are generated into, either from the
//! developer dotfile in the home directory or from the operator.

use crate::constants::{HOST_CONFIG_FILE, REPO_DIRECTORY_KEY};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;
use std::path::{Path, PathBuf};

/// Where modules go and how the host treats them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// Directory holding modules; `None` means the current directory.
    pub module_directory: Option<PathBuf>,
    /// The directory is a development checkout linked into the framework.
    pub devmode: bool,
}

/// Location of the host configuration file, if a home directory is known.
pub fn host_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(HOST_CONFIG_FILE))
}

/// Parses INI-style `key = value` lines.
///
/// Section headers and `;`/`#` comments are skipped, surrounding quotes are
/// stripped from values, and later keys win.
///
/// # Errors
/// * `Error::ConfigError` for a non-empty line without `=`
pub fn parse_host_config(content: &str) -> Result<IndexMap<String, String>> {
    let mut values = IndexMap::new();

    for (number, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') || line.starts_with('[')
        {
            continue;
        }

        let (key, value) = line.split_once('=').ok_or_else(|| {
            Error::ConfigError(format!("line {} is not a key = value pair", number + 1))
        })?;
        values.insert(key.trim().to_string(), unquote(value.trim()).to_string());
    }

    Ok(values)
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value.strip_prefix(quote).and_then(|v| v.strip_suffix(quote)) {
            return inner;
        }
    }
    value
}

/// Loads the host configuration from `path`.
///
/// # Returns
/// * `Ok(None)` if the file does not exist
/// * A developer-mode config pointing at `repo_directory` otherwise
pub fn load_host_config<P: AsRef<Path>>(path: P) -> Result<Option<HostConfig>> {
    let path = path.as_ref();
    if !path.exists() {
        debug!("No host configuration at {}", path.display());
        return Ok(None);
    }

    debug!("Loading host configuration from {}", path.display());
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let values = parse_host_config(&content)?;

    let module_directory = values
        .get(REPO_DIRECTORY_KEY)
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from);

    Ok(Some(HostConfig { module_directory, devmode: true }))
}

/// Computes the module root for `rawname`.
///
/// # Errors
/// * `Error::PreconditionFailed` if the configured module directory does
///   not exist or the module root already does
pub fn resolve_module_root(config: &HostConfig, rawname: &str, cwd: &Path) -> Result<PathBuf> {
    let base = match &config.module_directory {
        Some(dir) => {
            if !dir.exists() {
                return Err(Error::PreconditionFailed(format!(
                    "The repository directory ({}) does not exist",
                    dir.display()
                )));
            }
            dir.clone()
        }
        None => cwd.to_path_buf(),
    };

    let root = base.join(rawname);
    if root.exists() {
        return Err(Error::PreconditionFailed(format!(
            "This name ({}) is already in use [{}]",
            rawname,
            root.display()
        )));
    }
    Ok(root)
}
