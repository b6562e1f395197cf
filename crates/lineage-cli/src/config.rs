//! Configuration file loading for the CLI
//!
//! Layout settings come from a TOML file holding the [`LayoutConfig`] fields:
//!
//! ```toml
//! horizontal_spacing = 250.0
//! vertical_spacing = 200.0
//! max_relaxation_factor = 8
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use lineage::{LayoutConfig, LineageError};

/// File looked up in the working directory when no path is given
pub const LOCAL_CONFIG_FILE: &str = "lineage.toml";

/// Find and load the layout configuration
///
/// Search order:
/// 1. Explicit path if provided
/// 2. `lineage.toml` in `working_dir`
/// 3. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
/// - Parsed values are out of range
pub fn load_config(
    explicit_path: Option<impl AsRef<Path>>,
    working_dir: &Path,
) -> Result<LayoutConfig, LineageError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = working_dir.join(LOCAL_CONFIG_FILE);
    if local_config.exists() {
        info!(path = %local_config.display(), "Loading configuration from local path");
        return load_config_file(local_config);
    }

    debug!("No configuration file found, using default configuration");
    Ok(LayoutConfig::default())
}

fn load_config_file(path: impl AsRef<Path>) -> Result<LayoutConfig, LineageError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(missing_file(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    let config: LayoutConfig = toml::from_str(&content).map_err(|e| {
        LineageError::config_error(format!(
            "Failed to parse TOML configuration '{}': {}",
            path.display(),
            e
        ))
    })?;
    config.validate()?;

    Ok(config)
}

fn missing_file(path: PathBuf) -> LineageError {
    LineageError::config_error(format!("Missing configuration file: {}", path.display()))
}
