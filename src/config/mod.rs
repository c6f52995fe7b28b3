mod schema;

pub use schema::StructureConfig;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/gradecalc/)
pub fn get_config_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".config").join("gradecalc"))
        .unwrap_or_else(|| PathBuf::from(".gradecalc"))
}

/// Get the default dataset path (~/.config/gradecalc/data.json)
pub fn get_data_path() -> PathBuf {
    get_config_dir().join("data.json")
}

/// Ensure the parent directory of `path` exists
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory at {}", dir.display()))?;
        }
    }
    Ok(())
}

/// Load a structure configuration from a YAML (or JSON) file
///
/// # Errors
///
/// Returns an error if:
/// - The file does not exist
/// - The file cannot be read
/// - The YAML cannot be parsed
pub fn load_structure_config(path: &Path) -> Result<StructureConfig> {
    if !path.exists() {
        anyhow::bail!("Structure config not found at {}", path.display());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read structure config at {}", path.display()))?;

    let config: StructureConfig = serde_saphyr::from_str(&content).with_context(|| {
        format!("Failed to parse structure config: invalid YAML in {}", path.display())
    })?;

    Ok(config)
}
