use std::fs;
use std::path::Path;

use super::{BrowserConfig, Result};

fn is_yaml(path: &Path) -> bool {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    matches!(extension.as_str(), "yaml" | "yml")
}

/// Reads a YAML (`.yaml` / `.yml`) or JSON configuration and validates it.
/// Missing keys keep their defaults.
pub fn load_config(path: impl AsRef<Path>) -> Result<BrowserConfig> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)?;
    let config = if is_yaml(path) {
        serde_yaml::from_str::<BrowserConfig>(&raw)?
    } else {
        serde_json::from_str::<BrowserConfig>(&raw)?
    };
    config.validate()?;
    Ok(config)
}

pub fn save_config(path: impl AsRef<Path>, config: &BrowserConfig) -> Result<()> {
    let path = path.as_ref();
    let serialized = if is_yaml(path) {
        serde_yaml::to_string(config)?
    } else {
        serde_json::to_string_pretty(config)?
    };
    fs::write(path, serialized)?;
    Ok(())
}
