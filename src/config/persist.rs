//! Configuration persistence using toml_edit to preserve formatting and comments.

use super::{Config, SelectionPolicy};
use anyhow::{Context, Result};
use std::path::Path;
use toml_edit::DocumentMut;

/// Save the entire config to a TOML file (full replacement)
pub fn save_config(path: &Path, config: &Config) -> Result<()> {
    let content = toml::to_string_pretty(config).with_context(|| "Failed to serialize config")?;

    ensure_parent(path)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    Ok(())
}

/// Update just the selection section of the config file
///
/// Creates the file if it does not exist. Other tables and comments are kept.
pub fn update_selection(path: &Path, selection: &SelectionPolicy) -> Result<()> {
    let mut doc: DocumentMut = if path.exists() {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?
            .parse()
            .with_context(|| format!("Failed to parse config file: {:?}", path))?
    } else {
        DocumentMut::new()
    };

    let selection_toml = toml::to_string(&SelectionWrapper {
        selection: selection.clone(),
    })
    .with_context(|| "Failed to serialize selection")?;
    let selection_doc: DocumentMut = selection_toml
        .parse()
        .with_context(|| "Failed to parse serialized selection")?;

    if let Some(item) = selection_doc.get("selection") {
        doc["selection"] = item.clone();
    }

    ensure_parent(path)?;
    std::fs::write(path, doc.to_string())
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }
    Ok(())
}

#[derive(serde::Serialize)]
struct SelectionWrapper {
    selection: SelectionPolicy,
}
