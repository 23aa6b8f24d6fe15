use crate::app::cli::Cli;
use crate::app::models::{
    normalize_extension, RuntimeConfig, DEFAULT_ALLOWED_TOP_DIRS, DEFAULT_TRACKED_EXTENSIONS,
};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, PresetConfig>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub(crate) struct PresetConfig {
    allowed_top_dirs: Option<Vec<String>>,
    tracked_extensions: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
}

fn presets_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(
        home.join(".config")
            .join("dir_tree_json")
            .join("presets.toml"),
    )
}

/// Reads presets from `path`. A missing file yields no presets.
pub(crate) fn load_presets_from(path: &Path) -> Result<HashMap<String, PresetConfig>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let content =
        fs::read_to_string(path).context(format!("Failed to read config at {:?}", path))?;

    let parsed: PresetsFile = toml::from_str(&content).context("Failed to parse presets.toml")?;

    Ok(parsed.presets)
}

fn merge_vecs(preset_vec: Option<Vec<String>>, cli_vec: Option<Vec<String>>) -> Vec<String> {
    let mut combined = preset_vec.unwrap_or_default();
    if let Some(mut cli_items) = cli_vec {
        combined.append(&mut cli_items);
    }
    // Deduplicate while keeping order
    let mut seen = std::collections::HashSet::new();
    combined.retain(|item| seen.insert(item.clone()));
    combined
}

/// Turns a merged list into a set, falling back to `defaults` when nothing was given.
fn or_defaults(items: Vec<String>, defaults: &[&str]) -> BTreeSet<String> {
    if items.is_empty() {
        defaults.iter().map(|s| s.to_string()).collect()
    } else {
        items.into_iter().collect()
    }
}

pub fn resolve_config(cli: &Cli, project_name: Option<&str>) -> Result<RuntimeConfig> {
    let presets = match presets_path() {
        Some(path) => load_presets_from(&path)?,
        None => {
            log::debug!("No home directory, skipping presets");
            HashMap::new()
        }
    };
    Ok(resolve_with_presets(cli, project_name, &presets))
}

pub(crate) fn resolve_with_presets(
    cli: &Cli,
    project_name: Option<&str>,
    presets: &HashMap<String, PresetConfig>,
) -> RuntimeConfig {
    // Determine preset to use: CLI flag > Auto-detect > None
    let preset_key = cli.preset.as_deref().or(project_name);
    let preset = preset_key
        .and_then(|k| presets.get(k))
        .cloned()
        .unwrap_or_default();

    if let Some(key) = preset_key.filter(|k| presets.contains_key(*k)) {
        log::info!("Using preset '{}'", key);
    } else if let Some(key) = cli.preset.as_deref() {
        log::warn!("Preset '{}' not found, using defaults", key);
    }

    let allowed = merge_vecs(preset.allowed_top_dirs, cli.allow_dirs.clone());
    let extensions: Vec<String> = merge_vecs(preset.tracked_extensions, cli.extensions.clone())
        .iter()
        .map(|ext| normalize_extension(ext))
        .collect();

    RuntimeConfig {
        allowed_top_dirs: or_defaults(allowed, DEFAULT_ALLOWED_TOP_DIRS),
        tracked_extensions: or_defaults(extensions, DEFAULT_TRACKED_EXTENSIONS),
        exclude: merge_vecs(preset.exclude, cli.exclude.clone()),
    }
}
