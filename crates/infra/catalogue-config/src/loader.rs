//! Configuration loader with two-layer merge and env overrides.
//!
//! 1. Read global config from `~/.config/catalogue/catalogue.json`
//! 2. Read local config from `./catalogue.json`
//! 3. Deep merge at JSON Value level (RFC 7396)
//! 4. Deserialize once into typed [`CatalogueSettings`]
//! 5. Apply env var overrides (highest precedence)
//! 6. Run advisory validation

use crate::{merge::merge_patch, types::CatalogueSettings, validation::AdvisoryWarning};
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Filename for local config.
pub const LOCAL_FILE: &str = "catalogue.json";

/// Directory name under `config_dir` for global config.
pub const GLOBAL_DIR: &str = "catalogue";

/// Filename for global config.
pub const GLOBAL_FILE: &str = "catalogue.json";

/// Resolved paths for config files.
#[derive(Debug, Clone)]
pub struct CatalogueConfigPaths {
    /// Path to local config (`./catalogue.json`).
    pub local: PathBuf,

    /// Path to global config (`~/.config/catalogue/catalogue.json`).
    pub global: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct LoadedCatalogueConfig {
    /// The merged configuration.
    pub config: CatalogueSettings,

    /// Advisory warnings from validation.
    pub warnings: Vec<AdvisoryWarning>,

    /// Resolved config file paths.
    pub paths: CatalogueConfigPaths,
}

/// Get the global config file path.
pub fn global_config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config dir")?;
    Ok(base.join(GLOBAL_DIR).join(GLOBAL_FILE))
}

/// Get the local config file path for a given directory.
pub fn local_config_path(local_dir: &Path) -> PathBuf {
    local_dir.join(LOCAL_FILE)
}

/// Load and merge configuration from the global file and `local_dir`.
pub fn load_merged(local_dir: &Path) -> Result<LoadedCatalogueConfig> {
    let global_path = global_config_path()?;
    load_merged_from(&global_path, &local_config_path(local_dir))
}

/// Load and merge configuration from explicit file paths.
///
/// Missing files count as empty objects.
pub fn load_merged_from(global_path: &Path, local_path: &Path) -> Result<LoadedCatalogueConfig> {
    let global_v = read_json_object_or_empty(global_path)?;
    let local_v = read_json_object_or_empty(local_path)?;

    let merged = merge_patch(global_v, local_v);

    let mut cfg: CatalogueSettings = serde_path_to_error::deserialize(merged)
        .map_err(|e| anyhow::anyhow!("{} at '{}'", e.inner(), e.path()))
        .context("Failed to deserialize merged catalogue config")?;

    apply_env_overrides(&mut cfg);

    let warnings = crate::validation::validate(&cfg);
    for w in &warnings {
        tracing::debug!(code = w.code, "{w}");
    }

    Ok(LoadedCatalogueConfig {
        config: cfg,
        warnings,
        paths: CatalogueConfigPaths {
            local: local_path.to_path_buf(),
            global: global_path.to_path_buf(),
        },
    })
}

fn apply_env_overrides(cfg: &mut CatalogueSettings) {
    if let Some(v) = env_trimmed("CATALOGUE_API_BASE") {
        cfg.api.base_url = v;
    }

    // Env-only secret
    if let Some(t) = env_trimmed("CATALOGUE_TOKEN") {
        cfg.api.token = Some(secrecy::SecretString::from(t));
    }

    if let Some(v) = env_trimmed("CATALOGUE_DEV_MODE") {
        cfg.admin.everyone_is_admin = is_truthy(&v);
    }
    if let Some(v) = env_trimmed("CATALOGUE_AUTH_BYPASS") {
        cfg.auth.dev_bypass = is_truthy(&v);
    }

    if let Some(v) = env_trimmed("CATALOGUE_LOG_LEVEL") {
        cfg.logging.level = v;
    }
    if let Some(v) = env_trimmed("CATALOGUE_LOG_JSON") {
        cfg.logging.json = is_truthy(&v);
    }
}

fn is_truthy(v: &str) -> bool {
    v.eq_ignore_ascii_case("true") || v == "1"
}

/// Read and normalize an env var (trim + filter empty).
fn env_trimmed(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read a JSON file as a Value, returning an empty object if the file doesn't exist.
fn read_json_object_or_empty(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Ok(Value::Object(serde_json::Map::new()));
    }

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let v: Value = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;

    match v {
        Value::Object(_) => Ok(v),
        _ => anyhow::bail!("Config root must be a JSON object: {}", path.display()),
    }
}
