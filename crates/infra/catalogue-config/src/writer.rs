//! Atomic writes for config files.

use anyhow::{Context, Result};
use atomicwrites::{AllowOverwrite, AtomicFile, DisallowOverwrite};
use serde_json::Value;
use std::io::Write;
use std::path::Path;

/// Write `value` as pretty JSON, replacing `path` atomically.
pub fn write_pretty_json_atomic(path: &Path, value: &Value) -> Result<()> {
    write_impl(path, value, true)
}

/// Like [`write_pretty_json_atomic`], but fails if `path` already exists.
pub fn write_new_pretty_json_atomic(path: &Path, value: &Value) -> Result<()> {
    write_impl(path, value, false)
}

fn write_impl(path: &Path, value: &Value, overwrite: bool) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut json = serde_json::to_string_pretty(value).context("Failed to serialize config")?;
    json.push('\n');

    let result = if overwrite {
        AtomicFile::new(path, AllowOverwrite).write(|f| f.write_all(json.as_bytes()))
    } else {
        AtomicFile::new(path, DisallowOverwrite).write(|f| f.write_all(json.as_bytes()))
    };
    result.with_context(|| format!("Failed to write config file: {}", path.display()))?;

    Ok(())
}
