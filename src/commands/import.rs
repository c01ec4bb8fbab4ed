// This file implements `el-hornito import`.
// The file is parsed, migrated and validated before anything is written;
// a rejected import leaves the stored settings untouched.

use anyhow::{Context, Result, anyhow, bail};
use colored::Colorize;
use el_hornito::libs::settings_manager::SettingsManager;
use el_hornito::libs::utilities::path_helpers::expand_path;
use el_hornito::log_info;
use std::fs;

pub fn run(manager: &mut SettingsManager, file: String) -> Result<()> {
    let path = expand_path(&file).map_err(|e| anyhow!(e))?;
    let text = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let result = manager.import_settings(&text);
    if !result.success {
        bail!(
            "Import failed: {}",
            result.error.unwrap_or_else(|| "unknown error".to_string())
        );
    }
    log_info!(
        "[Import] Settings imported from {}",
        path.display().to_string().cyan()
    );
    Ok(())
}
