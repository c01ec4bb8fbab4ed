// This file implements `el-hornito export`.
// The export document wraps the settings with the export date and schema
// version, and is written to stdout or to the file given with `--output`.

use anyhow::{Context, Result, anyhow, bail};
use colored::Colorize;
use el_hornito::libs::settings_manager::SettingsManager;
use el_hornito::libs::utilities::path_helpers::expand_path;
use el_hornito::log_info;
use std::fs;

pub fn run(manager: &mut SettingsManager, output: Option<String>) -> Result<()> {
    let Some(document) = manager.export_settings() else {
        bail!("Could not export settings.");
    };

    match output {
        Some(path) => {
            let path = expand_path(&path).map_err(|e| anyhow!(e))?;
            fs::write(&path, format!("{document}\n"))
                .with_context(|| format!("Failed to write export to {}", path.display()))?;
            log_info!(
                "[Export] Settings exported to {}",
                path.display().to_string().cyan()
            );
        }
        None => println!("{document}"),
    }
    Ok(())
}
