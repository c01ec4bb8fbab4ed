// This file implements `el-hornito clear`, which deletes the stored settings
// after an interactive confirmation (skipped with `--yes`).

use anyhow::{Result, bail};
use dialoguer::Confirm;
use el_hornito::libs::settings_manager::SettingsManager;
use el_hornito::log_info;

pub fn run(manager: &mut SettingsManager, yes: bool) -> Result<()> {
    if !manager.is_persistent() {
        bail!("Running without persistent storage; there is nothing to clear.");
    }

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Delete all stored El Hornito settings?")
            .default(false)
            .interact()?;
        if !confirmed {
            log_info!("[Settings] Nothing was deleted");
            return Ok(());
        }
    }

    // The manager logs the removal itself.
    if !manager.clear_settings() {
        bail!("Could not clear the stored settings.");
    }
    Ok(())
}
