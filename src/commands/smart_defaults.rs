// This file implements `el-hornito smart-defaults`.
// Without `--apply` it prints the suggested starting preferences; with it,
// they are merged into the stored settings.

use anyhow::{Result, bail};
use colored::Colorize;
use el_hornito::libs::settings_manager::SettingsManager;
use el_hornito::libs::user_state::smart_defaults;
use el_hornito::{log_info, log_warn};

pub fn run(manager: &mut SettingsManager, apply: bool) -> Result<()> {
    if !apply {
        println!("{}", serde_json::to_string_pretty(&smart_defaults())?);
        return Ok(());
    }

    if manager.has_configured_preferences() {
        log_warn!("[Settings] Replacing already configured cuisines and equipment");
    }
    if !manager.apply_smart_defaults() {
        bail!("Could not save the smart defaults.");
    }
    log_info!("[Settings] {}", "Smart defaults applied".green());
    Ok(())
}
