// This file implements `el-hornito validate-key`.
// The key is sent to the validation endpoint. When the endpoint answers, the
// outcome (never the key itself) is recorded in the settings' API
// configuration; a network failure records nothing.

use anyhow::{Result, bail};
use colored::Colorize;
use el_hornito::libs::settings_manager::SettingsManager;
use el_hornito::{log_info, log_warn};

/// Main entry point for the `validate-key` command.
///
/// # Arguments
/// * `manager`: Settings manager with the HTTP validator attached.
/// * `key`: The key from `--key` or `EL_HORNITO_API_KEY`.
/// * `endpoint`: The endpoint in use, for messages only.
pub fn run(manager: &mut SettingsManager, key: Option<String>, endpoint: &str) -> Result<()> {
    let Some(key) = key.filter(|k| !k.trim().is_empty()) else {
        bail!("No API key given. Pass --key or set EL_HORNITO_API_KEY.");
    };

    log_info!("[ApiKey] Validating key against {}", endpoint.blue());
    let Some(valid) = manager.api_key_verdict(&key) else {
        bail!("No answer from {endpoint}; nothing was recorded. Check the endpoint and try again.");
    };

    if !manager.record_api_key_validation(valid) {
        log_warn!("[ApiKey] The validation result could not be saved");
    }

    if !valid {
        bail!("The API key is not valid.");
    }
    log_info!("[ApiKey] {}", "API key is valid".green());
    Ok(())
}
