//! # Settings Import / Export
//!
//! Serializes a settings document inside a metadata envelope and parses it
//! back. Both directions are pure: importing never writes to storage, that
//! is the settings manager's job.

use crate::libs::migration::migrate;
use crate::libs::utilities::timestamps::current_timestamp;
use crate::libs::validation::check;
use crate::log_debug;
use crate::schemas::user_settings::{CURRENT_SCHEMA_VERSION, SettingsExport, UserSettings};
use serde_json::Value;

/// Error reported when the envelope lacks `settings` or `version`.
pub const INVALID_IMPORT_FORMAT: &str = "Invalid import format";

/// Outcome of an import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportResult {
    pub success: bool,
    pub error: Option<String>,
    pub settings: Option<UserSettings>,
}

impl ImportResult {
    pub fn ok(settings: UserSettings) -> Self {
        Self {
            success: true,
            error: None,
            settings: Some(settings),
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            settings: None,
        }
    }
}

/// Wraps `settings` with the export date and current schema version and
/// renders it as pretty-printed JSON.
pub fn export_doc(settings: &UserSettings) -> Result<String, serde_json::Error> {
    let envelope = SettingsExport {
        settings: settings.clone(),
        export_date: current_timestamp(),
        version: CURRENT_SCHEMA_VERSION.to_string(),
    };
    serde_json::to_string_pretty(&envelope)
}

/// Parses an exported document, migrating and validating the embedded settings.
pub fn import_doc(text: &str) -> ImportResult {
    let parsed: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => return ImportResult::failed(format!("Invalid JSON: {e}")),
    };

    let settings = parsed.get("settings").filter(|s| s.is_object());
    let version = parsed.get("version").and_then(Value::as_str);
    let (Some(settings), Some(_)) = (settings, version) else {
        return ImportResult::failed(INVALID_IMPORT_FORMAT);
    };

    if let Some(exported_at) = parsed.get("exportDate").and_then(Value::as_str) {
        log_debug!("[Import] Importing settings exported at {}", exported_at);
    }

    match check(&migrate(settings)) {
        Ok(settings) => ImportResult::ok(settings),
        Err(errors) => ImportResult::failed(format!("Invalid settings: {errors}")),
    }
}
