//! # Settings Manager
//!
//! The façade composing storage, migration, validation, import/export, locale
//! and user-state operations. It is the only component allowed to write the
//! settings document, and it caches the last document it loaded or saved.
//!
//! ## States
//!
//! `Unloaded` (no cache) → `Loaded(doc)`. `clear_settings` returns to `Unloaded`.
//!
//! ## Failure semantics
//!
//! Every public method is total. Storage faults, malformed JSON, schema
//! violations and network errors are caught here and surface only as
//! `false`, `None`, a default document, or an [`ImportResult`] failure.
//!
//! ## Recovery policy
//!
//! A stored document that cannot be parsed or that fails validation after
//! migration is replaced by library defaults with a warning. The decision is
//! reported as [`LoadOutcome::Recovered`] by [`SettingsManager::load_with_outcome`].

use crate::libs::api_client::ApiKeyValidator;
use crate::libs::codec::{ImportResult, export_doc, import_doc};
use crate::libs::locale;
use crate::libs::migration::migrate;
use crate::libs::storage::StorageAdapter;
use crate::libs::user_state::{has_configured_preferences, smart_defaults};
use crate::libs::utilities::timestamps::current_timestamp;
use crate::libs::validation::check;
use crate::schemas::user_settings::{Locale, UserSettings};
use crate::{log_debug, log_info, log_warn};
use serde_json::Value;

/// How `load_with_outcome` arrived at the document it returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No persistent storage; defaults returned, cache untouched.
    Stateless,
    /// Nothing stored yet; defaults materialized and cached.
    Fresh,
    /// Stored document migrated, validated and cached.
    Loaded,
    /// Stored document unusable; defaults substituted and cached.
    Recovered(String),
}

pub struct SettingsManager {
    storage: StorageAdapter,
    api_validator: Option<Box<dyn ApiKeyValidator>>,
    cache: Option<UserSettings>,
}

impl SettingsManager {
    /// Manager over `storage` with no API-key validator attached.
    pub fn new(storage: StorageAdapter) -> Self {
        Self {
            storage,
            api_validator: None,
            cache: None,
        }
    }

    /// Attaches the collaborator used by [`SettingsManager::validate_api_key`].
    pub fn with_api_validator(mut self, validator: impl ApiKeyValidator + 'static) -> Self {
        self.api_validator = Some(Box::new(validator));
        self
    }

    /// Whether the manager has a persistent store.
    pub fn is_persistent(&self) -> bool {
        self.storage.is_available()
    }

    /// The last document loaded or saved, if any.
    pub fn cached(&self) -> Option<&UserSettings> {
        self.cache.as_ref()
    }

    // ------------------------------------------------------------------
    // Load / save / clear
    // ------------------------------------------------------------------

    /// Loads the settings document. Never fails, never returns an invalid document.
    pub fn load_settings(&mut self) -> UserSettings {
        self.load_with_outcome().0
    }

    /// [`SettingsManager::load_settings`] plus how the document was obtained.
    pub fn load_with_outcome(&mut self) -> (UserSettings, LoadOutcome) {
        if !self.storage.is_available() {
            log_debug!("[Settings] No persistent storage; using defaults");
            return (UserSettings::default(), LoadOutcome::Stateless);
        }

        let Some(raw) = self.storage.load_raw() else {
            log_debug!("[Settings] No stored settings; materializing defaults");
            return (self.cache_defaults(), LoadOutcome::Fresh);
        };

        let parsed: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                let reason = format!("stored settings are not valid JSON: {e}");
                log_warn!("[Settings] {}; using defaults", reason);
                return (self.cache_defaults(), LoadOutcome::Recovered(reason));
            }
        };

        match check(&migrate(&parsed)) {
            Ok(settings) => {
                self.cache = Some(settings.clone());
                (settings, LoadOutcome::Loaded)
            }
            Err(errors) => {
                let reason = format!("stored settings failed validation: {errors}");
                log_warn!("[Settings] {}; using defaults", reason);
                (self.cache_defaults(), LoadOutcome::Recovered(reason))
            }
        }
    }

    fn cache_defaults(&mut self) -> UserSettings {
        let defaults = UserSettings::default();
        self.cache = Some(defaults.clone());
        defaults
    }

    /// Validates, stamps and persists `settings`.
    ///
    /// Returns `false` without writing or touching the cache if the document
    /// is invalid (e.g. `defaultServings` out of range) or the write fails.
    pub fn save_settings(&mut self, settings: &UserSettings) -> bool {
        match serde_json::to_value(settings) {
            Ok(value) => self.save_document(&value),
            Err(e) => {
                log_warn!("[Settings] Failed to serialize settings: {}", e);
                false
            }
        }
    }

    /// Untyped counterpart of [`SettingsManager::save_settings`], for
    /// documents that come from outside the type system and may be partial.
    pub fn save_document(&mut self, doc: &Value) -> bool {
        let mut settings = match check(doc) {
            Ok(settings) => settings,
            Err(errors) => {
                log_warn!("[Settings] Refusing to save invalid settings: {}", errors);
                return false;
            }
        };
        settings.touch();

        let serialized = match serde_json::to_string(&settings) {
            Ok(text) => text,
            Err(e) => {
                log_warn!("[Settings] Failed to serialize settings: {}", e);
                return false;
            }
        };

        if !self.storage.save_raw(&serialized) {
            return false;
        }
        self.cache = Some(settings);
        true
    }

    /// Drops the cache and removes the stored document.
    ///
    /// Returns whether the removal succeeded; always `false` without persistent storage.
    pub fn clear_settings(&mut self) -> bool {
        self.cache = None;
        if !self.storage.is_available() {
            return false;
        }
        let removed = self.storage.clear();
        if removed {
            log_info!("[Settings] Stored settings cleared");
        }
        removed
    }

    // ------------------------------------------------------------------
    // Locale
    // ------------------------------------------------------------------

    pub fn set_locale(&mut self, locale: Locale) -> bool {
        let current = self.load_settings();
        self.save_settings(&locale::set_locale(&current, locale))
    }

    pub fn get_locale(&mut self) -> Locale {
        locale::get_locale(&self.load_settings())
    }

    // ------------------------------------------------------------------
    // User state
    // ------------------------------------------------------------------

    /// True when nothing has been saved yet (always true without persistent storage).
    pub fn is_new_user(&self) -> bool {
        if !self.storage.is_available() {
            return true;
        }
        !self.storage.has()
    }

    pub fn has_configured_preferences(&mut self) -> bool {
        has_configured_preferences(&self.load_settings())
    }

    /// Merges the smart-defaults bundle onto the current document and saves it.
    pub fn apply_smart_defaults(&mut self) -> bool {
        let current = self.load_settings();
        self.save_settings(&smart_defaults().apply_to(&current))
    }

    // ------------------------------------------------------------------
    // Import / export
    // ------------------------------------------------------------------

    /// Current settings as an export document, or `None` if serialization fails.
    pub fn export_settings(&mut self) -> Option<String> {
        let settings = self.load_settings();
        match export_doc(&settings) {
            Ok(text) => Some(text),
            Err(e) => {
                log_warn!("[Settings] Failed to export settings: {}", e);
                None
            }
        }
    }

    /// Parses, migrates, validates and persists an export document.
    pub fn import_settings(&mut self, text: &str) -> ImportResult {
        let result = import_doc(text);
        if !result.success {
            return result;
        }
        let Some(settings) = result.settings.clone() else {
            return result;
        };

        if !self.save_settings(&settings) {
            return ImportResult::failed("Failed to save imported settings");
        }
        match self.cache.clone() {
            Some(saved) => ImportResult::ok(saved),
            None => result,
        }
    }

    // ------------------------------------------------------------------
    // API key
    // ------------------------------------------------------------------

    /// Asks the validation collaborator about `api_key`. Any failure is `false`.
    pub fn validate_api_key(&self, api_key: &str) -> bool {
        self.api_key_verdict(api_key).unwrap_or(false)
    }

    /// The endpoint's answer about `api_key`.
    ///
    /// `None` when no answer was obtained: no validator is attached, or the
    /// request failed in transport or returned an undecodable body. A blank
    /// key is `Some(false)` without a request.
    pub fn api_key_verdict(&self, api_key: &str) -> Option<bool> {
        if api_key.trim().is_empty() {
            return Some(false);
        }
        let Some(validator) = self.api_validator.as_ref() else {
            log_warn!("[ApiKey] No validation endpoint configured");
            return None;
        };
        match validator.validate_key(api_key) {
            Ok(valid) => Some(valid),
            Err(e) => {
                log_warn!("[ApiKey] Validation failed: {}", e);
                None
            }
        }
    }

    /// Records the outcome of a key validation in `apiConfiguration` and saves.
    pub fn record_api_key_validation(&mut self, valid: bool) -> bool {
        let mut settings = self.load_settings();
        let api = &mut settings.api_configuration;
        api.has_personal_key = true;
        api.key_validated = valid;
        api.last_validation = Some(current_timestamp());
        self.save_settings(&settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::api_client::ApiClientError;
    use crate::libs::storage::{MemoryStore, SETTINGS_STORAGE_KEY};
    use crate::libs::validation::validate;
    use crate::schemas::user_settings::SpiceLevel;
    use serde_json::json;
    use std::rc::Rc;

    fn manager_with(store: &Rc<MemoryStore>) -> SettingsManager {
        SettingsManager::new(StorageAdapter::new(Rc::clone(store)))
    }

    struct FixedValidator(Result<bool, ()>);

    impl ApiKeyValidator for FixedValidator {
        fn validate_key(&self, _api_key: &str) -> Result<bool, ApiClientError> {
            self.0.map_err(|()| ApiClientError::Decode {
                url: "http://stub".into(),
                reason: "stubbed failure".into(),
            })
        }
    }

    #[test]
    fn fresh_store_yields_cached_defaults_without_writing() {
        let store = Rc::new(MemoryStore::new());
        let mut manager = manager_with(&store);

        let (settings, outcome) = manager.load_with_outcome();
        assert_eq!(outcome, LoadOutcome::Fresh);
        assert_eq!(manager.cached(), Some(&settings));
        assert!(store.peek(SETTINGS_STORAGE_KEY).is_none());
        assert!(manager.is_new_user());
    }

    #[test]
    fn stateless_load_leaves_cache_untouched() {
        let mut manager = SettingsManager::new(StorageAdapter::stateless());
        let (settings, outcome) = manager.load_with_outcome();
        assert_eq!(outcome, LoadOutcome::Stateless);
        assert!(validate(&serde_json::to_value(&settings).unwrap()).is_valid);
        assert!(manager.cached().is_none());
        assert!(manager.is_new_user());
        assert!(!manager.clear_settings());
        assert!(!manager.save_settings(&settings));
    }

    #[test]
    fn garbage_is_recovered_to_defaults() {
        for garbage in ["", "{", "null", "just some text", "[1,2]", "42"] {
            let store = Rc::new(MemoryStore::with_item(SETTINGS_STORAGE_KEY, garbage));
            let mut manager = manager_with(&store);
            let (settings, outcome) = manager.load_with_outcome();
            assert!(
                validate(&serde_json::to_value(&settings).unwrap()).is_valid,
                "garbage: {garbage:?}"
            );
            assert_eq!(manager.cached(), Some(&settings));
            // Unparsable input is recovered; parsable non-objects migrate to defaults.
            assert!(matches!(outcome, LoadOutcome::Recovered(_) | LoadOutcome::Loaded));
        }
    }

    #[test]
    fn invalid_stored_document_is_recovered_with_a_reason() {
        let stored = json!({ "cookingPreferences": { "defaultServings": 0 } }).to_string();
        let store = Rc::new(MemoryStore::with_item(SETTINGS_STORAGE_KEY, &stored));
        let mut manager = manager_with(&store);

        let (settings, outcome) = manager.load_with_outcome();
        assert_eq!(settings.cooking_preferences.default_servings, 4);
        match outcome {
            LoadOutcome::Recovered(reason) => assert!(reason.contains("defaultServings")),
            other => panic!("expected recovery, got {other:?}"),
        }
        // The bad document stays in storage; only an explicit save replaces it.
        assert_eq!(store.peek(SETTINGS_STORAGE_KEY), Some(stored));
    }

    #[test]
    fn invalid_save_writes_nothing_and_keeps_cache() {
        let store = Rc::new(MemoryStore::new());
        let mut manager = manager_with(&store);
        let before = manager.load_settings();

        assert!(!manager.save_document(&json!({ "version": "1.0.0" })));
        assert!(store.peek(SETTINGS_STORAGE_KEY).is_none());
        assert_eq!(manager.cached(), Some(&before));

        let mut too_many = before.clone();
        too_many.cooking_preferences.default_servings = 21;
        assert!(!manager.save_settings(&too_many));
        assert!(store.peek(SETTINGS_STORAGE_KEY).is_none());
    }

    #[test]
    fn failed_write_keeps_previous_cache() {
        let store = Rc::new(MemoryStore::new());
        let mut manager = manager_with(&store);
        let mut settings = manager.load_settings();
        settings.cooking_preferences.spice_level = SpiceLevel::Spicy;
        assert!(manager.save_settings(&settings));
        let saved = manager.cached().cloned();

        store.set_fail_writes(true);
        settings.cooking_preferences.spice_level = SpiceLevel::Mild;
        assert!(!manager.save_settings(&settings));
        assert_eq!(manager.cached().cloned(), saved);
    }

    #[test]
    fn save_stamps_last_updated() {
        let store = Rc::new(MemoryStore::new());
        let mut manager = manager_with(&store);
        let mut settings = manager.load_settings();
        settings.last_updated = "2001-01-01T00:00:00.000Z".into();
        assert!(manager.save_settings(&settings));
        assert_ne!(manager.cached().unwrap().last_updated, "2001-01-01T00:00:00.000Z");
    }

    #[test]
    fn locale_round_trips_through_storage() {
        let store = Rc::new(MemoryStore::new());
        let mut manager = manager_with(&store);
        assert_eq!(manager.get_locale(), Locale::En);
        assert!(manager.set_locale(Locale::Es));

        let mut reloaded = manager_with(&store);
        assert_eq!(reloaded.get_locale(), Locale::Es);
    }

    #[test]
    fn get_locale_falls_back_when_storage_fails() {
        let store = Rc::new(MemoryStore::with_item(SETTINGS_STORAGE_KEY, "{}"));
        store.set_fail_reads(true);
        let mut manager = manager_with(&store);
        assert_eq!(manager.get_locale(), Locale::En);
        assert!(manager.cached().is_some());
    }

    #[test]
    fn clear_after_save_makes_a_new_user() {
        let store = Rc::new(MemoryStore::new());
        let mut manager = manager_with(&store);
        let settings = manager.load_settings();
        assert!(manager.save_settings(&settings));
        assert!(!manager.is_new_user());

        assert!(manager.clear_settings());
        assert!(manager.cached().is_none());
        assert!(manager.is_new_user());
    }

    #[test]
    fn import_persists_and_export_round_trips() {
        let source_store = Rc::new(MemoryStore::new());
        let mut source = manager_with(&source_store);
        let mut settings = source.load_settings();
        settings.cooking_preferences.cuisine_types = vec!["Korean".into()];
        settings.kitchen_equipment.other = vec!["rice cooker".into()];
        assert!(source.save_settings(&settings));
        let exported = source.export_settings().unwrap();

        let target_store = Rc::new(MemoryStore::new());
        let mut target = manager_with(&target_store);
        let result = target.import_settings(&exported);
        assert!(result.success, "{:?}", result.error);
        assert!(target_store.peek(SETTINGS_STORAGE_KEY).is_some());

        let loaded = target.load_settings();
        assert_eq!(loaded.cooking_preferences, settings.cooking_preferences);
        assert_eq!(loaded.kitchen_equipment, settings.kitchen_equipment);
        assert_eq!(loaded.api_configuration, settings.api_configuration);
    }

    #[test]
    fn import_of_wrong_shape_fails_without_writing() {
        let store = Rc::new(MemoryStore::new());
        let mut manager = manager_with(&store);
        let result = manager.import_settings(r#"{"notValidStructure":true}"#);
        assert!(!result.success);
        assert!(result.error.is_some());
        assert!(store.peek(SETTINGS_STORAGE_KEY).is_none());
    }

    #[test]
    fn import_reports_storage_failure() {
        let store = Rc::new(MemoryStore::new());
        store.set_fail_writes(true);
        let mut manager = manager_with(&store);
        let exported = export_doc(&UserSettings::default()).unwrap();
        let result = manager.import_settings(&exported);
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Failed to save imported settings"));
    }

    #[test]
    fn api_key_validation_is_total() {
        let manager = SettingsManager::new(StorageAdapter::stateless());
        assert!(!manager.validate_api_key("sk-anything"));

        let ok = SettingsManager::new(StorageAdapter::stateless())
            .with_api_validator(FixedValidator(Ok(true)));
        assert!(ok.validate_api_key("sk-good"));
        assert!(!ok.validate_api_key("   "));

        let rejected = SettingsManager::new(StorageAdapter::stateless())
            .with_api_validator(FixedValidator(Ok(false)));
        assert!(!rejected.validate_api_key("sk-bad"));

        let broken = SettingsManager::new(StorageAdapter::stateless())
            .with_api_validator(FixedValidator(Err(())));
        assert!(!broken.validate_api_key("sk-good"));
    }

    #[test]
    fn verdict_separates_rejection_from_no_answer() {
        let unconfigured = SettingsManager::new(StorageAdapter::stateless());
        assert_eq!(unconfigured.api_key_verdict("sk-anything"), None);

        let rejected = SettingsManager::new(StorageAdapter::stateless())
            .with_api_validator(FixedValidator(Ok(false)));
        assert_eq!(rejected.api_key_verdict("sk-bad"), Some(false));
        assert_eq!(rejected.api_key_verdict("  "), Some(false));

        let broken = SettingsManager::new(StorageAdapter::stateless())
            .with_api_validator(FixedValidator(Err(())));
        assert_eq!(broken.api_key_verdict("sk-good"), None);
    }

    #[test]
    fn recording_a_validation_updates_api_configuration() {
        let store = Rc::new(MemoryStore::new());
        let mut manager = manager_with(&store);
        assert!(manager.record_api_key_validation(true));
        let api = manager.load_settings().api_configuration;
        assert!(api.has_personal_key);
        assert!(api.key_validated);
        assert!(api.last_validation.is_some());
    }

    #[test]
    fn smart_defaults_make_preferences_configured() {
        let store = Rc::new(MemoryStore::new());
        let mut manager = manager_with(&store);
        assert!(!manager.has_configured_preferences());
        assert!(manager.apply_smart_defaults());
        assert!(manager.has_configured_preferences());
    }
}
