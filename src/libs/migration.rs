//! # Settings Migration
//!
//! Normalizes an arbitrary, possibly partial or older, settings document to
//! the current schema shape and version. Migration is pure and total: it
//! never fails and never validates; callers validate the result.
//!
//! The merge is closed over the three known embedded objects rather than a
//! generic deep merge, so the set of fields that can be backfilled is exactly
//! the set the schema declares.

use crate::libs::utilities::timestamps::current_timestamp;
use crate::log_debug;
use crate::schemas::user_settings::{CURRENT_SCHEMA_VERSION, UserSettings};
use semver::Version;
use serde_json::{Map, Value};
use std::cmp::Ordering;

/// Embedded objects merged field by field onto their defaults.
const EMBEDDED_OBJECTS: [&str; 3] = ["cookingPreferences", "kitchenEquipment", "apiConfiguration"];

/// Migrates `doc` onto the current defaults and stamps version and time.
///
/// 1. Start from library defaults.
/// 2. Overlay every top-level field of `doc` (a non-object `doc` contributes nothing).
/// 3. For each embedded object, overlay `doc`'s fields onto the default
///    object, so present fields survive and missing fields are backfilled.
/// 4. Overwrite `version` and `lastUpdated`, even if nothing else changed.
pub fn migrate(doc: &Value) -> Value {
    let defaults = defaults_object();
    let input = doc.as_object();

    if let Some(stored_version) = input.and_then(|o| o.get("version")).and_then(Value::as_str) {
        log_version_change(stored_version);
    }

    let mut migrated = defaults.clone();
    if let Some(input) = input {
        for (key, value) in input {
            migrated.insert(key.clone(), value.clone());
        }
    }

    for key in EMBEDDED_OBJECTS {
        let mut merged = defaults
            .get(key)
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        if let Some(overlay) = input.and_then(|o| o.get(key)).and_then(Value::as_object) {
            for (field, value) in overlay {
                merged.insert(field.clone(), value.clone());
            }
        }
        migrated.insert(key.to_string(), Value::Object(merged));
    }

    migrated.insert(
        "version".to_string(),
        Value::String(CURRENT_SCHEMA_VERSION.to_string()),
    );
    migrated.insert("lastUpdated".to_string(), Value::String(current_timestamp()));

    Value::Object(migrated)
}

fn defaults_object() -> Map<String, Value> {
    match serde_json::to_value(UserSettings::default()) {
        Ok(Value::Object(map)) => map,
        // Unreachable for a plain derive; an empty base simply fails validation downstream.
        _ => Map::new(),
    }
}

fn log_version_change(stored: &str) {
    let (Ok(stored_version), Ok(current)) = (Version::parse(stored), Version::parse(CURRENT_SCHEMA_VERSION))
    else {
        log_debug!("[Migration] Stored schema version '{}' is not semver; restamping", stored);
        return;
    };
    match stored_version.cmp(&current) {
        Ordering::Less => log_debug!("[Migration] Upgrading settings from {} to {}", stored_version, current),
        Ordering::Greater => log_debug!(
            "[Migration] Settings were written by a newer schema ({}); restamping as {}",
            stored_version,
            current
        ),
        Ordering::Equal => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::validation::validate;
    use serde_json::json;

    fn sub_objects(doc: &Value) -> [Value; 3] {
        EMBEDDED_OBJECTS.map(|key| doc[key].clone())
    }

    #[test]
    fn partial_old_document_is_backfilled() {
        let doc = json!({ "version": "0.9.0", "cookingPreferences": { "spiceLevel": "spicy" } });
        let migrated = migrate(&doc);

        assert_eq!(migrated["version"], CURRENT_SCHEMA_VERSION);
        assert_eq!(migrated["cookingPreferences"]["spiceLevel"], "spicy");
        assert_eq!(migrated["cookingPreferences"]["cuisineTypes"], json!([]));
        assert_eq!(migrated["cookingPreferences"]["defaultServings"], 4);
        assert_eq!(migrated["kitchenEquipment"]["basicAppliances"], json!([]));
        assert_eq!(migrated["apiConfiguration"]["usageTracking"], true);
        assert!(validate(&migrated).is_valid);
    }

    #[test]
    fn present_fields_survive_and_locale_is_kept() {
        let doc = json!({
            "locale": "es",
            "kitchenEquipment": { "cookware": ["wok"] },
            "apiConfiguration": { "hasPersonalKey": true, "lastValidation": "2024-01-01T00:00:00.000Z" }
        });
        let migrated = migrate(&doc);
        assert_eq!(migrated["locale"], "es");
        assert_eq!(migrated["kitchenEquipment"]["cookware"], json!(["wok"]));
        assert_eq!(migrated["kitchenEquipment"]["other"], json!([]));
        assert_eq!(migrated["apiConfiguration"]["hasPersonalKey"], true);
        assert_eq!(migrated["apiConfiguration"]["keyValidated"], false);
        assert_eq!(
            migrated["apiConfiguration"]["lastValidation"],
            "2024-01-01T00:00:00.000Z"
        );
    }

    #[test]
    fn migration_is_idempotent_on_sub_objects() {
        let inputs = [
            json!(null),
            json!("garbage"),
            json!([1, 2, 3]),
            json!({}),
            json!({ "cookingPreferences": null, "kitchenEquipment": "none" }),
            json!({ "cookingPreferences": { "defaultServings": 99, "mealTypes": ["brunch"] } }),
        ];
        for input in inputs {
            let once = migrate(&input);
            let twice = migrate(&once);
            assert_eq!(sub_objects(&once), sub_objects(&twice), "input: {input}");
            assert_eq!(twice["version"], CURRENT_SCHEMA_VERSION);
        }
    }

    #[test]
    fn invalid_fields_are_carried_not_fixed() {
        let migrated = migrate(&json!({ "cookingPreferences": { "defaultServings": 0 } }));
        assert_eq!(migrated["cookingPreferences"]["defaultServings"], 0);
        assert!(!validate(&migrated).is_valid);
    }

    #[test]
    fn every_migration_is_restamped() {
        let doc = json!({ "version": "9.9.9", "lastUpdated": "1999-01-01T00:00:00.000Z" });
        let migrated = migrate(&doc);
        assert_eq!(migrated["version"], CURRENT_SCHEMA_VERSION);
        assert_ne!(migrated["lastUpdated"], "1999-01-01T00:00:00.000Z");
    }
}
