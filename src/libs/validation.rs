//! # Settings Document Validation
//!
//! Structural and type validation of an untyped settings document. Every
//! check runs independently and all violations are collected, so a caller
//! gets the full error list in one pass.
//!
//! [`validate`] is the reporting form; [`check`] is the `Result`-returning
//! core that turns an accepted document into a typed [`UserSettings`].

use crate::schemas::user_settings::{
    CookingTime, EquipmentCategory, Locale, MAX_SERVINGS, MIN_SERVINGS, SpiceLevel, UserSettings,
};
use serde_json::{Map, Value};
use std::fmt;

/// Outcome of validating a settings document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    /// Non-fatal notices; they never affect `is_valid`.
    pub warnings: Vec<String>,
}

/// The errors of a rejected document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<String>);

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

const COOKING_LIST_FIELDS: [&str; 3] = ["cuisineTypes", "dietaryRestrictions", "mealTypes"];
const API_FLAG_FIELDS: [&str; 3] = ["hasPersonalKey", "keyValidated", "usageTracking"];

/// Validates `doc` against the settings schema without modifying it.
pub fn validate(doc: &Value) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if !doc.get("version").is_some_and(Value::is_string) {
        errors.push("Missing or invalid version".to_string());
    }
    if !doc.get("lastUpdated").is_some_and(Value::is_string) {
        errors.push("Missing or invalid lastUpdated".to_string());
    }

    match doc.get("locale") {
        None | Some(Value::Null) => {}
        Some(Value::String(code)) if Locale::from_code(code).is_some() => {}
        Some(other) => warnings.push(format!(
            "Unsupported locale {other}; falling back to '{}'",
            Locale::default()
        )),
    }

    match doc.get("cookingPreferences").and_then(Value::as_object) {
        Some(prefs) => validate_cooking_preferences(prefs, &mut errors),
        None => errors.push("Missing cookingPreferences".to_string()),
    }

    match doc.get("kitchenEquipment").and_then(Value::as_object) {
        Some(equipment) => {
            for category in EquipmentCategory::ALL {
                check_string_list(equipment, "kitchenEquipment", category.field_name(), &mut errors);
            }
        }
        None => errors.push("Missing kitchenEquipment".to_string()),
    }

    match doc.get("apiConfiguration").and_then(Value::as_object) {
        Some(api) => {
            for field in API_FLAG_FIELDS {
                if !api.get(field).is_some_and(Value::is_boolean) {
                    errors.push(format!("apiConfiguration.{field} must be a boolean"));
                }
            }
            check_optional_string(api, "apiConfiguration", "lastValidation", &mut errors);
        }
        None => errors.push("Missing apiConfiguration".to_string()),
    }

    ValidationReport {
        is_valid: errors.is_empty(),
        errors,
        warnings,
    }
}

/// Validates `doc` and, if it is accepted, converts it into the typed document.
pub fn check(doc: &Value) -> Result<UserSettings, ValidationErrors> {
    let report = validate(doc);
    if !report.is_valid {
        return Err(ValidationErrors(report.errors));
    }
    serde_json::from_value(doc.clone()).map_err(|e| ValidationErrors(vec![e.to_string()]))
}

fn validate_cooking_preferences(prefs: &Map<String, Value>, errors: &mut Vec<String>) {
    for field in COOKING_LIST_FIELDS {
        check_string_list(prefs, "cookingPreferences", field, errors);
    }

    let spice_ok = prefs
        .get("spiceLevel")
        .and_then(Value::as_str)
        .is_some_and(|s| SpiceLevel::VALUES.contains(&s));
    if !spice_ok {
        errors.push(format!(
            "Invalid spiceLevel (expected one of: {})",
            SpiceLevel::VALUES.join(", ")
        ));
    }

    let time_ok = prefs
        .get("cookingTimePreference")
        .and_then(Value::as_str)
        .is_some_and(|s| CookingTime::VALUES.contains(&s));
    if !time_ok {
        errors.push(format!(
            "Invalid cookingTimePreference (expected one of: {})",
            CookingTime::VALUES.join(", ")
        ));
    }

    let servings_ok = prefs
        .get("defaultServings")
        .and_then(Value::as_u64)
        .is_some_and(|n| (u64::from(MIN_SERVINGS)..=u64::from(MAX_SERVINGS)).contains(&n));
    if !servings_ok {
        errors.push(format!(
            "defaultServings must be a whole number between {MIN_SERVINGS} and {MAX_SERVINGS}"
        ));
    }

    check_optional_string(prefs, "cookingPreferences", "additionalNotes", errors);
}

fn check_string_list(obj: &Map<String, Value>, parent: &str, field: &str, errors: &mut Vec<String>) {
    match obj.get(field) {
        Some(Value::Array(items)) => {
            if !items.iter().all(Value::is_string) {
                errors.push(format!("{parent}.{field} must contain only strings"));
            }
        }
        _ => errors.push(format!("{parent}.{field} must be an array")),
    }
}

fn check_optional_string(obj: &Map<String, Value>, parent: &str, field: &str, errors: &mut Vec<String>) {
    match obj.get(field) {
        None | Some(Value::Null) | Some(Value::String(_)) => {}
        Some(_) => errors.push(format!("{parent}.{field} must be a string")),
    }
}
