//! # User Settings Document Schema
//!
//! This module defines the versioned user-preferences document that El Hornito
//! persists under a single key of the settings store, together with the
//! transient export envelope and the partial "smart defaults" bundle.
//!
//! ## Serialization Format
//!
//! The document is stored as JSON with camelCase field names, so a document
//! written by the web front-end and one written by this crate are
//! interchangeable:
//!
//! ```json
//! {
//!   "version": "1.0.0",
//!   "lastUpdated": "2024-03-07T10:30:45.123Z",
//!   "locale": "es",
//!   "cookingPreferences": {
//!     "cuisineTypes": ["Mexican"],
//!     "dietaryRestrictions": [],
//!     "spiceLevel": "very-spicy",
//!     "cookingTimePreference": "quick",
//!     "mealTypes": ["dinner"],
//!     "defaultServings": 2
//!   },
//!   "kitchenEquipment": {
//!     "basicAppliances": ["stove"],
//!     "advancedAppliances": [],
//!     "cookware": ["cast iron skillet"],
//!     "bakingEquipment": [],
//!     "other": []
//!   },
//!   "apiConfiguration": {
//!     "hasPersonalKey": false,
//!     "keyValidated": false,
//!     "usageTracking": true
//!   }
//! }
//! ```
//!
//! ## Versioning
//!
//! `version` is the only versioning signal in the payload. Stored documents
//! may lag behind [`CURRENT_SCHEMA_VERSION`]; they are upgraded silently by
//! the migration engine on load.

use crate::libs::utilities::timestamps::current_timestamp;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Schema version stamped on every loaded, migrated or exported document.
pub const CURRENT_SCHEMA_VERSION: &str = "1.0.0";

/// Smallest accepted value of `defaultServings`.
pub const MIN_SERVINGS: u32 = 1;
/// Largest accepted value of `defaultServings`.
pub const MAX_SERVINGS: u32 = 20;
/// `defaultServings` of a freshly materialized document.
pub const DEFAULT_SERVINGS: u32 = 4;

// ============================================================================
// ENUMERATED VALUE DOMAINS
// ============================================================================

/// UI language preference. Only English and Spanish are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
        }
    }

    /// Maps the exact strings `"en"` and `"es"` to a locale; anything else is `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Locale::En),
            "es" => Some(Locale::Es),
            _ => None,
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::from_code(&s.to_lowercase())
            .ok_or_else(|| format!("Invalid locale '{s}'. Must be one of: en, es"))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How hot the user likes their food.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpiceLevel {
    Mild,
    #[default]
    Medium,
    Spicy,
    VerySpicy,
}

impl SpiceLevel {
    /// Every accepted wire value, in order of heat.
    pub const VALUES: [&'static str; 4] = ["mild", "medium", "spicy", "very-spicy"];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpiceLevel::Mild => "mild",
            SpiceLevel::Medium => "medium",
            SpiceLevel::Spicy => "spicy",
            SpiceLevel::VerySpicy => "very-spicy",
        }
    }
}

impl FromStr for SpiceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mild" => Ok(SpiceLevel::Mild),
            "medium" => Ok(SpiceLevel::Medium),
            "spicy" => Ok(SpiceLevel::Spicy),
            "very-spicy" => Ok(SpiceLevel::VerySpicy),
            _ => Err(format!(
                "Invalid spice level '{s}'. Must be one of: {}",
                SpiceLevel::VALUES.join(", ")
            )),
        }
    }
}

impl fmt::Display for SpiceLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How much time the user is willing to spend cooking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CookingTime {
    Quick,
    #[default]
    Moderate,
    Elaborate,
}

impl CookingTime {
    pub const VALUES: [&'static str; 3] = ["quick", "moderate", "elaborate"];

    pub fn as_str(&self) -> &'static str {
        match self {
            CookingTime::Quick => "quick",
            CookingTime::Moderate => "moderate",
            CookingTime::Elaborate => "elaborate",
        }
    }
}

impl FromStr for CookingTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "quick" => Ok(CookingTime::Quick),
            "moderate" => Ok(CookingTime::Moderate),
            "elaborate" => Ok(CookingTime::Elaborate),
            _ => Err(format!(
                "Invalid cooking time '{s}'. Must be one of: {}",
                CookingTime::VALUES.join(", ")
            )),
        }
    }
}

impl fmt::Display for CookingTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The five equipment lists of [`KitchenEquipment`], addressable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipmentCategory {
    Basic,
    Advanced,
    Cookware,
    Baking,
    Other,
}

impl EquipmentCategory {
    pub const ALL: [EquipmentCategory; 5] = [
        EquipmentCategory::Basic,
        EquipmentCategory::Advanced,
        EquipmentCategory::Cookware,
        EquipmentCategory::Baking,
        EquipmentCategory::Other,
    ];

    /// JSON field name of the list inside `kitchenEquipment`.
    pub fn field_name(&self) -> &'static str {
        match self {
            EquipmentCategory::Basic => "basicAppliances",
            EquipmentCategory::Advanced => "advancedAppliances",
            EquipmentCategory::Cookware => "cookware",
            EquipmentCategory::Baking => "bakingEquipment",
            EquipmentCategory::Other => "other",
        }
    }
}

impl FromStr for EquipmentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" | "basicappliances" => Ok(EquipmentCategory::Basic),
            "advanced" | "advancedappliances" => Ok(EquipmentCategory::Advanced),
            "cookware" => Ok(EquipmentCategory::Cookware),
            "baking" | "bakingequipment" => Ok(EquipmentCategory::Baking),
            "other" => Ok(EquipmentCategory::Other),
            _ => Err(format!(
                "Invalid equipment category '{s}'. Must be one of: basic, advanced, cookware, baking, other"
            )),
        }
    }
}

impl fmt::Display for EquipmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.field_name())
    }
}

// ============================================================================
// EMBEDDED VALUE OBJECTS
// ============================================================================

/// What the user likes to eat and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CookingPreferences {
    /// Preferred cuisines, in the order the user picked them.
    pub cuisine_types: Vec<String>,
    pub dietary_restrictions: Vec<String>,
    pub spice_level: SpiceLevel,
    pub cooking_time_preference: CookingTime,
    pub meal_types: Vec<String>,
    /// Always within `[MIN_SERVINGS, MAX_SERVINGS]` once validated.
    pub default_servings: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
}

impl Default for CookingPreferences {
    fn default() -> Self {
        Self {
            cuisine_types: Vec::new(),
            dietary_restrictions: Vec::new(),
            spice_level: SpiceLevel::default(),
            cooking_time_preference: CookingTime::default(),
            meal_types: Vec::new(),
            default_servings: DEFAULT_SERVINGS,
            additional_notes: None,
        }
    }
}

/// Free-form lists of what the user's kitchen has.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KitchenEquipment {
    pub basic_appliances: Vec<String>,
    pub advanced_appliances: Vec<String>,
    pub cookware: Vec<String>,
    pub baking_equipment: Vec<String>,
    pub other: Vec<String>,
}

impl KitchenEquipment {
    pub fn list(&self, category: EquipmentCategory) -> &[String] {
        match category {
            EquipmentCategory::Basic => &self.basic_appliances,
            EquipmentCategory::Advanced => &self.advanced_appliances,
            EquipmentCategory::Cookware => &self.cookware,
            EquipmentCategory::Baking => &self.baking_equipment,
            EquipmentCategory::Other => &self.other,
        }
    }

    pub fn list_mut(&mut self, category: EquipmentCategory) -> &mut Vec<String> {
        match category {
            EquipmentCategory::Basic => &mut self.basic_appliances,
            EquipmentCategory::Advanced => &mut self.advanced_appliances,
            EquipmentCategory::Cookware => &mut self.cookware,
            EquipmentCategory::Baking => &mut self.baking_equipment,
            EquipmentCategory::Other => &mut self.other,
        }
    }
}

/// State of the user's personal AI API key. The key itself is never stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfiguration {
    pub has_personal_key: bool,
    pub key_validated: bool,
    pub usage_tracking: bool,
    /// ISO-8601 time of the last validation attempt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_validation: Option<String>,
}

impl Default for ApiConfiguration {
    fn default() -> Self {
        Self {
            has_personal_key: false,
            key_validated: false,
            usage_tracking: true,
            last_validation: None,
        }
    }
}

// ============================================================================
// ROOT DOCUMENT
// ============================================================================

/// The persisted user-preferences document.
///
/// A value of this type has, by construction, all sub-objects present and
/// correctly typed. Untyped or partial documents are handled as
/// `serde_json::Value` by the validator and migration engine before they are
/// turned into a `UserSettings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub version: String,
    pub last_updated: String,
    /// Absent means English. Unsupported codes read from storage are dropped.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_lenient_locale"
    )]
    pub locale: Option<Locale>,
    pub cooking_preferences: CookingPreferences,
    pub kitchen_equipment: KitchenEquipment,
    pub api_configuration: ApiConfiguration,
}

impl Default for UserSettings {
    /// Library defaults, stamped with the current schema version and time.
    fn default() -> Self {
        Self {
            version: CURRENT_SCHEMA_VERSION.to_string(),
            last_updated: current_timestamp(),
            locale: None,
            cooking_preferences: CookingPreferences::default(),
            kitchen_equipment: KitchenEquipment::default(),
            api_configuration: ApiConfiguration::default(),
        }
    }
}

impl UserSettings {
    /// Refreshes `lastUpdated` to now.
    pub fn touch(&mut self) {
        self.last_updated = current_timestamp();
    }
}

fn deserialize_lenient_locale<'de, D>(deserializer: D) -> Result<Option<Locale>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(Value::as_str).and_then(Locale::from_code))
}

/// Transport envelope produced by export and required by import.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsExport {
    pub settings: UserSettings,
    pub export_date: String,
    pub version: String,
}

/// A partial document (`Partial<UserSettings>`): sub-objects that, when
/// present, replace the corresponding sub-object of the document it is
/// applied to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooking_preferences: Option<CookingPreferences>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kitchen_equipment: Option<KitchenEquipment>,
}
