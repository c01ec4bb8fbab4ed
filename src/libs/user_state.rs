// Signals derived from a loaded settings document: whether the user has moved
// away from the defaults, and the "smart defaults" bundle offered to new or
// under-configured users.

use crate::schemas::user_settings::{
    CookingPreferences, CookingTime, KitchenEquipment, SettingsPatch, SpiceLevel, UserSettings,
};

/// True iff the user departed from the defaults in at least one of:
/// cuisines, dietary restrictions, spice level, cooking time.
pub fn has_configured_preferences(doc: &UserSettings) -> bool {
    let prefs = &doc.cooking_preferences;
    !prefs.cuisine_types.is_empty()
        || !prefs.dietary_restrictions.is_empty()
        || prefs.spice_level != SpiceLevel::Medium
        || prefs.cooking_time_preference != CookingTime::Moderate
}

/// A fixed, reasonable starting point, independent of any stored document.
pub fn smart_defaults() -> SettingsPatch {
    SettingsPatch {
        cooking_preferences: Some(CookingPreferences {
            cuisine_types: to_strings(&["Italian", "Mexican", "Asian"]),
            meal_types: to_strings(&["lunch", "dinner"]),
            ..CookingPreferences::default()
        }),
        kitchen_equipment: Some(KitchenEquipment {
            basic_appliances: to_strings(&["stove", "oven", "microwave", "refrigerator"]),
            cookware: to_strings(&["frying pan", "saucepan", "baking sheet", "cutting board"]),
            baking_equipment: to_strings(&["mixing bowls", "measuring cups"]),
            ..KitchenEquipment::default()
        }),
    }
}

impl SettingsPatch {
    /// Merges the patch onto `doc`: sub-objects present in the patch replace
    /// the document's, everything else (locale, API configuration, version)
    /// is kept. `defaultServings` and notes the user already chose survive.
    pub fn apply_to(&self, doc: &UserSettings) -> UserSettings {
        let mut merged = doc.clone();
        if let Some(prefs) = &self.cooking_preferences {
            let current = &doc.cooking_preferences;
            merged.cooking_preferences = CookingPreferences {
                default_servings: current.default_servings,
                additional_notes: current.additional_notes.clone(),
                ..prefs.clone()
            };
        }
        if let Some(equipment) = &self.kitchen_equipment {
            merged.kitchen_equipment = equipment.clone();
        }
        merged
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
