// This file implements `el-hornito set`.
// It loads the current settings, applies the requested changes and saves
// the result. Validation happens on save, so out-of-range values are refused
// without touching the stored document.

use crate::cli::cmd_enums::SetArgs;
use anyhow::{Result, bail};
use colored::Colorize;
use el_hornito::libs::settings_manager::SettingsManager;
use el_hornito::schemas::user_settings::{EquipmentCategory, UserSettings};
use el_hornito::{log_debug, log_info};

/// Main entry point for the `set` command.
///
/// # Arguments
/// * `manager`: The settings manager to load from and save through.
/// * `args`: The requested changes; list options replace the stored lists.
pub fn run(manager: &mut SettingsManager, args: SetArgs) -> Result<()> {
    log_debug!("Entered set::run() function.");
    if args.is_empty() {
        bail!("Nothing to change. Run `el-hornito set --help` for the available options.");
    }

    let mut settings = manager.load_settings();
    apply(&mut settings, args);

    if !manager.save_settings(&settings) {
        if !manager.is_persistent() {
            bail!("Running without persistent storage; nothing was saved.");
        }
        bail!("Settings were not saved. See the warnings above.");
    }
    log_info!("[Settings] {}", "Preferences saved".green());
    Ok(())
}

/// Applies `args` to `settings` in place.
fn apply(settings: &mut UserSettings, args: SetArgs) {
    let prefs = &mut settings.cooking_preferences;
    if let Some(level) = args.spice_level {
        prefs.spice_level = level;
    }
    if let Some(time) = args.cooking_time {
        prefs.cooking_time_preference = time;
    }
    if let Some(servings) = args.servings {
        prefs.default_servings = servings;
    }
    if !args.cuisines.is_empty() {
        prefs.cuisine_types = args.cuisines;
    }
    if !args.restrictions.is_empty() {
        prefs.dietary_restrictions = args.restrictions;
    }
    if !args.meal_types.is_empty() {
        prefs.meal_types = args.meal_types;
    }
    if let Some(notes) = args.notes {
        let notes = notes.trim();
        prefs.additional_notes = (!notes.is_empty()).then(|| notes.to_string());
    }

    // Each category named on the command line is replaced as a whole.
    for category in EquipmentCategory::ALL {
        let items: Vec<String> = args
            .equipment
            .iter()
            .filter(|entry| entry.category == category)
            .map(|entry| entry.item.clone())
            .collect();
        if !items.is_empty() {
            *settings.kitchen_equipment.list_mut(category) = items;
        }
    }

    if let Some(tracking) = args.usage_tracking {
        settings.api_configuration.usage_tracking = tracking;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use el_hornito::schemas::user_settings::SpiceLevel;

    #[test]
    fn named_lists_are_replaced_and_others_kept() {
        let mut settings = UserSettings::default();
        settings.kitchen_equipment.cookware = vec!["wok".into()];
        settings.kitchen_equipment.other = vec!["grill".into()];

        let args = SetArgs {
            spice_level: Some(SpiceLevel::Spicy),
            cuisines: vec!["Thai".into()],
            equipment: vec!["other:smoker".parse().unwrap(), "other:torch".parse().unwrap()],
            notes: Some("  ".into()),
            ..SetArgs::default()
        };
        apply(&mut settings, args);

        let prefs = &settings.cooking_preferences;
        assert_eq!(prefs.spice_level, SpiceLevel::Spicy);
        assert_eq!(prefs.cuisine_types, vec!["Thai".to_string()]);
        assert_eq!(prefs.additional_notes, None);
        assert_eq!(settings.kitchen_equipment.cookware, vec!["wok".to_string()]);
        assert_eq!(
            settings.kitchen_equipment.other,
            vec!["smoker".to_string(), "torch".to_string()]
        );
    }
}
