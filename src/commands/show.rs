// This file implements `el-hornito show`.
// It loads the settings document (recovering to defaults if needed) and
// prints it either as a summary table or as the raw JSON document.

use anyhow::Result;
use colored::Colorize;
use el_hornito::libs::settings_manager::SettingsManager;
use el_hornito::libs::utilities::timestamps::time_since;
use el_hornito::log_debug;
use el_hornito::schemas::user_settings::{EquipmentCategory, UserSettings};
use prettytable::{Table, format, row};

/// Main entry point for the `show` command.
///
/// # Arguments
/// * `manager`: The settings manager to load from.
/// * `json`: Print the document as pretty JSON instead of a table.
pub fn run(manager: &mut SettingsManager, json: bool) -> Result<()> {
    log_debug!("Entered show::run() function.");
    let settings = manager.load_settings();

    if json {
        println!("{}", serde_json::to_string_pretty(&settings)?);
        return Ok(());
    }

    summary_table(&settings).printstd();
    Ok(())
}

/// Builds the human-readable summary of `settings`.
fn summary_table(settings: &UserSettings) -> Table {
    let prefs = &settings.cooking_preferences;
    let api = &settings.api_configuration;

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    table.set_titles(row![b->"Setting", b->"Value"]);

    let updated = match time_since(&settings.last_updated) {
        Some(ago) => format!("{} ({ago})", settings.last_updated),
        None => settings.last_updated.clone(),
    };
    table.add_row(row!["Schema version", settings.version]);
    table.add_row(row!["Last updated", updated]);
    table.add_row(row!["Locale", settings.locale.unwrap_or_default()]);

    table.add_row(row!["Cuisines", list_or_none(&prefs.cuisine_types)]);
    table.add_row(row!["Dietary restrictions", list_or_none(&prefs.dietary_restrictions)]);
    table.add_row(row!["Spice level", prefs.spice_level]);
    table.add_row(row!["Cooking time", prefs.cooking_time_preference]);
    table.add_row(row!["Meal types", list_or_none(&prefs.meal_types)]);
    table.add_row(row!["Default servings", prefs.default_servings]);
    table.add_row(row![
        "Notes",
        prefs.additional_notes.as_deref().unwrap_or("(none)")
    ]);

    for category in EquipmentCategory::ALL {
        table.add_row(row![
            category.field_name(),
            list_or_none(settings.kitchen_equipment.list(category))
        ]);
    }

    table.add_row(row!["Personal API key", yes_no(api.has_personal_key)]);
    table.add_row(row!["Key validated", yes_no(api.key_validated)]);
    table.add_row(row!["Usage tracking", yes_no(api.usage_tracking)]);
    if let Some(at) = &api.last_validation {
        table.add_row(row!["Last validation", at]);
    }
    table
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".dimmed().to_string()
    } else {
        items.join(", ")
    }
}

fn yes_no(flag: bool) -> String {
    if flag {
        "yes".green().to_string()
    } else {
        "no".red().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lists_every_equipment_category() {
        let mut settings = UserSettings::default();
        settings.kitchen_equipment.cookware.push("wok".into());
        let table = summary_table(&settings);
        // Titles are not counted: 10 preference rows, 5 equipment rows, 3 API rows.
        assert_eq!(table.len(), 18);
        assert!(table.to_string().contains("wok"));
    }
}
