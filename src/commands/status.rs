// This file implements `el-hornito status`: where settings live, whether the
// user is new, whether they have configured preferences, and whether the
// stored document had to be recovered.

use anyhow::Result;
use colored::Colorize;
use el_hornito::libs::settings_manager::{LoadOutcome, SettingsManager};
use el_hornito::libs::user_state::has_configured_preferences;
use el_hornito::schemas::path_resolver::PathResolver;

pub fn run(manager: &mut SettingsManager, paths: &PathResolver) -> Result<()> {
    let new_user = manager.is_new_user();
    let (settings, outcome) = manager.load_with_outcome();

    let store = match paths.settings_file() {
        Some(file) => file.display().to_string().cyan(),
        None => "none (stateless)".yellow(),
    };
    println!("{:<22}{}", "Settings file:", store);
    println!("{:<22}{}", "Schema version:", settings.version);
    println!("{:<22}{}", "Locale:", settings.locale.unwrap_or_default());
    println!("{:<22}{}", "New user:", flag(new_user));
    println!(
        "{:<22}{}",
        "Configured:",
        flag(has_configured_preferences(&settings))
    );
    println!(
        "{:<22}{}",
        "API key validated:",
        flag(settings.api_configuration.key_validated)
    );

    if let LoadOutcome::Recovered(reason) = outcome {
        println!(
            "{:<22}{} ({reason})",
            "Stored document:",
            "replaced by defaults".red()
        );
    }
    Ok(())
}

fn flag(value: bool) -> colored::ColoredString {
    if value { "yes".green() } else { "no".normal() }
}
