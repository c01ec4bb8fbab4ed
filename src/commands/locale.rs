// This file implements `el-hornito locale get` and `el-hornito locale set`.

use crate::cli::cmd_enums::LocaleCommands;
use anyhow::{Result, bail};
use colored::Colorize;
use el_hornito::libs::settings_manager::SettingsManager;
use el_hornito::log_info;

pub fn run(manager: &mut SettingsManager, action: LocaleCommands) -> Result<()> {
    match action {
        LocaleCommands::Get => println!("{}", manager.get_locale()),
        LocaleCommands::Set { locale } => {
            if !manager.set_locale(locale) {
                bail!("Could not save locale '{locale}'.");
            }
            log_info!("[Locale] Interface language set to {}", locale.to_string().cyan());
        }
    }
    Ok(())
}
