mod cli;
mod commands;

use anyhow::{Result, anyhow};
use clap::Parser;
use cli::cmd_enums::{Cli, Commands};
use commands::{
    clear, export, import, locale, recipe, set, show, smart_defaults, status, validate_key,
};
use el_hornito::libs::api_client::HttpApiKeyValidator;
use el_hornito::libs::settings_manager::SettingsManager;
use el_hornito::libs::storage::{FileStore, StorageAdapter};
use el_hornito::schemas::path_resolver::PathResolver;
use el_hornito::{log_debug, log_error, logger};

fn main() {
    let cli = Cli::parse();
    logger::init(cli.debug);

    if let Err(e) = run(cli) {
        log_error!("{:#}", e);
        std::process::exit(1);
    }
}

/// Resolves configuration, builds the settings manager and dispatches the command.
fn run(cli: Cli) -> Result<()> {
    // Only `validate-key` takes an endpoint override.
    let api_url = match &cli.command {
        Commands::ValidateKey { api_url, .. } => api_url.clone(),
        _ => None,
    };
    let paths = PathResolver::new(cli.store, cli.no_store, api_url).map_err(|e| anyhow!(e))?;
    let mut manager = build_manager(&paths);

    match cli.command {
        Commands::Show { json } => show::run(&mut manager, json),
        Commands::Set(args) => set::run(&mut manager, args),
        Commands::Locale { action } => locale::run(&mut manager, action),
        Commands::Export { output } => export::run(&mut manager, output),
        Commands::Import { file } => import::run(&mut manager, file),
        Commands::Clear { yes } => clear::run(&mut manager, yes),
        Commands::Status => status::run(&mut manager, &paths),
        Commands::SmartDefaults { apply } => smart_defaults::run(&mut manager, apply),
        Commands::ValidateKey { key, .. } => validate_key::run(&mut manager, key, paths.api_url()),
        Commands::Recipe { file } => recipe::run(file),
    }
}

/// A manager over the resolved store directory, or a stateless one.
fn build_manager(paths: &PathResolver) -> SettingsManager {
    let storage = match paths.store_dir() {
        Some(dir) => StorageAdapter::new(FileStore::new(dir)),
        None => StorageAdapter::stateless(),
    };
    log_debug!("Settings storage available: {}", storage.is_available());

    SettingsManager::new(storage).with_api_validator(HttpApiKeyValidator::new(
        paths.api_url(),
        paths.api_timeout(),
    ))
}
