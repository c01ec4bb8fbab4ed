//! # El Hornito
//!
//! Preferences core for El Hornito, an app that turns a photo of your fridge
//! into a recipe. This crate persists the user's cooking preferences, kitchen
//! equipment, API configuration and UI locale as a single versioned JSON
//! document, migrates and validates it on every load and import, and parses
//! the recipes returned by the completion service.
//!
//! The entry point is [`libs::settings_manager::SettingsManager`]. Every
//! public operation on it is total: storage faults, malformed documents and
//! network failures surface as sentinels (`false`, `None`, defaults), never
//! as errors.

pub mod logger;

pub mod libs;
pub mod schemas;
