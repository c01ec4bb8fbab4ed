// Register the settings core.
// Each module owns one concern; `settings_manager` composes them behind a single façade.

// Client for the remote API-key validation endpoint.
pub mod api_client;
// Export envelope and import parsing.
pub mod codec;
// Typed access to the document's locale.
pub mod locale;
// Normalization of partial or older documents to the current schema.
pub mod migration;
// Extraction and validation of recipes from model output.
pub mod recipe_parser;
// The façade: load, save, clear, import, export, locale and user state.
pub mod settings_manager;
// Key-value stores and the adapter that swallows their faults.
pub mod storage;
// New-user signals and the smart-defaults bundle.
pub mod user_state;
// Small shared helpers (paths, timestamps).
pub mod utilities;
// Structural validation of settings documents.
pub mod validation;
