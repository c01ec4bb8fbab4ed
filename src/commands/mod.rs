// Register application subcommands.
// Each module corresponds to a specific `el-hornito` command-line action.

// Deletes the stored settings after confirmation.
pub mod clear;
// Writes the export document to stdout or a file.
pub mod export;
// Reads and persists an export document.
pub mod import;
// Reads or changes the interface language.
pub mod locale;
// Parses a saved model response into a recipe.
pub mod recipe;
// Changes individual preferences.
pub mod set;
// Prints the current settings.
pub mod show;
// Prints or applies the smart-defaults bundle.
pub mod smart_defaults;
// Summarizes user state and storage location.
pub mod status;
// Validates an AI API key and records the outcome.
pub mod validate_key;
