// Data shapes shared across the crate.

// Store location and API endpoint resolution.
pub mod path_resolver;
// A recipe as produced by the completion service.
pub mod recipe;
// The persisted settings document and its enumerations.
pub mod user_settings;
