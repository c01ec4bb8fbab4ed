// This is the main module file for the `utilities` directory.
// It declares the small helper submodules shared by the settings core and the CLI.

// Tilde / environment-variable expansion and the default application directory.
pub mod path_helpers;
// ISO-8601 timestamps and relative-time formatting.
pub mod timestamps;
