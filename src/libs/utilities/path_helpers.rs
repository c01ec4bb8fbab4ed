// Our custom logging macros to give us nicely formatted output
// for debugging, general information, and errors.
use crate::{log_debug, log_warn};
// The 'colored' crate helps us make our console output look pretty and readable.
use colored::Colorize;
use std::env;
use std::path::PathBuf;

/// Name of the directory (under the user's home) that holds the settings store.
pub const APP_DIR_NAME: &str = ".el-hornito";

/// Expands a user-supplied path: a leading `~` becomes the home directory and
/// `$VAR` / `${VAR}` references are substituted from the environment.
///
/// # Arguments
/// * `path`: The raw path as typed by the user or read from the environment.
///
/// # Returns
/// * `Ok(PathBuf)` with the expanded path.
/// * `Err(String)` if the path references an undefined environment variable
///   or expands to an empty string.
pub fn expand_path(path: &str) -> Result<PathBuf, String> {
    let expanded = shellexpand::full(path)
        .map_err(|e| format!("Failed to expand path '{path}': {e}"))?;

    if expanded.trim().is_empty() {
        return Err(format!("Path '{path}' expands to an empty string"));
    }

    Ok(PathBuf::from(expanded.as_ref()))
}

/// Returns the canonical application directory, typically `~/.el-hornito`.
///
/// If the home directory cannot be determined, it logs a warning and falls
/// back to `.el-hornito` under the current directory. Returns `None` only if
/// neither location can be resolved, which callers treat as "no persistent
/// storage available".
pub fn get_el_hornito_dir() -> Option<PathBuf> {
    if let Some(home_dir) = dirs::home_dir() {
        let app_dir = home_dir.join(APP_DIR_NAME);
        log_debug!(
            "[Paths] Application directory resolved to: {}",
            app_dir.display().to_string().cyan()
        );
        return Some(app_dir);
    }

    match env::current_dir() {
        Ok(current_dir) => {
            let fallback_dir = current_dir.join(APP_DIR_NAME);
            log_warn!(
                "[Paths] Could not determine home directory. Falling back to {}",
                fallback_dir.display().to_string().yellow()
            );
            Some(fallback_dir)
        }
        Err(e) => {
            log_warn!("[Paths] Could not determine home or current directory: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_paths_pass_through() {
        assert_eq!(
            expand_path("/var/lib/el-hornito").unwrap(),
            PathBuf::from("/var/lib/el-hornito")
        );
    }

    #[test]
    fn tilde_expands_to_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path("~/store").unwrap(), home.join("store"));
        }
    }

    #[test]
    fn undefined_variable_is_an_error() {
        assert!(expand_path("$EL_HORNITO_SURELY_UNDEFINED_VAR/store").is_err());
    }

    #[test]
    fn empty_path_is_an_error() {
        assert!(expand_path("   ").is_err());
    }
}
