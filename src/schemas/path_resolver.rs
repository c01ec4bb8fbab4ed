// =========================================================================== //
//                          STANDARD LIBRARY DEPENDENCIES                      //
// =========================================================================== //

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

// =========================================================================== //
//                             EXTERNAL DEPENDENCIES                           //
// =========================================================================== //

use colored::Colorize;

// =========================================================================== //
//                              INTERNAL IMPORTS                               //
// =========================================================================== //

use crate::libs::storage::SETTINGS_STORAGE_KEY;
use crate::libs::utilities::path_helpers::{expand_path, get_el_hornito_dir};
use crate::{log_debug, log_info, log_warn};

/// Environment variable overriding the settings store directory.
pub const STORE_DIR_ENV: &str = "EL_HORNITO_HOME";
/// Environment variable overriding the API-key validation endpoint.
pub const API_URL_ENV: &str = "EL_HORNITO_API_URL";
/// Environment variable overriding the API-key validation timeout, in seconds.
pub const API_TIMEOUT_ENV: &str = "EL_HORNITO_API_TIMEOUT_SECS";

/// Endpoint used when neither `--api-url` nor `EL_HORNITO_API_URL` is set.
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api/validate-api-key";
/// Upper bound on a single API-key validation request.
pub const DEFAULT_API_TIMEOUT: Duration = Duration::from_secs(10);

/// # PathResolver
///
/// Central configuration resolution for the application.
///
/// Determines:
/// 1. The **settings store directory** (or that there is none, i.e. the
///    stateless context in which every storage operation is a no-op).
/// 2. The **API-key validation endpoint** and its **timeout**.
///
/// Resolution order for every value is: explicit argument, then environment
/// variable, then default.
///
/// Initialize once at application startup using `PathResolver::new()` and pass around as needed.
#[derive(Debug, Clone)]
pub struct PathResolver {
    /// Directory holding the store, `None` when running without persistent storage.
    store_dir: Option<PathBuf>,
    api_url: String,
    api_timeout: Duration,
}

impl PathResolver {
    /// Resolves store directory and API settings.
    ///
    /// # Arguments
    /// * `store_path` - Optional override for the store directory (highest priority).
    /// * `no_store` - Run without persistent storage; `store_path` is ignored.
    /// * `api_url` - Optional override for the validation endpoint.
    ///
    /// # Returns
    /// The resolved `PathResolver`, or an error message if an explicit or
    /// environment-supplied path cannot be expanded.
    pub fn new(
        store_path: Option<String>,
        no_store: bool,
        api_url: Option<String>,
    ) -> Result<Self, String> {
        log_debug!("Initializing PathResolver");

        let store_dir = if no_store {
            log_info!("[Config] Running {} persistent storage", "without".yellow());
            None
        } else {
            Self::resolve_store_dir(store_path)?
        };

        let api_url = Self::resolve_api_url(api_url);
        let api_timeout = Self::resolve_api_timeout();

        if let Some(dir) = &store_dir {
            log_debug!(
                "[Config] Managing settings in: {}",
                dir.display().to_string().cyan()
            );
        }
        log_debug!("[Config] API-key validation endpoint: {}", api_url.blue());
        log_debug!("[Config] API-key validation timeout: {:?}", api_timeout);

        Ok(PathResolver {
            store_dir,
            api_url,
            api_timeout,
        })
    }

    /// Gets the store directory, if persistent storage is available.
    pub fn store_dir(&self) -> Option<&Path> {
        self.store_dir.as_deref()
    }

    /// Full path of the file backing the settings document.
    pub fn settings_file(&self) -> Option<PathBuf> {
        self.store_dir
            .as_ref()
            .map(|dir| dir.join(format!("{SETTINGS_STORAGE_KEY}.json")))
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn api_timeout(&self) -> Duration {
        self.api_timeout
    }

    /// Determines the **store directory**.
    ///
    /// Resolution priority:
    /// 1. `user_override` argument.
    /// 2. `EL_HORNITO_HOME` environment variable.
    /// 3. Default: `~/.el-hornito`.
    fn resolve_store_dir(user_override: Option<String>) -> Result<Option<PathBuf>, String> {
        if let Some(user_path) = user_override {
            return expand_path(&user_path).map(Some);
        }

        if let Ok(env_path) = env::var(STORE_DIR_ENV) {
            log_debug!("[Config] Using {}: {}", STORE_DIR_ENV, env_path.blue());
            return expand_path(&env_path).map(Some);
        }
        log_debug!("[Config] environment variable {} not set", STORE_DIR_ENV);

        Ok(get_el_hornito_dir())
    }

    fn resolve_api_url(user_override: Option<String>) -> String {
        user_override
            .or_else(|| env::var(API_URL_ENV).ok())
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    fn resolve_api_timeout() -> Duration {
        match env::var(API_TIMEOUT_ENV) {
            Ok(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    log_warn!(
                        "[Config] Ignoring {}='{}': expected a positive number of seconds",
                        API_TIMEOUT_ENV,
                        raw
                    );
                    DEFAULT_API_TIMEOUT
                }
            },
            Err(_) => DEFAULT_API_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_store_path_wins() {
        let resolver = PathResolver::new(Some("/tmp/hornito-store".into()), false, None).unwrap();
        assert_eq!(resolver.store_dir(), Some(Path::new("/tmp/hornito-store")));
        assert_eq!(
            resolver.settings_file(),
            Some(PathBuf::from("/tmp/hornito-store/el-hornito-settings.json"))
        );
    }

    #[test]
    fn no_store_means_stateless() {
        let resolver = PathResolver::new(Some("/tmp/ignored".into()), true, None).unwrap();
        assert!(resolver.store_dir().is_none());
        assert!(resolver.settings_file().is_none());
    }

    #[test]
    fn explicit_api_url_wins() {
        let resolver =
            PathResolver::new(None, true, Some("https://hornito.example/api/validate-api-key".into()))
                .unwrap();
        assert_eq!(resolver.api_url(), "https://hornito.example/api/validate-api-key");
    }
}
