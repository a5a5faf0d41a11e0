//! Application configuration loaded from environment variables.
//!
//! - `ROUTSTR_BASE_URL` — base URL of the node's admin API
//!   (defaults to `http://localhost:8000`)
//! - `ROUTSTR_ADMIN_PASSWORD` — admin password for the login endpoint
//! - `ROUTSTR_PREFS_PATH` — overrides the preference file location

use std::path::PathBuf;

/// Default admin API endpoint for a locally run node.
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Top-level application configuration.
#[derive(Debug)]
pub struct AppConfig {
    pub routstr: RoutstrConfig,
}

/// Node-specific configuration values.
#[derive(Debug)]
pub struct RoutstrConfig {
    pub base_url: String,
    pub admin_password: Option<String>,
    pub prefs_path: Option<PathBuf>,
}

/// Loads the application configuration from environment variables.
///
/// The base URL defaults to `http://localhost:8000` and can be overridden
/// with `ROUTSTR_BASE_URL`; a trailing slash is stripped so endpoint paths
/// can be appended verbatim. The admin password is optional here — the
/// keychain layer may populate it before this runs.
///
/// # Errors
///
/// Returns [`ConsoleError::Config`](crate::ConsoleError::Config) if the
/// base URL does not use an `http` or `https` scheme.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let base_url =
        non_empty_var("ROUTSTR_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let base_url = base_url.trim_end_matches('/').to_string();

    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(crate::ConsoleError::Config(format!(
            "ROUTSTR_BASE_URL must start with http:// or https://, got {base_url}"
        )));
    }

    let admin_password = non_empty_var("ROUTSTR_ADMIN_PASSWORD");
    let prefs_path = non_empty_var("ROUTSTR_PREFS_PATH").map(PathBuf::from);

    Ok(AppConfig {
        routstr: RoutstrConfig {
            base_url,
            admin_password,
            prefs_path,
        },
    })
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    /// Serializes env-var mutation across the test suite.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Helper that temporarily sets env vars, runs `f`, then restores originals.
    ///
    /// Holds [`ENV_LOCK`] for the duration so no other config test reads or
    /// writes these variables concurrently.
    fn with_env<F: FnOnce()>(vars: &[(&str, Option<&str>)], f: F) {
        let _guard: MutexGuard<'_, ()> = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        let originals: Vec<(&str, Option<String>)> = vars
            .iter()
            .map(|(k, _)| (*k, std::env::var(k).ok()))
            .collect();

        for (k, v) in vars {
            // SAFETY: ENV_LOCK serializes all env access in this test binary.
            unsafe {
                match v {
                    Some(val) => std::env::set_var(k, val),
                    None => std::env::remove_var(k),
                }
            }
        }

        f();

        for (k, original) in originals {
            // SAFETY: restoring original values under the same lock.
            unsafe {
                match original {
                    Some(val) => std::env::set_var(k, val),
                    None => std::env::remove_var(k),
                }
            }
        }
    }

    #[test]
    fn defaults_without_env_vars() {
        with_env(
            &[
                ("ROUTSTR_BASE_URL", None),
                ("ROUTSTR_ADMIN_PASSWORD", None),
                ("ROUTSTR_PREFS_PATH", None),
            ],
            || {
                let config = fetch_config().unwrap();
                assert_eq!(config.routstr.base_url, DEFAULT_BASE_URL);
                assert!(config.routstr.admin_password.is_none());
                assert!(config.routstr.prefs_path.is_none());
            },
        );
    }

    #[test]
    fn custom_base_url_with_trailing_slash() {
        with_env(
            &[
                ("ROUTSTR_BASE_URL", Some("https://node.example.com/")),
                ("ROUTSTR_ADMIN_PASSWORD", None),
            ],
            || {
                let config = fetch_config().unwrap();
                assert_eq!(config.routstr.base_url, "https://node.example.com");
            },
        );
    }

    #[test]
    fn loads_password_from_env() {
        with_env(
            &[
                ("ROUTSTR_BASE_URL", None),
                ("ROUTSTR_ADMIN_PASSWORD", Some("hunter2")),
            ],
            || {
                let config = fetch_config().unwrap();
                assert_eq!(config.routstr.admin_password.as_deref(), Some("hunter2"));
            },
        );
    }

    #[test]
    fn rejects_non_http_scheme() {
        with_env(
            &[
                ("ROUTSTR_BASE_URL", Some("ftp://node.example.com")),
                ("ROUTSTR_ADMIN_PASSWORD", None),
            ],
            || {
                let err = fetch_config().unwrap_err();
                assert!(err.to_string().contains("http:// or https://"));
            },
        );
    }

    #[test]
    fn empty_values_treated_as_absent() {
        with_env(
            &[
                ("ROUTSTR_BASE_URL", Some("")),
                ("ROUTSTR_ADMIN_PASSWORD", Some("")),
                ("ROUTSTR_PREFS_PATH", Some("")),
            ],
            || {
                let config = fetch_config().unwrap();
                assert_eq!(config.routstr.base_url, DEFAULT_BASE_URL);
                assert!(config.routstr.admin_password.is_none());
                assert!(config.routstr.prefs_path.is_none());
            },
        );
    }

    #[test]
    fn prefs_path_override() {
        with_env(
            &[
                ("ROUTSTR_BASE_URL", None),
                ("ROUTSTR_PREFS_PATH", Some("/tmp/prefs.json")),
            ],
            || {
                let config = fetch_config().unwrap();
                assert_eq!(
                    config.routstr.prefs_path.as_deref(),
                    Some(std::path::Path::new("/tmp/prefs.json"))
                );
            },
        );
    }
}
