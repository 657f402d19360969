use std::path::PathBuf;

use thiserror::Error;

use crate::app_config::AppConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env
/// vars. Every variable has a default, so a bare environment is valid.
///
/// # Errors
///
/// Returns `ConfigError` if a set variable holds an unparseable value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a set variable holds an unparseable value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup
/// function, decoupled from the actual environment so it can be tested
/// with a plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default =
        |var: &str, default: &str| -> String { lookup(var).unwrap_or_else(|_| default.to_string()) };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        match raw.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" => Ok(false),
            _ => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected a boolean, got {raw:?}"),
            }),
        }
    };

    let log_level = or_default("QUESTRANK_LOG_LEVEL", "info");
    let filters_path = PathBuf::from(or_default(
        "QUESTRANK_FILTERS_PATH",
        "./config/filters.yaml",
    ));
    let output_path = PathBuf::from(or_default("QUESTRANK_OUTPUT_PATH", "result.txt"));
    let roster_file_id = or_default(
        "QUESTRANK_ROSTER_FILE_ID",
        "1VE2sH6zePhdwaSDir9ucUoXPYTXIjIR3eRFKQ-IVZcw",
    );
    let roster_sheet_gid = or_default("QUESTRANK_ROSTER_SHEET_GID", "241580121");
    let fetch_timeout_secs = parse_u64("QUESTRANK_FETCH_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("QUESTRANK_USER_AGENT", "questrank/0.1 (quest-report-counter)");
    let max_concurrent_fetches = parse_usize("QUESTRANK_MAX_CONCURRENT_FETCHES", "8")?;
    let hide_emails = parse_bool("QUESTRANK_HIDE_EMAILS", "true")?;

    Ok(AppConfig {
        log_level,
        filters_path,
        output_path,
        roster_file_id,
        roster_sheet_gid,
        fetch_timeout_secs,
        user_agent,
        max_concurrent_fetches,
        hide_emails,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn build_app_config_succeeds_on_empty_environment() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.filters_path, PathBuf::from("./config/filters.yaml"));
        assert_eq!(cfg.output_path, PathBuf::from("result.txt"));
        assert_eq!(cfg.fetch_timeout_secs, 30);
        assert_eq!(cfg.user_agent, "questrank/0.1 (quest-report-counter)");
        assert_eq!(cfg.max_concurrent_fetches, 8);
        assert!(cfg.hide_emails);
    }

    #[test]
    fn build_app_config_applies_overrides() {
        let mut map = HashMap::new();
        map.insert("QUESTRANK_FETCH_TIMEOUT_SECS", "60");
        map.insert("QUESTRANK_MAX_CONCURRENT_FETCHES", "2");
        map.insert("QUESTRANK_HIDE_EMAILS", "no");
        map.insert("QUESTRANK_USER_AGENT", "custom-agent/2.0");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.fetch_timeout_secs, 60);
        assert_eq!(cfg.max_concurrent_fetches, 2);
        assert!(!cfg.hide_emails);
        assert_eq!(cfg.user_agent, "custom-agent/2.0");
    }

    #[test]
    fn build_app_config_rejects_invalid_timeout() {
        let mut map = HashMap::new();
        map.insert("QUESTRANK_FETCH_TIMEOUT_SECS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "QUESTRANK_FETCH_TIMEOUT_SECS"),
            "expected InvalidEnvVar(QUESTRANK_FETCH_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_invalid_bool() {
        let mut map = HashMap::new();
        map.insert("QUESTRANK_HIDE_EMAILS", "maybe");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "QUESTRANK_HIDE_EMAILS"),
            "expected InvalidEnvVar(QUESTRANK_HIDE_EMAILS), got: {result:?}"
        );
    }
}
