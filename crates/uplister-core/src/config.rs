use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files; useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup, no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let admin_base_url = require("UPLISTER_ADMIN_URL")?;
    let admin_email = require("UPLISTER_ADMIN_EMAIL")?;
    let admin_password = require("UPLISTER_ADMIN_PASSWORD")?;

    if !admin_base_url.starts_with("http://") && !admin_base_url.starts_with("https://") {
        return Err(ConfigError::InvalidEnvVar {
            var: "UPLISTER_ADMIN_URL".to_string(),
            reason: "must be an absolute http(s) URL".to_string(),
        });
    }

    let env = parse_environment(&or_default("UPLISTER_ENV", "development"));
    let log_level = or_default("UPLISTER_LOG_LEVEL", "info");

    let taxonomy_path = PathBuf::from(or_default(
        "UPLISTER_TAXONOMY_PATH",
        "./config/taxonomy.yaml",
    ));
    let report_dir = PathBuf::from(or_default("UPLISTER_REPORT_DIR", "./reports"));

    let request_timeout_secs = parse_u64("UPLISTER_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("UPLISTER_USER_AGENT", "uplister/0.1 (bulk-listing)");
    let max_retries = parse_u32("UPLISTER_MAX_RETRIES", "3")?;
    let retry_backoff_base_ms = parse_u64("UPLISTER_RETRY_BACKOFF_BASE_MS", "500")?;

    let shipping_category_id = lookup("UPLISTER_SHIPPING_CATEGORY_ID").ok();
    let sku_suffix = lookup("UPLISTER_SKU_SUFFIX").ok();

    Ok(AppConfig {
        env,
        log_level,
        admin_base_url,
        admin_email,
        admin_password,
        taxonomy_path,
        report_dir,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
        shipping_category_id,
        sku_suffix,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
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

    /// Returns a map with all required env vars populated with valid defaults.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("UPLISTER_ADMIN_URL", "https://shop.example.com");
        m.insert("UPLISTER_ADMIN_EMAIL", "admin@example.com");
        m.insert("UPLISTER_ADMIN_PASSWORD", "secret");
        m
    }

    #[test]
    fn parse_environment_production() {
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("staging"), Environment::Development);
    }

    #[test]
    fn build_app_config_fails_without_admin_url() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "UPLISTER_ADMIN_URL"),
            "expected MissingEnvVar(UPLISTER_ADMIN_URL), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_without_credentials() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("UPLISTER_ADMIN_URL", "https://shop.example.com");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "UPLISTER_ADMIN_EMAIL"),
            "expected MissingEnvVar(UPLISTER_ADMIN_EMAIL), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_relative_admin_url() {
        let mut map = full_env();
        map.insert("UPLISTER_ADMIN_URL", "shop.example.com");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "UPLISTER_ADMIN_URL"),
            "expected InvalidEnvVar(UPLISTER_ADMIN_URL), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_succeeds_with_all_required_vars() {
        let map = full_env();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.admin_base_url, "https://shop.example.com");
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.user_agent, "uplister/0.1 (bulk-listing)");
        assert_eq!(cfg.max_retries, 3);
        assert_eq!(cfg.retry_backoff_base_ms, 500);
        assert!(cfg.shipping_category_id.is_none());
        assert!(cfg.sku_suffix.is_none());
    }

    #[test]
    fn build_app_config_max_retries_override() {
        let mut map = full_env();
        map.insert("UPLISTER_MAX_RETRIES", "5");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.max_retries, 5);
    }

    #[test]
    fn build_app_config_max_retries_invalid() {
        let mut map = full_env();
        map.insert("UPLISTER_MAX_RETRIES", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "UPLISTER_MAX_RETRIES"),
            "expected InvalidEnvVar(UPLISTER_MAX_RETRIES), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_backoff_base_override() {
        let mut map = full_env();
        map.insert("UPLISTER_RETRY_BACKOFF_BASE_MS", "100");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.retry_backoff_base_ms, 100);
    }

    #[test]
    fn build_app_config_sku_suffix_override() {
        let mut map = full_env();
        map.insert("UPLISTER_SKU_SUFFIX", "Trendyol_TR");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.sku_suffix.as_deref(), Some("Trendyol_TR"));
    }

    #[test]
    fn debug_output_redacts_password() {
        let map = full_env();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("secret"), "password leaked: {debug}");
        assert!(debug.contains("[redacted]"));
    }
}
