use crate::app_config::AppConfig;
use crate::hours::TimeContext;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let api_url = or_default("SHOPDIR_API_URL", "http://localhost:5000/api");
    if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
        return Err(invalid(
            "SHOPDIR_API_URL",
            format!("\"{api_url}\" must start with http:// or https://"),
        ));
    }

    let api_token = lookup("SHOPDIR_API_TOKEN")
        .ok()
        .filter(|t| !t.trim().is_empty());
    let log_level = or_default("SHOPDIR_LOG_LEVEL", "info");

    let timezone = or_default("SHOPDIR_TIMEZONE", "local")
        .parse::<TimeContext>()
        .map_err(|e| invalid("SHOPDIR_TIMEZONE", e.to_string()))?;

    let default_radius_km = or_default("SHOPDIR_DEFAULT_RADIUS_KM", "5")
        .parse::<f64>()
        .map_err(|e| invalid("SHOPDIR_DEFAULT_RADIUS_KM", e.to_string()))?;
    if !default_radius_km.is_finite() || default_radius_km <= 0.0 {
        return Err(invalid(
            "SHOPDIR_DEFAULT_RADIUS_KM",
            "must be a positive number of kilometres".to_string(),
        ));
    }

    let nearby_limit = or_default("SHOPDIR_NEARBY_LIMIT", "5")
        .parse::<usize>()
        .map_err(|e| invalid("SHOPDIR_NEARBY_LIMIT", e.to_string()))?;
    if nearby_limit == 0 {
        return Err(invalid(
            "SHOPDIR_NEARBY_LIMIT",
            "must be at least 1".to_string(),
        ));
    }

    let request_timeout_secs = parse_u64("SHOPDIR_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("SHOPDIR_USER_AGENT", "shopdir/0.1 (shop-directory)");
    let max_retries = parse_u32("SHOPDIR_MAX_RETRIES", "3")?;
    let retry_backoff_base_ms = parse_u64("SHOPDIR_RETRY_BACKOFF_BASE_MS", "500")?;

    Ok(AppConfig {
        api_url,
        api_token,
        log_level,
        timezone,
        default_radius_km,
        nearby_limit,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
