use crate::app_config::{AppConfig, Environment};
use crate::request::DEFAULT_MAX_RADIUS_METERS;
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
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing and validation are decoupled from the process environment so tests
/// can drive this with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

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

    let parse_optional_positive = |var: &str| -> Result<Option<u64>, ConfigError> {
        match lookup(var) {
            Err(_) => Ok(None),
            Ok(raw) if raw.trim().is_empty() => Ok(None),
            Ok(raw) => {
                let value = raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| invalid(var, e.to_string()))?;
                if value == 0 {
                    return Err(invalid(var, "must be greater than zero".to_string()));
                }
                Ok(Some(value))
            }
        }
    };

    let places_api_key = require("SWEETMAP_PLACES_API_KEY")?;

    let env = parse_environment(&or_default("SWEETMAP_ENV", "development"))?;
    let log_level = or_default("SWEETMAP_LOG_LEVEL", "info");

    let places_base_url = or_default(
        "SWEETMAP_PLACES_BASE_URL",
        "https://maps.googleapis.com/maps/api/place",
    );
    let places_language = lookup("SWEETMAP_PLACES_LANGUAGE")
        .ok()
        .filter(|v| !v.trim().is_empty());

    let exclusions_path = PathBuf::from(or_default(
        "SWEETMAP_EXCLUSIONS_PATH",
        "./config/exclusions.yaml",
    ));

    let default_keywords =
        parse_keyword_list(&or_default("SWEETMAP_DEFAULT_KEYWORDS", "dessert,bakery,cake shop"));
    if default_keywords.is_empty() {
        return Err(invalid(
            "SWEETMAP_DEFAULT_KEYWORDS",
            "at least one keyword is required".to_string(),
        ));
    }

    let max_radius_meters = parse_u32(
        "SWEETMAP_MAX_RADIUS_METERS",
        &DEFAULT_MAX_RADIUS_METERS.to_string(),
    )?;
    if max_radius_meters == 0 {
        return Err(invalid(
            "SWEETMAP_MAX_RADIUS_METERS",
            "must be greater than zero".to_string(),
        ));
    }

    let default_radius_meters = parse_u32("SWEETMAP_DEFAULT_RADIUS_METERS", "2000")?;
    if default_radius_meters == 0 || default_radius_meters > max_radius_meters {
        return Err(invalid(
            "SWEETMAP_DEFAULT_RADIUS_METERS",
            format!("must be between 1 and {max_radius_meters}"),
        ));
    }

    let provider_timeout_secs = parse_u64("SWEETMAP_PROVIDER_TIMEOUT_SECS", "5")?;
    if provider_timeout_secs == 0 {
        return Err(invalid(
            "SWEETMAP_PROVIDER_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }
    let provider_max_retries = parse_u32("SWEETMAP_PROVIDER_MAX_RETRIES", "0")?;
    let provider_retry_backoff_ms = parse_u64("SWEETMAP_PROVIDER_RETRY_BACKOFF_MS", "500")?;

    let discovery_concurrency = parse_optional_positive("SWEETMAP_DISCOVERY_CONCURRENCY")?
        .map(|v| usize::try_from(v).unwrap_or(usize::MAX));
    let discovery_deadline_secs = parse_optional_positive("SWEETMAP_DISCOVERY_DEADLINE_SECS")?;

    let user_agent = or_default("SWEETMAP_USER_AGENT", "sweetmap/0.1 (venue-discovery)");

    Ok(AppConfig {
        env,
        log_level,
        places_api_key,
        places_base_url,
        places_language,
        exclusions_path,
        default_keywords,
        default_radius_meters,
        max_radius_meters,
        provider_timeout_secs,
        provider_max_retries,
        provider_retry_backoff_ms,
        discovery_concurrency,
        discovery_deadline_secs,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SWEETMAP_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

/// Split a comma-separated keyword list, dropping blank entries.
fn parse_keyword_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
