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

/// Returns a map with all required env vars populated.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("SWEETMAP_PLACES_API_KEY", "test-key");
    m
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "SWEETMAP_ENV"));
}

#[test]
fn build_app_config_fails_without_api_key() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SWEETMAP_PLACES_API_KEY"),
        "expected MissingEnvVar(SWEETMAP_PLACES_API_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_api_key_as_missing() {
    let mut map = HashMap::new();
    map.insert("SWEETMAP_PLACES_API_KEY", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
}

#[test]
fn build_app_config_succeeds_with_defaults() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.places_api_key, "test-key");
    assert_eq!(
        cfg.places_base_url,
        "https://maps.googleapis.com/maps/api/place"
    );
    assert!(cfg.places_language.is_none());
    assert_eq!(
        cfg.exclusions_path.to_str(),
        Some("./config/exclusions.yaml")
    );
    assert_eq!(cfg.default_keywords, vec!["dessert", "bakery", "cake shop"]);
    assert_eq!(cfg.default_radius_meters, 2000);
    assert_eq!(cfg.max_radius_meters, 50_000);
    assert_eq!(cfg.provider_timeout_secs, 5);
    assert_eq!(cfg.provider_max_retries, 0);
    assert_eq!(cfg.provider_retry_backoff_ms, 500);
    assert!(cfg.discovery_concurrency.is_none());
    assert!(cfg.discovery_deadline_secs.is_none());
    assert_eq!(cfg.user_agent, "sweetmap/0.1 (venue-discovery)");
}

#[test]
fn debug_output_redacts_api_key() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("test-key"), "api key leaked: {rendered}");
    assert!(rendered.contains("[redacted]"));
}

#[test]
fn default_keywords_override_is_split_and_trimmed() {
    let mut map = full_env();
    map.insert("SWEETMAP_DEFAULT_KEYWORDS", " macaron , ,gelato,  donut ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.default_keywords, vec!["macaron", "gelato", "donut"]);
}

#[test]
fn default_keywords_all_blank_is_invalid() {
    let mut map = full_env();
    map.insert("SWEETMAP_DEFAULT_KEYWORDS", " , ,");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SWEETMAP_DEFAULT_KEYWORDS"),
        "got: {result:?}"
    );
}

#[test]
fn provider_timeout_override() {
    let mut map = full_env();
    map.insert("SWEETMAP_PROVIDER_TIMEOUT_SECS", "12");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.provider_timeout_secs, 12);
}

#[test]
fn provider_timeout_zero_is_invalid() {
    let mut map = full_env();
    map.insert("SWEETMAP_PROVIDER_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SWEETMAP_PROVIDER_TIMEOUT_SECS"),
        "got: {result:?}"
    );
}

#[test]
fn provider_max_retries_invalid() {
    let mut map = full_env();
    map.insert("SWEETMAP_PROVIDER_MAX_RETRIES", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SWEETMAP_PROVIDER_MAX_RETRIES"),
        "got: {result:?}"
    );
}

#[test]
fn default_radius_above_cap_is_invalid() {
    let mut map = full_env();
    map.insert("SWEETMAP_MAX_RADIUS_METERS", "1000");
    map.insert("SWEETMAP_DEFAULT_RADIUS_METERS", "1500");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SWEETMAP_DEFAULT_RADIUS_METERS"),
        "got: {result:?}"
    );
}

#[test]
fn discovery_concurrency_and_deadline_overrides() {
    let mut map = full_env();
    map.insert("SWEETMAP_DISCOVERY_CONCURRENCY", "2");
    map.insert("SWEETMAP_DISCOVERY_DEADLINE_SECS", "8");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.discovery_concurrency, Some(2));
    assert_eq!(cfg.discovery_deadline_secs, Some(8));
}

#[test]
fn discovery_concurrency_zero_is_invalid() {
    let mut map = full_env();
    map.insert("SWEETMAP_DISCOVERY_CONCURRENCY", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SWEETMAP_DISCOVERY_CONCURRENCY"),
        "got: {result:?}"
    );
}

#[test]
fn places_language_override() {
    let mut map = full_env();
    map.insert("SWEETMAP_PLACES_LANGUAGE", "ko");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.places_language.as_deref(), Some("ko"));
}
