use crate::services::proxy::ContentTypePolicy;
use crate::utils::validation::DEFAULT_DOWNLOAD_URL_PATTERN;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_CATALOG_URL: &str = "http://catalog:8080";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
    #[error("invalid DOWNLOAD_URL_PATTERN: {0}")]
    InvalidPattern(#[from] regex::Error),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub catalog_url: String,
    pub enforce_url_allowlist: bool,
    pub download_url_pattern: String,
    pub content_type_policy: ContentTypePolicy,
    pub upstream_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            enforce_url_allowlist: true,
            download_url_pattern: DEFAULT_DOWNLOAD_URL_PATTERN.to_string(),
            content_type_policy: ContentTypePolicy::PassThrough,
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let port = match lookup("PORT") {
            Some(value) => parse_number("PORT", value)?,
            None => defaults.port,
        };

        let catalog_url = lookup("CATALOG_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.catalog_url);

        let enforce_url_allowlist = match lookup("ENFORCE_URL_ALLOWLIST") {
            Some(value) => parse_bool("ENFORCE_URL_ALLOWLIST", value)?,
            None => defaults.enforce_url_allowlist,
        };

        let download_url_pattern =
            lookup("DOWNLOAD_URL_PATTERN").unwrap_or(defaults.download_url_pattern);
        // fail at start-up rather than on the first download
        regex::Regex::new(&download_url_pattern)?;

        let content_type_policy = match lookup("CONTENT_TYPE_POLICY") {
            Some(value) => parse_content_type_policy(value)?,
            None => defaults.content_type_policy,
        };

        let upstream_timeout = match lookup("UPSTREAM_TIMEOUT_SECS") {
            Some(value) => Duration::from_secs(parse_number("UPSTREAM_TIMEOUT_SECS", value)?),
            None => defaults.upstream_timeout,
        };

        Ok(Self {
            port,
            catalog_url,
            enforce_url_allowlist,
            download_url_pattern,
            content_type_policy,
            upstream_timeout,
        })
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { name, value })
}

fn parse_bool(name: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue { name, value }),
    }
}

fn parse_content_type_policy(value: String) -> Result<ContentTypePolicy, ConfigError> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("pass_through") {
        return Ok(ContentTypePolicy::PassThrough);
    }
    if trimmed.is_empty() || !trimmed.contains('/') {
        return Err(ConfigError::InvalidValue {
            name: "CONTENT_TYPE_POLICY",
            value,
        });
    }
    Ok(ContentTypePolicy::Fixed(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.catalog_url, DEFAULT_CATALOG_URL);
        assert!(config.enforce_url_allowlist);
        assert_eq!(config.download_url_pattern, DEFAULT_DOWNLOAD_URL_PATTERN);
        assert_eq!(config.content_type_policy, ContentTypePolicy::PassThrough);
        assert_eq!(config.upstream_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "9100"),
            ("CATALOG_URL", "http://localhost:5000/"),
            ("ENFORCE_URL_ALLOWLIST", "No"),
            ("CONTENT_TYPE_POLICY", "application/pdf"),
            ("UPSTREAM_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.port, 9100);
        assert_eq!(config.catalog_url, "http://localhost:5000");
        assert!(!config.enforce_url_allowlist);
        assert_eq!(
            config.content_type_policy,
            ContentTypePolicy::Fixed("application/pdf".to_string())
        );
        assert_eq!(config.upstream_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_values_name_the_variable() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));

        let err = Config::from_lookup(lookup_from(&[("ENFORCE_URL_ALLOWLIST", "maybe")]))
            .unwrap_err();
        assert!(err.to_string().contains("ENFORCE_URL_ALLOWLIST"));

        let err =
            Config::from_lookup(lookup_from(&[("CONTENT_TYPE_POLICY", "pdf")])).unwrap_err();
        assert!(err.to_string().contains("CONTENT_TYPE_POLICY"));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let result = Config::from_lookup(lookup_from(&[("DOWNLOAD_URL_PATTERN", "([")]));
        assert!(matches!(result, Err(ConfigError::InvalidPattern(_))));
    }
}
