use regex::Regex;
use thiserror::Error;

pub const MIN_QUERY_CHARS: usize = 3;

pub const DEFAULT_DOWNLOAD_URL_PATTERN: &str =
    r"^https://download\.library\.gift/main/\d+/[0-9A-Fa-f]+/[^?#]+$";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Query must be at least 3 characters long.")]
    TooShortQuery,
}

pub fn validate_query(query: &str) -> Result<&str, ValidationError> {
    if query.chars().count() < MIN_QUERY_CHARS {
        return Err(ValidationError::TooShortQuery);
    }
    Ok(query)
}

#[derive(Debug, Clone)]
pub struct UrlAllowList {
    pattern: Regex,
}

impl UrlAllowList {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    pub fn is_allowed(&self, url: &str) -> bool {
        self.pattern.is_match(url)
    }
}

impl Default for UrlAllowList {
    fn default() -> Self {
        Self {
            pattern: Regex::new(DEFAULT_DOWNLOAD_URL_PATTERN)
                .expect("default download pattern is a valid regex"),
        }
    }
}
