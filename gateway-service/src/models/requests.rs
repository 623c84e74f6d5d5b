use serde::{Deserialize, Serialize};

fn default_exact_match() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub field: String,
    pub value: String,
    #[serde(default = "default_exact_match")]
    pub exact_match: bool,
}

impl Filter {
    pub fn new(field: impl Into<String>, value: impl Into<String>, exact_match: bool) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            exact_match,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub filters: Option<Vec<Filter>>,
}

impl SearchRequest {
    pub fn filters(&self) -> &[Filter] {
        self.filters.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct DownloadParams {
    pub file_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_exact_match_defaults_to_true() {
        let filter: Filter =
            serde_json::from_str(r#"{"field":"Language","value":"English"}"#).unwrap();
        assert!(filter.exact_match);
    }

    #[test]
    fn test_search_request_without_filters() {
        let request: SearchRequest = serde_json::from_str(r#"{"query":"dune"}"#).unwrap();
        assert!(request.filters.is_none());
        assert!(request.filters().is_empty());
    }
}
