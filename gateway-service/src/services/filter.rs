use crate::models::record::Record;
use crate::models::requests::Filter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    Exact,
    Substring,
}

/// Exact only when every filter asks for it; one substring filter relaxes the whole set.
pub fn compute_effective_mode(filters: &[Filter]) -> MatchMode {
    if filters.iter().all(|filter| filter.exact_match) {
        MatchMode::Exact
    } else {
        MatchMode::Substring
    }
}

pub fn matches(record: &Record, filter: &Filter, mode: MatchMode) -> bool {
    let Some(actual) = record.get_by_name(&filter.field) else {
        return false;
    };

    match mode {
        MatchMode::Exact => actual == filter.value,
        MatchMode::Substring => actual.contains(filter.value.as_str()),
    }
}

pub fn apply(records: Vec<Record>, filters: &[Filter]) -> Vec<Record> {
    let mode = compute_effective_mode(filters);
    apply_with_mode(records, filters, mode)
}

pub fn apply_with_mode(records: Vec<Record>, filters: &[Filter], mode: MatchMode) -> Vec<Record> {
    if filters.is_empty() {
        return records;
    }

    records
        .into_iter()
        .filter(|record| filters.iter().all(|filter| matches(record, filter, mode)))
        .collect()
}
