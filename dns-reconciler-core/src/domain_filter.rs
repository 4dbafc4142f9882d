//! Domain filter restricting which names and zones are managed

use serde::{Deserialize, Serialize};

fn normalize(name: &str) -> String {
    name.trim().trim_end_matches('.').to_ascii_lowercase()
}

fn is_within(name: &str, suffix: &str) -> bool {
    name == suffix
        || name
            .strip_suffix(suffix)
            .is_some_and(|rest| rest.ends_with('.'))
}

/// Set of allowed domain suffixes. An empty filter allows everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct DomainFilter {
    filters: Vec<String>,
}

impl DomainFilter {
    /// Build a filter; entries are trimmed, lower-cased and stripped of a
    /// trailing dot, and empty entries are dropped.
    pub fn new<I, S>(filters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for filter in filters {
            let filter = normalize(filter.as_ref());
            if !filter.is_empty() && !normalized.contains(&filter) {
                normalized.push(filter);
            }
        }
        Self {
            filters: normalized,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn filters(&self) -> &[String] {
        &self.filters
    }

    /// Whether a record name is in scope.
    pub fn matches(&self, name: &str) -> bool {
        if self.filters.is_empty() {
            return true;
        }
        let name = normalize(name);
        self.filters.iter().any(|f| is_within(&name, f))
    }

    /// Whether a zone may hold in-scope records: the zone is covered by an
    /// entry, or an entry lives below the zone.
    pub fn matches_zone(&self, zone: &str) -> bool {
        if self.filters.is_empty() {
            return true;
        }
        let zone = normalize(zone);
        self.filters
            .iter()
            .any(|f| is_within(&zone, f) || is_within(f, &zone))
    }
}

impl From<Vec<String>> for DomainFilter {
    fn from(filters: Vec<String>) -> Self {
        Self::new(filters)
    }
}

impl From<DomainFilter> for Vec<String> {
    fn from(filter: DomainFilter) -> Self {
        filter.filters
    }
}
