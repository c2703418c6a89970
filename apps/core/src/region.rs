use serde::Serialize;
use std::fmt;

/// Query value meaning "no region filter".
pub const ALL_REGIONS: &str = "all";

/// The region the dashboard is currently filtered to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum RegionSelector {
    #[default]
    All,
    Named(String),
}

impl RegionSelector {
    /// Parses a filter value. Anything other than `"all"` (or an empty string)
    /// is taken verbatim as a region name; matching is case-sensitive.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == ALL_REGIONS {
            Self::All
        } else {
            Self::Named(value.to_string())
        }
    }

    pub fn as_query_value(&self) -> &str {
        match self {
            Self::All => ALL_REGIONS,
            Self::Named(name) => name,
        }
    }

    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Named(name) => Some(name),
        }
    }

    /// True when `region` is the selected one. `All` selects nothing.
    pub fn selects(&self, region: &str) -> bool {
        self.name() == Some(region)
    }
}

impl fmt::Display for RegionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query_value())
    }
}

impl From<RegionSelector> for String {
    fn from(value: RegionSelector) -> Self {
        value.as_query_value().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sentinel_and_names() {
        assert_eq!(RegionSelector::parse("all"), RegionSelector::All);
        assert_eq!(RegionSelector::parse(""), RegionSelector::All);
        assert_eq!(
            RegionSelector::parse(" Texas "),
            RegionSelector::Named("Texas".to_string())
        );
    }

    #[test]
    fn matching_is_exact_and_case_sensitive() {
        let selected = RegionSelector::parse("West");
        assert!(selected.selects("West"));
        assert!(!selected.selects("west"));
        assert!(!RegionSelector::All.selects("all"));
    }
}
