//! Filter widgets and the dashboard title they drive.

use crate::region::{RegionSelector, ALL_REGIONS};
use serde::Serialize;

pub const DEFAULT_TITLE: &str = "Retail Analytics Strategic Dashboard";
pub const ALL_YEARS: &str = "all";

/// Region dropdown. Options are reconciled once against the first unfiltered
/// region list; after that they never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionFilter {
    options: Vec<String>,
    populated: bool,
    selected: RegionSelector,
}

impl Default for RegionFilter {
    fn default() -> Self {
        Self {
            options: vec![ALL_REGIONS.to_string()],
            populated: false,
            selected: RegionSelector::All,
        }
    }
}

impl RegionFilter {
    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub const fn is_populated(&self) -> bool {
        self.populated
    }

    pub const fn selected(&self) -> &RegionSelector {
        &self.selected
    }

    /// Highlighted while a specific region is selected.
    pub const fn is_active(&self) -> bool {
        !self.selected.is_all()
    }

    /// Adds one option per region until the dropdown holds more than the
    /// `all` entry; later lists are ignored. Returns whether options changed.
    pub fn populate<'a>(&mut self, regions: impl IntoIterator<Item = &'a str>) -> bool {
        if self.populated {
            return false;
        }
        let before = self.options.len();
        for region in regions {
            if !self.options.iter().any(|option| option == region) {
                self.options.push(region.to_string());
            }
        }
        self.populated = self.options.len() > 1;
        self.options.len() > before
    }

    pub fn select(&mut self, region: RegionSelector) {
        self.selected = region;
    }

    pub fn position(&self) -> usize {
        self.options
            .iter()
            .position(|option| *option == self.selected.as_query_value())
            .unwrap_or(0)
    }

    /// The option after the current one, wrapping around.
    pub fn next(&self) -> RegionSelector {
        let index = (self.position() + 1) % self.options.len();
        RegionSelector::parse(&self.options[index])
    }

    pub fn previous(&self) -> RegionSelector {
        let len = self.options.len();
        let index = (self.position() + len - 1) % len;
        RegionSelector::parse(&self.options[index])
    }

    pub fn option_label(option: &str) -> &str {
        if option == ALL_REGIONS {
            "All Regions"
        } else {
            option
        }
    }
}

/// Year dropdown. The first option always means "every year".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearFilter {
    options: Vec<String>,
    selected: usize,
}

impl YearFilter {
    pub fn new<I, S>(years: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut options = vec![ALL_YEARS.to_string()];
        for year in years {
            let year = year.into();
            if !year.is_empty() && !options.contains(&year) {
                options.push(year);
            }
        }
        Self {
            options,
            selected: 0,
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub const fn position(&self) -> usize {
        self.selected
    }

    pub fn selected_year(&self) -> Option<&str> {
        match self.options.get(self.selected) {
            Some(year) if year != ALL_YEARS => Some(year.as_str()),
            _ => None,
        }
    }

    pub fn select_index(&mut self, index: usize) -> bool {
        if index >= self.options.len() || index == self.selected {
            return false;
        }
        self.selected = index;
        true
    }

    pub const fn next_index(&self) -> usize {
        (self.selected + 1) % self.options.len()
    }

    pub const fn previous_index(&self) -> usize {
        (self.selected + self.options.len() - 1) % self.options.len()
    }

    pub fn option_label(option: &str) -> &str {
        if option == ALL_YEARS {
            "All Years"
        } else {
            option
        }
    }
}

/// Page heading. When a region is selected its name is shown highlighted in
/// front of the rest of the title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Title {
    pub highlight: Option<String>,
    pub text: String,
}

impl Default for Title {
    fn default() -> Self {
        Self {
            highlight: None,
            text: DEFAULT_TITLE.to_string(),
        }
    }
}

impl Title {
    pub fn for_region(region: &RegionSelector) -> Self {
        match region.name() {
            None => Self::default(),
            Some(name) => Self {
                highlight: Some(name.to_string()),
                text: " Region - Strategic Dashboard".to_string(),
            },
        }
    }

    pub fn plain(&self) -> String {
        match &self.highlight {
            Some(highlight) => format!("{highlight}{}", self.text),
            None => self.text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_filter_populates_once() {
        let mut filter = RegionFilter::default();
        assert!(filter.populate(["West", "South"]));
        assert!(!filter.populate(["West", "South", "North"]));
        assert_eq!(filter.options(), ["all", "West", "South"]);
    }

    #[test]
    fn empty_region_list_leaves_the_filter_open() {
        let mut filter = RegionFilter::default();
        assert!(!filter.populate([]));
        assert!(!filter.populate(["all"]));
        assert!(!filter.is_populated());

        assert!(filter.populate(["West", "South"]));
        assert!(filter.is_populated());
        assert_eq!(filter.options(), ["all", "West", "South"]);
    }

    #[test]
    fn region_filter_skips_duplicate_names() {
        let mut filter = RegionFilter::default();
        filter.populate(["West", "West", "all"]);
        assert_eq!(filter.options(), ["all", "West"]);
    }

    #[test]
    fn region_navigation_wraps() {
        let mut filter = RegionFilter::default();
        filter.populate(["West", "South"]);
        assert_eq!(filter.previous(), RegionSelector::parse("South"));
        filter.select(RegionSelector::parse("South"));
        assert_eq!(filter.next(), RegionSelector::All);
        assert!(filter.is_active());
    }

    #[test]
    fn unknown_selection_sits_on_the_first_option() {
        let mut filter = RegionFilter::default();
        filter.select(RegionSelector::parse("Texas"));
        assert_eq!(filter.position(), 0);
        filter.populate(["West", "Texas"]);
        assert_eq!(filter.position(), 2);
    }

    #[test]
    fn year_filter_starts_on_all_years() {
        let mut years = YearFilter::new(["2023", "2024", "2023", ""]);
        assert_eq!(years.options(), ["all", "2023", "2024"]);
        assert_eq!(years.selected_year(), None);
        assert!(years.select_index(years.previous_index()));
        assert_eq!(years.selected_year(), Some("2024"));
        assert!(!years.select_index(2));
        assert!(!years.select_index(9));
    }

    #[test]
    fn year_indices_wrap_both_ways() {
        let mut years = YearFilter::new(["2023", "2024"]);
        assert_eq!(years.previous_index(), 2);
        assert_eq!(years.next_index(), 1);
        years.select_index(2);
        assert_eq!(years.next_index(), 0);

        let only_all = YearFilter::new(Vec::<String>::new());
        assert_eq!((only_all.next_index(), only_all.previous_index()), (0, 0));
    }

    #[test]
    fn title_embeds_region() {
        let title = Title::for_region(&RegionSelector::parse("Texas"));
        assert_eq!(title.highlight.as_deref(), Some("Texas"));
        assert_eq!(title.plain(), "Texas Region - Strategic Dashboard");
        assert_eq!(Title::for_region(&RegionSelector::All).plain(), DEFAULT_TITLE);
    }
}
