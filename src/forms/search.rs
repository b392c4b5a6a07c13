use serde::{Deserialize, Serialize};

use crate::domain::search::{CategoryFilter, SearchFilters};
use crate::forms::non_blank;

/// Query string of the search page and the JSON search endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchForm {
    pub state: Option<String>,
    pub city: Option<String>,
    pub category: Option<String>,
    pub q: Option<String>,
}

/// Malformed values never fail the search; they simply match nothing.
impl From<SearchForm> for SearchFilters {
    fn from(value: SearchForm) -> Self {
        Self {
            state: non_blank(value.state),
            city: non_blank(value.city),
            category: non_blank(value.category).map(|raw| CategoryFilter::parse(&raw)),
            keyword: non_blank(value.q),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::CategoryRegistry;
    use crate::domain::search::{SearchResults, search};
    use crate::domain::types::CategoryId;

    #[test]
    fn blank_fields_are_absent() {
        let form = SearchForm {
            state: Some("Texas".into()),
            city: Some(" Austin ".into()),
            category: Some("".into()),
            q: Some("   ".into()),
        };

        let filters = SearchFilters::from(form);
        assert_eq!(filters.state.as_deref(), Some("Texas"));
        assert_eq!(filters.city.as_deref(), Some("Austin"));
        assert!(filters.category.is_none());
        assert!(filters.keyword.is_none());
    }

    #[test]
    fn valid_category_is_kept() {
        let form = SearchForm {
            category: Some(" djs ".into()),
            ..Default::default()
        };

        let filters = SearchFilters::from(form);
        assert_eq!(
            filters.category,
            Some(CategoryFilter::Id(CategoryId::new("djs").unwrap()))
        );
    }

    #[test]
    fn malformed_category_yields_empty_results() {
        let form = SearchForm {
            state: Some("Texas".into()),
            city: Some("Austin".into()),
            category: Some("DJs".into()),
            q: None,
        };

        let filters = SearchFilters::from(form);
        assert_eq!(filters.category, Some(CategoryFilter::Unresolvable));

        let results = search(Vec::new(), &filters, &CategoryRegistry::default());
        assert_eq!(results, SearchResults::default());
    }
}
