//! In-process vendor filtering, ranking and capping.
//!
//! Candidates come from the repository already narrowed by location; every
//! predicate is still re-checked here so the result does not depend on how
//! the store matched.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::category::CategoryRegistry;
use crate::domain::types::CategoryId;
use crate::domain::vendor::VendorListing;

/// Maximum number of vendors returned by a single search.
pub const SEARCH_RESULT_LIMIT: usize = 10;

/// Requested category. A value that is not a well-formed id is kept as
/// `Unresolvable` and never matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryFilter {
    Id(CategoryId),
    Unresolvable,
}

impl CategoryFilter {
    /// Parses a raw query value; malformed input becomes `Unresolvable`.
    pub fn parse(raw: &str) -> Self {
        CategoryId::new(raw).map_or(Self::Unresolvable, Self::Id)
    }
}

/// Optional search predicates combined with AND semantics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub state: Option<String>,
    pub city: Option<String>,
    pub category: Option<CategoryFilter>,
    pub keyword: Option<String>,
}

impl SearchFilters {
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category = Some(CategoryFilter::Id(category_id));
        self
    }
    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    /// Both location filters are present and non-blank.
    pub fn has_location(&self) -> bool {
        non_blank(self.state.as_deref()).is_some() && non_blank(self.city.as_deref()).is_some()
    }
}

/// Capped result list plus the number of vendors that matched in total.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchResults {
    pub total: usize,
    pub vendors: Vec<VendorListing>,
}

impl SearchResults {
    /// Matches that did not fit under [`SEARCH_RESULT_LIMIT`].
    pub fn hidden(&self) -> usize {
        self.total.saturating_sub(self.vendors.len())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Lowercased, trimmed filters ready for matching.
struct Criteria<'a> {
    state: Option<String>,
    city: Option<String>,
    category: Option<&'a CategoryFilter>,
    keyword: Option<String>,
}

impl<'a> Criteria<'a> {
    fn new(filters: &'a SearchFilters) -> Self {
        Self {
            state: non_blank(filters.state.as_deref()).map(str::to_lowercase),
            city: non_blank(filters.city.as_deref()).map(str::to_lowercase),
            category: filters.category.as_ref(),
            keyword: non_blank(filters.keyword.as_deref()).map(str::to_lowercase),
        }
    }

    fn matches(&self, listing: &VendorListing, registry: &CategoryRegistry) -> bool {
        let vendor = &listing.vendor;

        if let Some(state) = &self.state {
            if vendor.state.trim().to_lowercase() != *state {
                return false;
            }
        }

        if let Some(city) = &self.city {
            if vendor.city.trim().to_lowercase() != *city {
                return false;
            }
        }

        match self.category {
            Some(CategoryFilter::Id(category_id)) => {
                if !registry.contains(category_id) || !vendor.category_ids.contains(category_id) {
                    return false;
                }
            }
            Some(CategoryFilter::Unresolvable) => return false,
            None => {}
        }

        match &self.keyword {
            Some(keyword) => matches_keyword(listing, keyword, registry),
            None => true,
        }
    }
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn matches_keyword(listing: &VendorListing, keyword: &str, registry: &CategoryRegistry) -> bool {
    let vendor = &listing.vendor;

    contains_ci(&vendor.name, keyword)
        || contains_ci(&vendor.description, keyword)
        || vendor
            .tagline
            .as_ref()
            .is_some_and(|t| contains_ci(t, keyword))
        || vendor
            .category_ids
            .iter()
            .filter_map(|id| registry.name_for(id))
            .any(|name| contains_ci(name, keyword))
        || listing
            .services
            .iter()
            .any(|s| contains_ci(&s.name, keyword) || contains_ci(&s.description, keyword))
}

/// Rating descending (unrated last), then name, then id.
fn rank(a: &VendorListing, b: &VendorListing) -> Ordering {
    let (a, b) = (&a.vendor, &b.vendor);
    let rating = match (a.rating, b.rating) {
        (Some(x), Some(y)) => y.get().total_cmp(&x.get()),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    rating
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.id.cmp(&b.id))
}

/// Filters `candidates`, ranks the matches and keeps the top
/// [`SEARCH_RESULT_LIMIT`].
pub fn search(
    candidates: Vec<VendorListing>,
    filters: &SearchFilters,
    registry: &CategoryRegistry,
) -> SearchResults {
    let criteria = Criteria::new(filters);

    let mut matched: Vec<VendorListing> = candidates
        .into_iter()
        .filter(|listing| criteria.matches(listing, registry))
        .collect();

    let total = matched.len();
    matched.sort_by(rank);
    matched.truncate(SEARCH_RESULT_LIMIT);

    SearchResults {
        total,
        vendors: matched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::service::Service;
    use crate::domain::types::{
        CityName, ImageUrl, Rating, ServiceDescription, ServiceId, ServiceName, StateName,
        Tagline, VendorDescription, VendorId, VendorName, VendorSlug,
    };
    use crate::domain::vendor::Vendor;
    use chrono::DateTime;

    fn vendor(id: &str, state: &str, city: &str, categories: &[&str]) -> Vendor {
        let now = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        Vendor {
            id: VendorId::new(id).unwrap(),
            name: VendorName::new(format!("Vendor {id}")).unwrap(),
            slug: VendorSlug::new(format!("vendor-{id}")).unwrap(),
            tagline: None,
            description: VendorDescription::new("Friendly local business").unwrap(),
            state: StateName::new(state).unwrap(),
            city: CityName::new(city).unwrap(),
            category_ids: categories
                .iter()
                .map(|c| CategoryId::new(*c).unwrap())
                .collect(),
            profile_image: ImageUrl::new("/uploads/p.jpg").unwrap(),
            banner_image: None,
            rating: None,
            reviews_count: None,
            contact_email: None,
            phone_number: None,
            website: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn listing(vendor: Vendor) -> VendorListing {
        VendorListing {
            vendor,
            services: vec![],
        }
    }

    fn service(vendor_id: &str, id: i32, name: &str, description: &str) -> Service {
        let now = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        Service {
            id: ServiceId::new(id).unwrap(),
            vendor_id: VendorId::new(vendor_id).unwrap(),
            name: ServiceName::new(name).unwrap(),
            description: ServiceDescription::new(description).unwrap(),
            category_id: CategoryId::new("djs").unwrap(),
            photos: vec![ImageUrl::new("/uploads/s.jpg").unwrap()],
            price_range: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn ids(results: &SearchResults) -> Vec<&str> {
        results
            .vendors
            .iter()
            .map(|l| l.vendor.id.as_str())
            .collect()
    }

    fn austin_filters() -> SearchFilters {
        SearchFilters::default().state("Texas").city("Austin")
    }

    #[test]
    fn matches_category_scenario() {
        let registry = CategoryRegistry::default();
        let candidates = vec![listing(vendor("1", "Texas", "Austin", &["djs"]))];

        let found = search(
            candidates.clone(),
            &austin_filters().category(CategoryId::new("djs").unwrap()),
            &registry,
        );
        assert_eq!(ids(&found), vec!["1"]);

        let none = search(
            candidates,
            &austin_filters().category(CategoryId::new("photographers").unwrap()),
            &registry,
        );
        assert!(none.vendors.is_empty());
        assert_eq!(none.total, 0);
    }

    #[test]
    fn unknown_category_ids_never_match() {
        let registry = CategoryRegistry::default();
        let candidates = vec![listing(vendor("1", "Texas", "Austin", &["astronauts"]))];

        let found = search(
            candidates,
            &austin_filters().category(CategoryId::new("astronauts").unwrap()),
            &registry,
        );
        assert!(found.vendors.is_empty());
    }

    #[test]
    fn unresolvable_category_matches_nothing() {
        let registry = CategoryRegistry::default();
        let candidates = vec![listing(vendor("1", "Texas", "Austin", &["djs"]))];

        let mut filters = austin_filters();
        filters.category = Some(CategoryFilter::parse("DJs & Bands"));

        let found = search(candidates, &filters, &registry);
        assert_eq!(found, SearchResults::default());
    }

    #[test]
    fn state_and_city_match_case_insensitively() {
        let registry = CategoryRegistry::default();
        let candidates = vec![
            listing(vendor("1", "California", "San Diego", &[])),
            listing(vendor("2", "Texas", "Austin", &[])),
        ];

        let lower = search(
            candidates.clone(),
            &SearchFilters::default().state("california"),
            &registry,
        );
        let upper = search(
            candidates.clone(),
            &SearchFilters::default().state("CALIFORNIA"),
            &registry,
        );
        assert_eq!(ids(&lower), vec!["1"]);
        assert_eq!(lower, upper);

        let city = search(
            candidates,
            &SearchFilters::default().city("  san DIEGO "),
            &registry,
        );
        assert_eq!(ids(&city), vec!["1"]);
    }

    #[test]
    fn filters_combine_with_and_semantics() {
        let registry = CategoryRegistry::default();
        let candidates = vec![
            listing(vendor("1", "Texas", "Austin", &["djs"])),
            listing(vendor("2", "Texas", "Austin", &["florists"])),
            listing(vendor("3", "Texas", "Dallas", &["djs"])),
        ];

        let narrow = austin_filters().category(CategoryId::new("djs").unwrap());
        let wide = austin_filters();

        let narrow_ids = ids(&search(candidates.clone(), &narrow, &registry))
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();
        let wide_results = search(candidates, &wide, &registry);
        let wide_ids = ids(&wide_results);

        assert_eq!(narrow_ids, vec!["1"]);
        assert_eq!(wide_ids, vec!["1", "2"]);
        assert!(narrow_ids.iter().all(|id| wide_ids.contains(&id.as_str())));
    }

    #[test]
    fn keyword_matches_service_description_only() {
        let registry = CategoryRegistry::default();
        let mut with_service = listing(vendor("1", "Texas", "Austin", &[]));
        with_service.services.push(service(
            "1",
            1,
            "Reception set",
            "Includes a saxophone player",
        ));
        let candidates = vec![with_service, listing(vendor("2", "Texas", "Austin", &[]))];

        let found = search(candidates, &austin_filters().keyword("SAXOPHONE"), &registry);
        assert_eq!(ids(&found), vec!["1"]);
    }

    #[test]
    fn keyword_matches_tagline_and_category_names() {
        let registry = CategoryRegistry::default();
        let mut tagged = vendor("1", "Texas", "Austin", &[]);
        tagged.tagline = Some(Tagline::new("Beats all night").unwrap());
        let candidates = vec![
            listing(tagged),
            listing(vendor("2", "Texas", "Austin", &["hair-makeup"])),
        ];

        let by_tagline = search(candidates.clone(), &austin_filters().keyword("beats"), &registry);
        assert_eq!(ids(&by_tagline), vec!["1"]);

        let by_category = search(candidates, &austin_filters().keyword("makeup"), &registry);
        assert_eq!(ids(&by_category), vec!["2"]);
    }

    #[test]
    fn whitespace_keyword_is_ignored() {
        let registry = CategoryRegistry::default();
        let candidates = vec![
            listing(vendor("1", "Texas", "Austin", &[])),
            listing(vendor("2", "Texas", "Austin", &[])),
        ];

        let found = search(candidates, &austin_filters().keyword("   "), &registry);
        assert_eq!(found.total, 2);
    }

    #[test]
    fn caps_results_and_reports_total() {
        let registry = CategoryRegistry::default();
        let candidates: Vec<_> = (1..=13)
            .map(|i| listing(vendor(&format!("v{i:02}"), "Texas", "Austin", &[])))
            .collect();

        let capped = search(candidates.clone(), &austin_filters(), &registry);
        assert_eq!(capped.vendors.len(), SEARCH_RESULT_LIMIT);
        assert_eq!(capped.total, 13);
        assert_eq!(capped.hidden(), 3);

        let few = search(candidates[..4].to_vec(), &austin_filters(), &registry);
        assert_eq!(few.vendors.len(), 4);
        assert_eq!(few.hidden(), 0);
    }

    #[test]
    fn ranks_by_rating_then_name() {
        let registry = CategoryRegistry::default();
        let mut unrated = vendor("a", "Texas", "Austin", &[]);
        unrated.name = VendorName::new("Aardvark Audio").unwrap();
        let mut good = vendor("b", "Texas", "Austin", &[]);
        good.rating = Some(Rating::new(4.0).unwrap());
        good.name = VendorName::new("Zebra Sounds").unwrap();
        let mut best = vendor("c", "Texas", "Austin", &[]);
        best.rating = Some(Rating::new(4.8).unwrap());
        let mut tied = vendor("d", "Texas", "Austin", &[]);
        tied.rating = Some(Rating::new(4.0).unwrap());
        tied.name = VendorName::new("alpha beats").unwrap();

        let candidates = vec![unrated, good, best, tied]
            .into_iter()
            .map(listing)
            .collect();
        let found = search(candidates, &austin_filters(), &registry);

        assert_eq!(ids(&found), vec!["c", "d", "b", "a"]);
    }
}
