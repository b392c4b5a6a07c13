use crate::domain::category::CategoryRegistry;
use crate::domain::search::{SearchFilters, SearchResults, search};
use crate::domain::types::VendorSlug;
use crate::domain::vendor::VendorListing;
use crate::repository::{VendorReader, VendorSearchQuery};

use super::{ServiceError, ServiceResult};

/// What the search page should show.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// State or city is missing; the engine was not run.
    Incomplete,
    Results(SearchResults),
}

/// Runs a vendor search once both location filters are present.
///
/// The repository narrows candidates by location; filtering, ranking and the
/// result cap are applied by [`search`].
pub fn search_vendors<R>(
    filters: &SearchFilters,
    repo: &R,
    registry: &CategoryRegistry,
) -> ServiceResult<SearchOutcome>
where
    R: VendorReader,
{
    if !filters.has_location() {
        return Ok(SearchOutcome::Incomplete);
    }

    let mut query = VendorSearchQuery::default();
    if let Some(state) = &filters.state {
        query = query.state(state.as_str());
    }
    if let Some(city) = &filters.city {
        query = query.city(city.as_str());
    }

    let candidates = repo.list_search_candidates(query).map_err(|e| {
        log::error!("Failed to load search candidates: {e}");
        ServiceError::Internal
    })?;

    let results = search(candidates, filters, registry);
    log::debug!(
        "Search matched {} vendors, showing {}",
        results.total,
        results.vendors.len()
    );
    Ok(SearchOutcome::Results(results))
}

/// Public vendor profile by slug.
pub fn show_vendor<R>(slug: &str, repo: &R) -> ServiceResult<VendorListing>
where
    R: VendorReader,
{
    let slug = VendorSlug::new(slug).map_err(|_| ServiceError::NotFound)?;

    match repo.get_vendor_by_slug(&slug) {
        Ok(Some(listing)) => Ok(listing),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get vendor by slug: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::CategoryId;
    use crate::repository::test::TestRepository;
    use crate::services::fixtures::{sample_listing, sample_service, sample_vendor};

    fn sample_repo() -> TestRepository {
        let mut dallas = sample_vendor("v2", "Dallas Beats");
        dallas.city = crate::domain::types::CityName::new("Dallas").unwrap();

        TestRepository::new(vec![
            sample_listing(sample_vendor("v1", "Spin Doctors"), vec![sample_service(1, "v1")]),
            sample_listing(dallas, vec![]),
        ])
    }

    #[test]
    fn incomplete_without_city() {
        let repo = sample_repo();
        let filters = SearchFilters::default().state("Texas");

        let outcome = search_vendors(&filters, &repo, &CategoryRegistry::default()).unwrap();
        assert_eq!(outcome, SearchOutcome::Incomplete);
    }

    #[test]
    fn searches_within_location() {
        let repo = sample_repo();
        let filters = SearchFilters::default()
            .state("texas")
            .city("AUSTIN")
            .category(CategoryId::new("djs").unwrap());

        let outcome = search_vendors(&filters, &repo, &CategoryRegistry::default()).unwrap();
        let SearchOutcome::Results(results) = outcome else {
            panic!("expected results");
        };
        assert_eq!(results.total, 1);
        assert_eq!(results.vendors[0].vendor.id, "v1");
    }

    #[test]
    fn no_matches_is_not_an_error() {
        let repo = sample_repo();
        let filters = SearchFilters::default()
            .state("Texas")
            .city("Austin")
            .keyword("balloons");

        let outcome = search_vendors(&filters, &repo, &CategoryRegistry::default()).unwrap();
        assert_eq!(outcome, SearchOutcome::Results(SearchResults::default()));
    }

    #[test]
    fn malformed_category_degrades_to_empty_results() {
        let repo = sample_repo();
        let filters = SearchFilters::from(crate::forms::search::SearchForm {
            state: Some("Texas".into()),
            city: Some("Austin".into()),
            category: Some("DJs".into()),
            q: None,
        });

        let outcome = search_vendors(&filters, &repo, &CategoryRegistry::default()).unwrap();
        assert_eq!(outcome, SearchOutcome::Results(SearchResults::default()));
    }

    #[test]
    fn unknown_slug_is_not_found() {
        let repo = sample_repo();
        assert_eq!(show_vendor("nobody", &repo), Err(ServiceError::NotFound));
        assert_eq!(show_vendor("Bad Slug!", &repo), Err(ServiceError::NotFound));
        assert!(show_vendor("v1", &repo).is_ok());
    }
}
