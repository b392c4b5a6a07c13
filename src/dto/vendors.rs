//! Template and JSON views with category ids resolved to names.

use serde::Serialize;

use crate::domain::category::CategoryRegistry;
use crate::domain::favorites::{FavoriteGroup, FavoriteRef};
use crate::domain::service::Service;
use crate::domain::vendor::{Vendor, VendorListing};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ServiceDto {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub category_id: String,
    pub category: String,
    pub photos: Vec<String>,
    pub price_range: Option<String>,
    /// Favorite reference for this service.
    pub reference: String,
}

impl ServiceDto {
    pub fn new(service: &Service, registry: &CategoryRegistry) -> Self {
        Self {
            id: service.id.get(),
            name: service.name.to_string(),
            description: service.description.to_string(),
            category_id: service.category_id.to_string(),
            category: category_name(registry, service.category_id.as_str()),
            photos: service.photos.iter().map(ToString::to_string).collect(),
            price_range: service.price_range.as_ref().map(ToString::to_string),
            reference: FavoriteRef::new(service.vendor_id.clone(), service.id).to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VendorDto {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub tagline: Option<String>,
    pub description: String,
    pub state: String,
    pub city: String,
    pub categories: Vec<String>,
    pub profile_image: String,
    pub banner_image: Option<String>,
    pub rating: Option<f64>,
    pub reviews_count: Option<i32>,
    pub contact_email: Option<String>,
    pub phone_number: Option<String>,
    pub website: Option<String>,
}

impl VendorDto {
    pub fn new(vendor: &Vendor, registry: &CategoryRegistry) -> Self {
        Self {
            id: vendor.id.to_string(),
            name: vendor.name.to_string(),
            slug: vendor.slug.to_string(),
            tagline: vendor.tagline.as_ref().map(ToString::to_string),
            description: vendor.description.to_string(),
            state: vendor.state.to_string(),
            city: vendor.city.to_string(),
            categories: vendor
                .category_ids
                .iter()
                .filter_map(|id| registry.name_for(id))
                .map(str::to_string)
                .collect(),
            profile_image: vendor.profile_image.to_string(),
            banner_image: vendor.banner_image.as_ref().map(ToString::to_string),
            rating: vendor.rating.map(f64::from),
            reviews_count: vendor.reviews_count.map(i32::from),
            contact_email: vendor.contact_email.as_ref().map(ToString::to_string),
            phone_number: vendor.phone_number.as_ref().map(ToString::to_string),
            website: vendor.website.as_ref().map(ToString::to_string),
        }
    }
}

/// A vendor with the services shown next to it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VendorListingDto {
    pub vendor: VendorDto,
    pub services: Vec<ServiceDto>,
}

impl VendorListingDto {
    pub fn new(listing: &VendorListing, registry: &CategoryRegistry) -> Self {
        Self {
            vendor: VendorDto::new(&listing.vendor, registry),
            services: listing
                .services
                .iter()
                .map(|s| ServiceDto::new(s, registry))
                .collect(),
        }
    }

    pub fn from_group(group: &FavoriteGroup, registry: &CategoryRegistry) -> Self {
        Self {
            vendor: VendorDto::new(&group.vendor, registry),
            services: group
                .services
                .iter()
                .map(|s| ServiceDto::new(s, registry))
                .collect(),
        }
    }
}

fn category_name(registry: &CategoryRegistry, id: &str) -> String {
    registry
        .by_id(id)
        .map(|c| c.name.to_string())
        .unwrap_or_else(|| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fixtures::{sample_listing, sample_service, sample_vendor};

    #[test]
    fn resolves_category_names() {
        let registry = CategoryRegistry::default();
        let listing = sample_listing(sample_vendor("v1", "Spin Doctors"), vec![sample_service(7, "v1")]);

        let dto = VendorListingDto::new(&listing, &registry);

        assert_eq!(dto.vendor.categories, vec!["DJs".to_string()]);
        assert_eq!(dto.services[0].category, "DJs");
        assert_eq!(dto.services[0].reference, "v1_7");
    }
}
