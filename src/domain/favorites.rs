//! Favorite references and their resolution into vendor groups.
//!
//! A favorite reference is the string `"{vendor_id}_{service_id}"`. Stored
//! lists may contain malformed or dangling entries; those are skipped rather
//! than reported.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::domain::service::Service;
use crate::domain::types::{ServiceId, TypeConstraintError, VendorId};
use crate::domain::vendor::Vendor;

/// Parsed `vendor_id` / `service_id` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FavoriteRef {
    pub vendor_id: VendorId,
    pub service_id: ServiceId,
}

impl FavoriteRef {
    pub fn new(vendor_id: VendorId, service_id: ServiceId) -> Self {
        Self {
            vendor_id,
            service_id,
        }
    }

    /// Splits on the first `_`. Both halves must be valid identifiers.
    pub fn parse(raw: &str) -> Result<Self, TypeConstraintError> {
        let (vendor, service) = raw.trim().split_once('_').ok_or_else(|| {
            TypeConstraintError::InvalidValue(format!("favorite reference: {raw}"))
        })?;
        let service_id = service
            .parse::<i32>()
            .map_err(|_| TypeConstraintError::InvalidValue(format!("favorite reference: {raw}")))?;
        Ok(Self {
            vendor_id: VendorId::new(vendor)?,
            service_id: ServiceId::new(service_id)?,
        })
    }
}

impl Display for FavoriteRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.vendor_id, self.service_id)
    }
}

impl TryFrom<String> for FavoriteRef {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for FavoriteRef {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<FavoriteRef> for String {
    fn from(value: FavoriteRef) -> Self {
        value.to_string()
    }
}

/// One vendor and the favorited services it owns, in resolution order.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FavoriteGroup {
    pub vendor: Vendor,
    pub services: Vec<Service>,
}

/// Parses raw references, silently dropping malformed entries.
pub fn parse_references<S: AsRef<str>>(raw: &[S]) -> Vec<FavoriteRef> {
    raw.iter()
        .filter_map(|r| FavoriteRef::parse(r.as_ref()).ok())
        .collect()
}

/// Groups resolvable references by vendor.
///
/// A reference resolves only when its vendor and service are both present
/// and the service belongs to that vendor. Groups keep the order in which
/// each vendor first appears; services keep reference order.
pub fn group_favorites(
    refs: &[FavoriteRef],
    vendors: &HashMap<VendorId, Vendor>,
    services: &HashMap<ServiceId, Service>,
) -> Vec<FavoriteGroup> {
    let mut groups: Vec<FavoriteGroup> = Vec::new();
    let mut positions: HashMap<&VendorId, usize> = HashMap::new();

    for favorite in refs {
        let (Some(vendor), Some(service)) = (
            vendors.get(&favorite.vendor_id),
            services.get(&favorite.service_id),
        ) else {
            continue;
        };
        if service.vendor_id != vendor.id {
            continue;
        }

        match positions.get(&vendor.id) {
            Some(&index) => groups[index].services.push(service.clone()),
            None => {
                positions.insert(&vendor.id, groups.len());
                groups.push(FavoriteGroup {
                    vendor: vendor.clone(),
                    services: vec![service.clone()],
                });
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{
        CategoryId, CityName, ImageUrl, ServiceDescription, ServiceName, StateName,
        VendorDescription, VendorName, VendorSlug,
    };
    use chrono::DateTime;

    fn vendor(id: &str) -> Vendor {
        let now = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        Vendor {
            id: VendorId::new(id).unwrap(),
            name: VendorName::new(format!("Vendor {id}")).unwrap(),
            slug: VendorSlug::new(format!("vendor-{id}")).unwrap(),
            tagline: None,
            description: VendorDescription::new("desc").unwrap(),
            state: StateName::new("Texas").unwrap(),
            city: CityName::new("Austin").unwrap(),
            category_ids: vec![],
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

    fn service(vendor_id: &str, id: i32) -> Service {
        let now = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        Service {
            id: ServiceId::new(id).unwrap(),
            vendor_id: VendorId::new(vendor_id).unwrap(),
            name: ServiceName::new(format!("Service {id}")).unwrap(),
            description: ServiceDescription::new("desc").unwrap(),
            category_id: CategoryId::new("djs").unwrap(),
            photos: vec![ImageUrl::new("/uploads/s.jpg").unwrap()],
            price_range: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn lookups(
        vendors: Vec<Vendor>,
        services: Vec<Service>,
    ) -> (HashMap<VendorId, Vendor>, HashMap<ServiceId, Service>) {
        (
            vendors.into_iter().map(|v| (v.id.clone(), v)).collect(),
            services.into_iter().map(|s| (s.id, s)).collect(),
        )
    }

    fn shape(groups: &[FavoriteGroup]) -> Vec<(&str, Vec<i32>)> {
        groups
            .iter()
            .map(|g| {
                (
                    g.vendor.id.as_str(),
                    g.services.iter().map(|s| s.id.get()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn parses_on_first_underscore() {
        let parsed = FavoriteRef::parse("v1_42").unwrap();
        assert_eq!(parsed.vendor_id, "v1");
        assert_eq!(parsed.service_id, 42);
        assert_eq!(parsed.to_string(), "v1_42");
    }

    #[test]
    fn rejects_malformed_references() {
        for raw in ["", "bad", "_1", "v1_", "v1_abc", "v1_0", "v1_2_3"] {
            assert!(FavoriteRef::parse(raw).is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn skips_malformed_and_dangling_references() {
        let (vendors, services) =
            lookups(vec![vendor("v1"), vendor("v2")], vec![service("v1", 1)]);
        let refs = parse_references(&["v1_1", "bad", "v2_99"]);

        let groups = group_favorites(&refs, &vendors, &services);

        assert_eq!(shape(&groups), vec![("v1", vec![1])]);
    }

    #[test]
    fn groups_in_order_of_first_appearance() {
        let (vendors, services) = lookups(
            vec![vendor("v1"), vendor("v2")],
            vec![service("v1", 1), service("v2", 2), service("v1", 3)],
        );
        let refs = parse_references(&["v1_1", "v2_2", "v1_3"]);

        let groups = group_favorites(&refs, &vendors, &services);

        assert_eq!(shape(&groups), vec![("v1", vec![1, 3]), ("v2", vec![2])]);
    }

    #[test]
    fn drops_services_owned_by_another_vendor() {
        let (vendors, services) =
            lookups(vec![vendor("v1"), vendor("v2")], vec![service("v2", 7)]);
        let refs = parse_references(&["v1_7"]);

        assert!(group_favorites(&refs, &vendors, &services).is_empty());
    }

    #[test]
    fn missing_vendor_drops_reference() {
        let (vendors, services) = lookups(vec![], vec![service("v1", 1)]);
        let refs = parse_references(&["v1_1"]);

        assert!(group_favorites(&refs, &vendors, &services).is_empty());
    }
}
