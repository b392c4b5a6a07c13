use chrono::DateTime;

use crate::auth::AuthenticatedUser;
use crate::domain::service::Service;
use crate::domain::types::{
    CategoryId, CityName, ImageUrl, ServiceDescription, ServiceId, ServiceName, StateName,
    VendorDescription, VendorId, VendorName, VendorSlug,
};
use crate::domain::vendor::{Vendor, VendorListing};

pub fn sample_user(sub: &str, roles: &[&str]) -> AuthenticatedUser {
    AuthenticatedUser {
        sub: sub.into(),
        email: format!("{sub}@example.com"),
        name: format!("User {sub}"),
        roles: roles.iter().map(|r| r.to_string()).collect(),
        exp: 0,
    }
}

pub fn sample_vendor(id: &str, name: &str) -> Vendor {
    let timestamp = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
    Vendor {
        id: VendorId::new(id).unwrap(),
        name: VendorName::new(name).unwrap(),
        slug: VendorSlug::new(id.to_lowercase()).unwrap(),
        tagline: None,
        description: VendorDescription::new("Music for every party").unwrap(),
        state: StateName::new("Texas").unwrap(),
        city: CityName::new("Austin").unwrap(),
        category_ids: vec![CategoryId::new("djs").unwrap()],
        profile_image: ImageUrl::new("/uploads/profile.jpg").unwrap(),
        banner_image: None,
        rating: None,
        reviews_count: None,
        contact_email: None,
        phone_number: None,
        website: None,
        created_at: timestamp,
        updated_at: timestamp,
    }
}

pub fn sample_service(id: i32, vendor_id: &str) -> Service {
    let timestamp = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
    Service {
        id: ServiceId::new(id).unwrap(),
        vendor_id: VendorId::new(vendor_id).unwrap(),
        name: ServiceName::new(format!("Service {id}")).unwrap(),
        description: ServiceDescription::new("Six hours of music").unwrap(),
        category_id: CategoryId::new("djs").unwrap(),
        photos: vec![ImageUrl::new("/uploads/photo.jpg").unwrap()],
        price_range: None,
        created_at: timestamp,
        updated_at: timestamp,
    }
}

pub fn sample_listing(vendor: Vendor, services: Vec<Service>) -> VendorListing {
    VendorListing { vendor, services }
}
