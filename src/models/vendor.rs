use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::{
    CategoryId, CityName, ContactEmail, ImageUrl, PhoneNumber, Rating, ReviewsCount, StateName,
    Tagline, TypeConstraintError, VendorDescription, VendorId, VendorName, VendorSlug, WebsiteUrl,
};
use crate::domain::vendor::Vendor as DomainVendor;

/// Diesel model representing the `vendors` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::vendors)]
pub struct Vendor {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub tagline: Option<String>,
    pub description: String,
    pub state: String,
    pub city: String,
    pub state_key: String,
    pub city_key: String,
    pub profile_image: String,
    pub banner_image: Option<String>,
    pub rating: Option<f64>,
    pub reviews_count: Option<i32>,
    pub contact_email: Option<String>,
    pub phone_number: Option<String>,
    pub website: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Vendor`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::vendors)]
pub struct NewVendor<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub slug: &'a str,
    pub tagline: Option<&'a str>,
    pub description: &'a str,
    pub state: &'a str,
    pub city: &'a str,
    pub state_key: String,
    pub city_key: String,
    pub profile_image: &'a str,
    pub banner_image: Option<&'a str>,
    pub contact_email: Option<&'a str>,
    pub phone_number: Option<&'a str>,
    pub website: Option<&'a str>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Patch applied when a vendor edits its profile.
///
/// Image columns are only touched when a new upload was supplied; optional
/// text columns are always written so that clearing a field sticks.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::vendors, treat_none_as_null = true)]
pub struct VendorProfileChangeset<'a> {
    pub name: &'a str,
    pub slug: &'a str,
    pub tagline: Option<&'a str>,
    pub description: &'a str,
    pub state: &'a str,
    pub city: &'a str,
    pub state_key: String,
    pub city_key: String,
    pub contact_email: Option<&'a str>,
    pub phone_number: Option<&'a str>,
    pub website: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

/// Lookup key used for case-insensitive location matching.
pub fn location_key(value: &str) -> String {
    value.trim().to_lowercase()
}

impl Vendor {
    /// Converts the row into a domain vendor with its ordered category ids.
    pub fn into_domain(self, category_ids: Vec<String>) -> Result<DomainVendor, TypeConstraintError> {
        Ok(DomainVendor {
            id: VendorId::new(self.id)?,
            name: VendorName::new(self.name)?,
            slug: VendorSlug::new(self.slug)?,
            tagline: self.tagline.map(Tagline::new).transpose()?,
            description: VendorDescription::new(self.description)?,
            state: StateName::new(self.state)?,
            city: CityName::new(self.city)?,
            category_ids: category_ids
                .into_iter()
                .map(CategoryId::new)
                .collect::<Result<_, _>>()?,
            profile_image: ImageUrl::new(self.profile_image)?,
            banner_image: self.banner_image.map(ImageUrl::new).transpose()?,
            rating: self.rating.map(Rating::new).transpose()?,
            reviews_count: self.reviews_count.map(ReviewsCount::new).transpose()?,
            contact_email: self.contact_email.map(ContactEmail::new).transpose()?,
            phone_number: self.phone_number.map(PhoneNumber::new).transpose()?,
            website: self.website.map(WebsiteUrl::new).transpose()?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Diesel model representing the `vendor_categories` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::schema::vendor_categories)]
pub struct VendorCategory {
    pub vendor_id: String,
    pub category_id: String,
    pub position: i32,
}
