use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::service::Service as DomainService;
use crate::domain::types::{
    CategoryId, ImageUrl, PriceRange, ServiceDescription, ServiceName, TypeConstraintError,
    VendorId,
};

/// Diesel model representing the `services` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::services)]
pub struct Service {
    pub id: i32,
    pub vendor_id: String,
    pub name: String,
    pub description: String,
    pub category_id: String,
    pub price_range: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Service`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::services)]
pub struct NewService<'a> {
    pub vendor_id: &'a str,
    pub name: &'a str,
    pub description: &'a str,
    pub category_id: &'a str,
    pub price_range: Option<&'a str>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Text fields a vendor can edit after creation.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::services, treat_none_as_null = true)]
pub struct ServiceChangeset<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub category_id: &'a str,
    pub price_range: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

/// Diesel model representing the `service_photos` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::service_photos)]
pub struct ServicePhoto {
    pub id: i32,
    pub service_id: i32,
    pub position: i32,
    pub url: String,
}

/// Insertable form of [`ServicePhoto`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::service_photos)]
pub struct NewServicePhoto<'a> {
    pub service_id: i32,
    pub position: i32,
    pub url: &'a str,
}

impl Service {
    /// Converts the row into a domain service with photos in display order.
    pub fn into_domain(self, photos: Vec<String>) -> Result<DomainService, TypeConstraintError> {
        Ok(DomainService {
            id: self.id.try_into()?,
            vendor_id: VendorId::new(self.vendor_id)?,
            name: ServiceName::new(self.name)?,
            description: ServiceDescription::new(self.description)?,
            category_id: CategoryId::new(self.category_id)?,
            photos: photos
                .into_iter()
                .map(ImageUrl::new)
                .collect::<Result<_, _>>()?,
            price_range: self.price_range.map(PriceRange::new).transpose()?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
