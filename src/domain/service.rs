use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CategoryId, ImageUrl, PriceRange, ServiceDescription, ServiceId, ServiceName,
    TypeConstraintError, VendorId,
};

/// Upper bound on photos attached to one service.
pub const MAX_SERVICE_PHOTOS: usize = 5;

/// An offering listed by exactly one vendor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Service {
    pub id: ServiceId,
    pub vendor_id: VendorId,
    pub name: ServiceName,
    pub description: ServiceDescription,
    pub category_id: CategoryId,
    pub photos: Vec<ImageUrl>,
    pub price_range: Option<PriceRange>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Information required to create a new [`Service`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewService {
    pub vendor_id: VendorId,
    pub name: ServiceName,
    pub description: ServiceDescription,
    pub category_id: CategoryId,
    pub photos: Vec<ImageUrl>,
    pub price_range: Option<PriceRange>,
}

impl NewService {
    /// Builds a service, enforcing `1..=MAX_SERVICE_PHOTOS` photos.
    pub fn new(
        vendor_id: VendorId,
        name: ServiceName,
        description: ServiceDescription,
        category_id: CategoryId,
        photos: Vec<ImageUrl>,
        price_range: Option<PriceRange>,
    ) -> Result<Self, TypeConstraintError> {
        check_photo_count(photos.len())?;
        Ok(Self {
            vendor_id,
            name,
            description,
            category_id,
            photos,
            price_range,
        })
    }
}

/// Editable text fields of an existing service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceUpdate {
    pub name: ServiceName,
    pub description: ServiceDescription,
    pub category_id: CategoryId,
    pub price_range: Option<PriceRange>,
}

pub fn check_photo_count(count: usize) -> Result<(), TypeConstraintError> {
    if count == 0 {
        return Err(TypeConstraintError::InvalidValue(
            "at least one photo is required".to_string(),
        ));
    }
    if count > MAX_SERVICE_PHOTOS {
        return Err(TypeConstraintError::InvalidValue(format!(
            "at most {MAX_SERVICE_PHOTOS} photos are allowed"
        )));
    }
    Ok(())
}
