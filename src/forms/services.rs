use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::service::{ServiceUpdate, check_photo_count};
use crate::domain::types::{
    CategoryId, PriceRange, ServiceDescription, ServiceName, TypeConstraintError,
};
use crate::forms::non_blank;
use crate::storage::has_content;

/// New service form with its photos, submitted as `multipart/form-data`.
#[derive(MultipartForm)]
pub struct AddServiceForm {
    pub name: Text<String>,
    pub description: Text<String>,
    pub category: Text<String>,
    pub price_range: Option<Text<String>>,
    #[multipart(limit = "10MB")]
    pub photos: Vec<TempFile>,
}

pub struct AddServiceFormPayload {
    pub name: ServiceName,
    pub description: ServiceDescription,
    pub category_id: CategoryId,
    pub price_range: Option<PriceRange>,
    pub photos: Vec<TempFile>,
}

#[derive(Debug, Error)]
pub enum AddServiceFormError {
    #[error("Add service form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<TypeConstraintError> for AddServiceFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<AddServiceForm> for AddServiceFormPayload {
    type Error = AddServiceFormError;

    fn try_from(value: AddServiceForm) -> Result<Self, Self::Error> {
        let photos: Vec<TempFile> = value.photos.into_iter().filter(has_content).collect();
        check_photo_count(photos.len())?;

        Ok(Self {
            name: ServiceName::new(value.name.into_inner())?,
            description: ServiceDescription::new(value.description.into_inner())?,
            category_id: CategoryId::new(value.category.into_inner())?,
            price_range: non_blank(value.price_range.map(Text::into_inner))
                .map(PriceRange::new)
                .transpose()?,
            photos,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct UpdateServiceForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 5000))]
    pub description: String,
    #[validate(length(min = 1))]
    pub category: String,
    pub price_range: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateServiceFormPayload {
    pub name: ServiceName,
    pub description: ServiceDescription,
    pub category_id: CategoryId,
    pub price_range: Option<PriceRange>,
}

impl UpdateServiceFormPayload {
    pub fn into_update(self) -> ServiceUpdate {
        ServiceUpdate {
            name: self.name,
            description: self.description,
            category_id: self.category_id,
            price_range: self.price_range,
        }
    }
}

#[derive(Debug, Error)]
pub enum UpdateServiceFormError {
    #[error("Update service form validation failed: {0}")]
    Validation(String),
    #[error("Update service form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for UpdateServiceFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for UpdateServiceFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<UpdateServiceForm> for UpdateServiceFormPayload {
    type Error = UpdateServiceFormError;

    fn try_from(value: UpdateServiceForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            name: ServiceName::new(value.name)?,
            description: ServiceDescription::new(value.description)?,
            category_id: CategoryId::new(value.category)?,
            price_range: non_blank(value.price_range)
                .map(PriceRange::new)
                .transpose()?,
        })
    }
}
