use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::favorites::FavoriteRef;
use crate::domain::types::TypeConstraintError;

#[derive(Deserialize, Validate)]
pub struct AddFavoriteForm {
    #[validate(length(min = 1, max = 256))]
    pub reference: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddFavoriteFormPayload {
    pub reference: FavoriteRef,
}

#[derive(Debug, Error)]
pub enum AddFavoriteFormError {
    #[error("Add favorite form validation failed: {0}")]
    Validation(String),
    #[error("Add favorite form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for AddFavoriteFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for AddFavoriteFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<AddFavoriteForm> for AddFavoriteFormPayload {
    type Error = AddFavoriteFormError;

    fn try_from(value: AddFavoriteForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            reference: FavoriteRef::parse(&value.reference)?,
        })
    }
}

/// Removal takes the raw stored reference so that entries which no longer
/// parse can still be cleared.
#[derive(Deserialize, Validate)]
pub struct RemoveFavoriteForm {
    #[validate(length(min = 1, max = 256))]
    pub reference: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RemoveFavoriteFormPayload {
    pub reference: String,
}

#[derive(Debug, Error)]
pub enum RemoveFavoriteFormError {
    #[error("Remove favorite form validation failed: {0}")]
    Validation(String),
}

impl From<ValidationErrors> for RemoveFavoriteFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl TryFrom<RemoveFavoriteForm> for RemoveFavoriteFormPayload {
    type Error = RemoveFavoriteFormError;

    fn try_from(value: RemoveFavoriteForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            reference: value.reference.trim().to_string(),
        })
    }
}
