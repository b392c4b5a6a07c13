//! Conversions from lower-level errors into [`ServiceError`].
//!
//! Kept out of the domain and forms modules so those stay free of
//! service-layer types.

use crate::domain::types::TypeConstraintError;
use crate::forms::contracts::DraftContractFormError;
use crate::forms::events::AddEventFormError;
use crate::forms::favorites::{AddFavoriteFormError, RemoveFavoriteFormError};
use crate::forms::messages::SendMessageFormError;
use crate::forms::services::{AddServiceFormError, UpdateServiceFormError};
use crate::forms::vendors::VendorProfileFormError;
use crate::services::ServiceError;
use crate::storage::StorageError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<StorageError> for ServiceError {
    fn from(val: StorageError) -> Self {
        match val {
            StorageError::UnsupportedType(ext) => {
                ServiceError::Form(format!("Unsupported image type: {ext}"))
            }
            other => {
                log::error!("Failed to store upload: {other}");
                ServiceError::Upload(other.to_string())
            }
        }
    }
}

macro_rules! form_error {
    ($($error:ty),+ $(,)?) => {
        $(
            impl From<$error> for ServiceError {
                fn from(val: $error) -> Self {
                    ServiceError::Form(val.to_string())
                }
            }
        )+
    };
}

form_error!(
    VendorProfileFormError,
    AddServiceFormError,
    UpdateServiceFormError,
    AddFavoriteFormError,
    RemoveFavoriteFormError,
    AddEventFormError,
    SendMessageFormError,
    DraftContractFormError,
);
