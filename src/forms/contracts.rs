use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::contract::ChatTurn;
use crate::domain::types::{ServiceId, TypeConstraintError};

/// JSON body of one contract assistant turn.
#[derive(Debug, Deserialize, Validate)]
pub struct DraftContractForm {
    #[validate(length(min = 1, max = 4000))]
    pub prompt: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub history: Vec<ChatTurn>,
    /// Services to include as context; empty means all of the vendor's.
    #[serde(default)]
    pub service_ids: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DraftContractFormPayload {
    pub prompt: String,
    pub history: Vec<ChatTurn>,
    pub service_ids: Vec<ServiceId>,
}

#[derive(Debug, Error)]
pub enum DraftContractFormError {
    #[error("Contract request validation failed: {0}")]
    Validation(String),
    #[error("Contract request contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for DraftContractFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for DraftContractFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<DraftContractForm> for DraftContractFormPayload {
    type Error = DraftContractFormError;

    fn try_from(value: DraftContractForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let prompt = value.prompt.trim();
        if prompt.is_empty() {
            return Err(TypeConstraintError::EmptyString("prompt").into());
        }

        Ok(Self {
            prompt: prompt.to_string(),
            history: value.history,
            service_ids: value
                .service_ids
                .into_iter()
                .map(ServiceId::new)
                .collect::<Result<_, _>>()?,
        })
    }
}
