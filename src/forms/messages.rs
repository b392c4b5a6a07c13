use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{MessageBody, TypeConstraintError};

#[derive(Deserialize, Validate)]
pub struct SendMessageForm {
    #[validate(length(min = 1, max = 5000))]
    pub body: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SendMessageFormPayload {
    pub body: MessageBody,
}

#[derive(Debug, Error)]
pub enum SendMessageFormError {
    #[error("Message validation failed: {0}")]
    Validation(String),
    #[error("Message contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for SendMessageFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for SendMessageFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<SendMessageForm> for SendMessageFormPayload {
    type Error = SendMessageFormError;

    fn try_from(value: SendMessageForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            body: MessageBody::new(value.body)?,
        })
    }
}
