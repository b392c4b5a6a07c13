use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::event::NewEvent;
use crate::domain::types::{EventName, TypeConstraintError, UserId};

#[derive(Deserialize, Validate)]
pub struct AddEventForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// HTML date input value, `YYYY-MM-DD`.
    #[validate(length(min = 1))]
    pub date: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddEventFormPayload {
    pub name: EventName,
    pub date: NaiveDate,
}

impl AddEventFormPayload {
    pub fn into_new_event(self, client_id: UserId) -> NewEvent {
        NewEvent {
            client_id,
            name: self.name,
            date: self.date,
        }
    }
}

#[derive(Debug, Error)]
pub enum AddEventFormError {
    #[error("Add event form validation failed: {0}")]
    Validation(String),
    #[error("Add event form contains invalid data: {0}")]
    TypeConstraint(String),
    #[error("Event date must look like 2025-06-30")]
    InvalidDate,
}

impl From<ValidationErrors> for AddEventFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for AddEventFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<AddEventForm> for AddEventFormPayload {
    type Error = AddEventFormError;

    fn try_from(value: AddEventForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let date = NaiveDate::parse_from_str(value.date.trim(), "%Y-%m-%d")
            .map_err(|_| AddEventFormError::InvalidDate)?;

        Ok(Self {
            name: EventName::new(value.name)?,
            date,
        })
    }
}
