use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use thiserror::Error;

use crate::domain::types::{
    CategoryId, CityName, ContactEmail, PhoneNumber, StateName, Tagline, TypeConstraintError,
    VendorDescription, VendorName, WebsiteUrl,
};
use crate::forms::non_blank;
use crate::storage::has_content;

const MAX_NAME_LENGTH: usize = 100;
const MAX_TAGLINE_LENGTH: usize = 160;
const MAX_DESCRIPTION_LENGTH: usize = 5000;

/// Vendor profile form submitted as `multipart/form-data`.
#[derive(MultipartForm)]
pub struct VendorProfileForm {
    pub name: Text<String>,
    pub tagline: Option<Text<String>>,
    pub description: Text<String>,
    pub state: Text<String>,
    pub city: Text<String>,
    pub categories: Vec<Text<String>>,
    pub contact_email: Option<Text<String>>,
    pub phone_number: Option<Text<String>>,
    pub website: Option<Text<String>>,
    #[multipart(limit = "10MB")]
    pub profile_image: Option<TempFile>,
    #[multipart(limit = "10MB")]
    pub banner_image: Option<TempFile>,
}

pub struct VendorProfileFormPayload {
    pub name: VendorName,
    pub tagline: Option<Tagline>,
    pub description: VendorDescription,
    pub state: StateName,
    pub city: CityName,
    pub category_ids: Vec<CategoryId>,
    pub contact_email: Option<ContactEmail>,
    pub phone_number: Option<PhoneNumber>,
    pub website: Option<WebsiteUrl>,
    /// `None` when the file input was left blank.
    pub profile_image: Option<TempFile>,
    pub banner_image: Option<TempFile>,
}

#[derive(Debug, Error)]
pub enum VendorProfileFormError {
    #[error("Vendor profile form validation failed: {0}")]
    Validation(String),
    #[error("Vendor profile form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<TypeConstraintError> for VendorProfileFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

fn text(value: Option<Text<String>>) -> Option<String> {
    non_blank(value.map(Text::into_inner))
}

fn check_length(field: &str, value: &str, max: usize) -> Result<(), VendorProfileFormError> {
    if value.chars().count() > max {
        return Err(VendorProfileFormError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

impl TryFrom<VendorProfileForm> for VendorProfileFormPayload {
    type Error = VendorProfileFormError;

    fn try_from(value: VendorProfileForm) -> Result<Self, Self::Error> {
        check_length("name", &value.name, MAX_NAME_LENGTH)?;
        check_length("description", &value.description, MAX_DESCRIPTION_LENGTH)?;
        let tagline = text(value.tagline);
        if let Some(tagline) = &tagline {
            check_length("tagline", tagline, MAX_TAGLINE_LENGTH)?;
        }

        let mut category_ids: Vec<CategoryId> = Vec::new();
        for raw in value.categories {
            let id = CategoryId::new(raw.into_inner())?;
            if !category_ids.contains(&id) {
                category_ids.push(id);
            }
        }
        if category_ids.is_empty() {
            return Err(VendorProfileFormError::Validation(
                "select at least one category".to_string(),
            ));
        }

        Ok(Self {
            name: VendorName::new(value.name.into_inner())?,
            tagline: tagline.map(Tagline::new).transpose()?,
            description: VendorDescription::new(value.description.into_inner())?,
            state: StateName::new(value.state.into_inner())?,
            city: CityName::new(value.city.into_inner())?,
            category_ids,
            contact_email: text(value.contact_email)
                .map(ContactEmail::new)
                .transpose()?,
            phone_number: text(value.phone_number).map(PhoneNumber::new).transpose()?,
            website: text(value.website).map(WebsiteUrl::new).transpose()?,
            profile_image: value.profile_image.filter(has_content),
            banner_image: value.banner_image.filter(has_content),
        })
    }
}
