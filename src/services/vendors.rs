use crate::VENDOR_ROLE;
use crate::auth::AuthenticatedUser;
use crate::domain::category::CategoryRegistry;
use crate::domain::geo;
use crate::domain::types::{CityName, StateName, VendorId};
use crate::domain::vendor::{Vendor, VendorProfile, slugify};
use crate::forms::vendors::VendorProfileFormPayload;
use crate::repository::{VendorReader, VendorWriter};
use crate::storage::{ObjectStore, discard, store_all};

use super::{ServiceError, ServiceResult};

/// Vendor identity of a user holding the vendor role.
pub(crate) fn vendor_identity(user: &AuthenticatedUser) -> ServiceResult<VendorId> {
    if !user.has_role(VENDOR_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    user.vendor_id().map_err(|e| {
        log::error!("User id {} cannot be used as a vendor id: {e}", user.sub);
        ServiceError::TypeConstraint(e.to_string())
    })
}

/// The signed-in vendor's stored profile, if set up.
pub fn show_vendor_profile<R>(user: &AuthenticatedUser, repo: &R) -> ServiceResult<Option<Vendor>>
where
    R: VendorReader,
{
    let vendor_id = vendor_identity(user)?;

    repo.get_vendor_by_id(&vendor_id).map_err(|e| {
        log::error!("Failed to get vendor profile: {e}");
        ServiceError::Internal
    })
}

/// Creates or updates the signed-in vendor's profile.
///
/// Location must be a known state/city pair and is stored in its canonical
/// spelling. Categories must exist in the registry and the name must yield a
/// slug. Images are uploaded only after every check passed and are removed
/// again if the profile cannot be written; a new profile requires a profile
/// image.
pub fn save_vendor_profile<R, S>(
    payload: VendorProfileFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
    store: &S,
    registry: &CategoryRegistry,
) -> ServiceResult<Vendor>
where
    R: VendorReader + VendorWriter,
    S: ObjectStore + ?Sized,
{
    let vendor_id = vendor_identity(user)?;

    let Some((state, city)) = geo::canonical(&payload.state, &payload.city) else {
        return Err(ServiceError::Form(format!(
            "{}, {} is not a supported location.",
            payload.city, payload.state
        )));
    };

    if let Some(unknown) = payload.category_ids.iter().find(|id| !registry.contains(id)) {
        return Err(ServiceError::Form(format!("Unknown category: {unknown}")));
    }

    if slugify(&payload.name).is_err() {
        return Err(ServiceError::Form(
            "The vendor name must contain letters or digits.".to_string(),
        ));
    }

    let existing = repo.get_vendor_by_id(&vendor_id).map_err(|e| {
        log::error!("Failed to get vendor profile: {e}");
        ServiceError::Internal
    })?;

    if existing.is_none() && payload.profile_image.is_none() {
        return Err(ServiceError::Form(
            "A profile image is required.".to_string(),
        ));
    }

    let uploads: Vec<_> = payload
        .profile_image
        .iter()
        .chain(payload.banner_image.iter())
        .collect();
    let stored = store_all(store, vendor_id.as_str(), &uploads)?;

    let mut urls = stored.iter().cloned();
    let profile_image = payload.profile_image.as_ref().and_then(|_| urls.next());
    let banner_image = payload.banner_image.as_ref().and_then(|_| urls.next());

    let (state, city) = match (StateName::new(state), CityName::new(city)) {
        (Ok(state), Ok(city)) => (state, city),
        (Err(e), _) | (_, Err(e)) => {
            discard(store, &stored);
            return Err(e.into());
        }
    };

    let profile = VendorProfile {
        id: vendor_id,
        name: payload.name,
        tagline: payload.tagline,
        description: payload.description,
        state,
        city,
        category_ids: payload.category_ids,
        profile_image,
        banner_image,
        contact_email: payload.contact_email,
        phone_number: payload.phone_number,
        website: payload.website,
    };

    match repo.save_vendor_profile(&profile) {
        Ok(vendor) => {
            log::info!("Saved vendor profile {} as {}", vendor.id, vendor.slug);
            Ok(vendor)
        }
        Err(e) => {
            log::error!("Failed to save vendor profile: {e}");
            discard(store, &stored);
            Err(ServiceError::Internal)
        }
    }
}
