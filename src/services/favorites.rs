use std::collections::{BTreeSet, HashMap};

use crate::CLIENT_ROLE;
use crate::auth::AuthenticatedUser;
use crate::domain::favorites::{FavoriteGroup, FavoriteRef, group_favorites, parse_references};
use crate::domain::types::{ServiceId, UserId, VendorId};
use crate::forms::favorites::{AddFavoriteFormPayload, RemoveFavoriteFormPayload};
use crate::repository::{FavoriteReader, FavoriteWriter, ServiceReader, VendorReader};

use super::{ServiceError, ServiceResult};

/// Client identity of a user holding the client role.
pub(crate) fn client_identity(user: &AuthenticatedUser) -> ServiceResult<UserId> {
    if !user.has_role(CLIENT_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    user.user_id().map_err(|e| {
        log::error!("Invalid user id in session: {e}");
        ServiceError::Internal
    })
}

/// Resolves raw references into vendor groups.
///
/// Vendors and services are fetched with one batched lookup each. Malformed
/// references, missing records and services that do not belong to the
/// referenced vendor are dropped silently.
pub fn resolve_favorites<R>(raw: &[String], repo: &R) -> ServiceResult<Vec<FavoriteGroup>>
where
    R: VendorReader + ServiceReader,
{
    let refs = parse_references(raw);
    if refs.is_empty() {
        return Ok(vec![]);
    }

    let vendor_ids: Vec<VendorId> = refs
        .iter()
        .map(|r| r.vendor_id.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let service_ids: Vec<ServiceId> = refs
        .iter()
        .map(|r| r.service_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let vendors = repo.get_vendors_by_ids(&vendor_ids).map_err(|e| {
        log::error!("Failed to load favorite vendors: {e}");
        ServiceError::Internal
    })?;
    let services = repo.get_services_by_ids(&service_ids).map_err(|e| {
        log::error!("Failed to load favorite services: {e}");
        ServiceError::Internal
    })?;

    let vendors: HashMap<VendorId, _> = vendors.into_iter().map(|v| (v.id.clone(), v)).collect();
    let services: HashMap<ServiceId, _> = services.into_iter().map(|s| (s.id, s)).collect();

    Ok(group_favorites(&refs, &vendors, &services))
}

/// Fails with `NotFound` unless the reference points at an existing service
/// owned by the referenced vendor.
pub(crate) fn ensure_resolvable<R>(reference: &FavoriteRef, repo: &R) -> ServiceResult<()>
where
    R: ServiceReader,
{
    match repo.get_service_by_id(reference.service_id) {
        Ok(Some(service)) if service.vendor_id == reference.vendor_id => Ok(()),
        Ok(_) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get service: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// The signed-in client's favorites grouped by vendor.
pub fn show_favorites<R>(user: &AuthenticatedUser, repo: &R) -> ServiceResult<Vec<FavoriteGroup>>
where
    R: FavoriteReader + VendorReader + ServiceReader,
{
    let client_id = client_identity(user)?;

    let raw = repo.list_client_favorites(&client_id).map_err(|e| {
        log::error!("Failed to list favorites: {e}");
        ServiceError::Internal
    })?;

    resolve_favorites(&raw, repo)
}

/// Adds a reference to the client's favorites. Adding twice is a no-op.
pub fn add_favorite<R>(
    payload: AddFavoriteFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<bool>
where
    R: ServiceReader + FavoriteWriter,
{
    let client_id = client_identity(user)?;
    ensure_resolvable(&payload.reference, repo)?;

    match repo.add_client_favorite(&client_id, &payload.reference) {
        Ok(_) => Ok(true),
        Err(e) => {
            log::error!("Failed to add favorite: {e}");
            Ok(false)
        }
    }
}

/// Removes a reference from the client's favorites. Removing an absent
/// reference succeeds.
pub fn remove_favorite<R>(
    payload: RemoveFavoriteFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<bool>
where
    R: FavoriteWriter,
{
    let client_id = client_identity(user)?;

    match repo.remove_client_favorite(&client_id, &payload.reference) {
        Ok(_) => Ok(true),
        Err(e) => {
            log::error!("Failed to remove favorite: {e}");
            Ok(false)
        }
    }
}
