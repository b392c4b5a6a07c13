use crate::auth::AuthenticatedUser;
use crate::domain::category::CategoryRegistry;
use crate::domain::service::{NewService, Service, check_photo_count};
use crate::domain::types::{CategoryId, ServiceId};
use crate::domain::vendor::Vendor;
use crate::forms::services::{AddServiceFormPayload, UpdateServiceFormPayload};
use crate::repository::{ServiceReader, ServiceWriter, VendorReader};
use crate::storage::{ObjectStore, discard, store_all};

use super::vendors::vendor_identity;
use super::{ServiceError, ServiceResult};

fn ensure_known_category(registry: &CategoryRegistry, id: &CategoryId) -> ServiceResult<()> {
    if registry.contains(id) {
        Ok(())
    } else {
        Err(ServiceError::Form(format!("Unknown category: {id}")))
    }
}

/// The signed-in vendor's profile and services.
pub fn show_vendor_services<R>(
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<(Option<Vendor>, Vec<Service>)>
where
    R: VendorReader + ServiceReader,
{
    let vendor_id = vendor_identity(user)?;

    let vendor = repo.get_vendor_by_id(&vendor_id).map_err(|e| {
        log::error!("Failed to get vendor: {e}");
        ServiceError::Internal
    })?;

    let services = repo.list_services(&vendor_id).map_err(|e| {
        log::error!("Failed to list services: {e}");
        ServiceError::Internal
    })?;

    Ok((vendor, services))
}

/// Uploads the photos and stores a new service for the signed-in vendor.
///
/// Photos are stored all or nothing and removed again when the service
/// cannot be created.
pub fn add_service<R, S>(
    payload: AddServiceFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
    store: &S,
    registry: &CategoryRegistry,
) -> ServiceResult<bool>
where
    R: VendorReader + ServiceWriter,
    S: ObjectStore + ?Sized,
{
    let vendor_id = vendor_identity(user)?;
    ensure_known_category(registry, &payload.category_id)?;

    match repo.get_vendor_by_id(&vendor_id) {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Err(ServiceError::Form(
                "Set up your vendor profile before adding services.".to_string(),
            ));
        }
        Err(e) => {
            log::error!("Failed to get vendor: {e}");
            return Err(ServiceError::Internal);
        }
    }

    check_photo_count(payload.photos.len())?;
    let uploads: Vec<_> = payload.photos.iter().collect();
    let photos = store_all(store, vendor_id.as_str(), &uploads)?;

    let service = match NewService::new(
        vendor_id,
        payload.name,
        payload.description,
        payload.category_id,
        photos.clone(),
        payload.price_range,
    ) {
        Ok(service) => service,
        Err(e) => {
            discard(store, &photos);
            return Err(e.into());
        }
    };

    match repo.create_service(&service) {
        Ok(service) => {
            log::info!("Vendor {} added service {}", service.vendor_id, service.id);
            Ok(true)
        }
        Err(e) => {
            log::error!("Failed to create service: {e}");
            discard(store, &photos);
            Ok(false)
        }
    }
}

/// Edits the text fields of a service owned by the signed-in vendor.
pub fn update_service<R>(
    service_id: i32,
    payload: UpdateServiceFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
    registry: &CategoryRegistry,
) -> ServiceResult<bool>
where
    R: ServiceWriter,
{
    let vendor_id = vendor_identity(user)?;
    let service_id = ServiceId::new(service_id).map_err(|_| ServiceError::NotFound)?;
    ensure_known_category(registry, &payload.category_id)?;

    match repo.update_service(service_id, &vendor_id, &payload.into_update()) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => Ok(true),
        Err(e) => {
            log::error!("Failed to update service: {e}");
            Ok(false)
        }
    }
}

/// Deletes a service owned by the signed-in vendor.
pub fn delete_service<R>(service_id: i32, user: &AuthenticatedUser, repo: &R) -> ServiceResult<bool>
where
    R: ServiceWriter,
{
    let vendor_id = vendor_identity(user)?;
    let service_id = ServiceId::new(service_id).map_err(|_| ServiceError::NotFound)?;

    match repo.delete_service(service_id, &vendor_id) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => Ok(true),
        Err(e) => {
            log::error!("Failed to delete service: {e}");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VENDOR_ROLE;
    use crate::domain::types::{ServiceDescription, ServiceName};
    use crate::repository::test::TestRepository;
    use crate::services::fixtures::{sample_listing, sample_service, sample_user, sample_vendor};
    use crate::storage::LocalObjectStore;
    use crate::storage::test::{TestObjectStore, count_files, sample_upload};

    fn sample_repo() -> TestRepository {
        TestRepository::new(vec![
            sample_listing(sample_vendor("v1", "Spin Doctors"), vec![sample_service(1, "v1")]),
            sample_listing(sample_vendor("v2", "Other"), vec![sample_service(2, "v2")]),
        ])
    }

    fn sample_payload(category: &str, photos: usize) -> AddServiceFormPayload {
        AddServiceFormPayload {
            name: ServiceName::new("Wedding DJ").unwrap(),
            description: ServiceDescription::new("Six hours").unwrap(),
            category_id: CategoryId::new(category).unwrap(),
            price_range: None,
            photos: (0..photos)
                .map(|i| sample_upload(&format!("p{i}.jpg"), b"jpeg"))
                .collect(),
        }
    }

    fn update_payload() -> UpdateServiceFormPayload {
        UpdateServiceFormPayload {
            name: ServiceName::new("Renamed").unwrap(),
            description: ServiceDescription::new("Eight hours").unwrap(),
            category_id: CategoryId::new("djs").unwrap(),
            price_range: None,
        }
    }

    #[test]
    fn adds_service_with_photos() {
        let repo = sample_repo();
        let user = sample_user("v1", &[VENDOR_ROLE]);

        let added = add_service(
            sample_payload("djs", 2),
            &user,
            &repo,
            &TestObjectStore,
            &CategoryRegistry::default(),
        );
        assert_eq!(added, Ok(true));
    }

    #[test]
    fn rejected_photo_stores_none_of_the_others() {
        let root = tempfile::tempdir().unwrap();
        let store = LocalObjectStore::new(root.path(), "/uploads");
        let repo = sample_repo();
        let user = sample_user("v1", &[VENDOR_ROLE]);

        let mut payload = sample_payload("djs", 2);
        payload.photos.push(sample_upload("p2.bmp", b"bmp"));

        let result = add_service(payload, &user, &repo, &store, &CategoryRegistry::default());
        assert!(matches!(result, Err(ServiceError::Form(_))));
        assert_eq!(count_files(root.path()), 0);
    }

    #[test]
    fn failed_create_removes_photos() {
        let root = tempfile::tempdir().unwrap();
        let store = LocalObjectStore::new(root.path(), "/uploads");
        let repo = sample_repo().with_failing_writes();
        let user = sample_user("v1", &[VENDOR_ROLE]);

        let result = add_service(
            sample_payload("djs", 3),
            &user,
            &repo,
            &store,
            &CategoryRegistry::default(),
        );
        assert_eq!(result, Ok(false));
        assert_eq!(count_files(root.path()), 0);
    }

    #[test]
    fn rejects_too_many_photos() {
        let repo = sample_repo();
        let user = sample_user("v1", &[VENDOR_ROLE]);

        let result = add_service(
            sample_payload("djs", 6),
            &user,
            &repo,
            &TestObjectStore,
            &CategoryRegistry::default(),
        );
        assert!(matches!(result, Err(ServiceError::TypeConstraint(_))));
    }

    #[test]
    fn requires_vendor_profile_and_known_category() {
        let repo = sample_repo();
        let registry = CategoryRegistry::default();

        let newcomer = sample_user("v9", &[VENDOR_ROLE]);
        let result = add_service(
            sample_payload("djs", 1),
            &newcomer,
            &repo,
            &TestObjectStore,
            &registry,
        );
        assert!(matches!(result, Err(ServiceError::Form(_))));

        let user = sample_user("v1", &[VENDOR_ROLE]);
        let result = add_service(
            sample_payload("astronauts", 1),
            &user,
            &repo,
            &TestObjectStore,
            &registry,
        );
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn cannot_touch_other_vendors_services() {
        let repo = sample_repo();
        let user = sample_user("v1", &[VENDOR_ROLE]);
        let registry = CategoryRegistry::default();

        assert_eq!(
            update_service(2, update_payload(), &user, &repo, &registry),
            Err(ServiceError::NotFound)
        );
        assert_eq!(
            delete_service(2, &user, &repo),
            Err(ServiceError::NotFound)
        );
        assert_eq!(
            update_service(1, update_payload(), &user, &repo, &registry),
            Ok(true)
        );
        assert_eq!(delete_service(1, &user, &repo), Ok(true));
    }
}
