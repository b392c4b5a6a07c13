use crate::db::{DbConnection, DbPool};
use crate::domain::event::{Event, NewEvent};
use crate::domain::favorites::FavoriteRef;
use crate::domain::message::{Message, NewMessage, ThreadSummary};
use crate::domain::service::{NewService, Service, ServiceUpdate};
use crate::domain::types::{EventId, ServiceId, UserId, VendorId, VendorSlug};
use crate::domain::vendor::{Vendor, VendorListing, VendorProfile};

pub mod errors;
pub mod event;
pub mod favorite;
pub mod message;
pub mod service;
pub mod vendor;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Location filter used to narrow vendor search candidates.
///
/// Matching is case-insensitive; empty fields do not constrain the query.
#[derive(Debug, Clone, Default)]
pub struct VendorSearchQuery {
    pub state: Option<String>,
    pub city: Option<String>,
}

impl VendorSearchQuery {
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }
}

/// Read-only operations for vendor entities.
pub trait VendorReader {
    /// Retrieve a vendor by its identifier.
    fn get_vendor_by_id(&self, id: &VendorId) -> RepositoryResult<Option<Vendor>>;
    /// Retrieve a vendor and its services by slug.
    fn get_vendor_by_slug(&self, slug: &VendorSlug) -> RepositoryResult<Option<VendorListing>>;
    /// Retrieve every vendor whose id is in `ids`. Missing ids are skipped.
    fn get_vendors_by_ids(&self, ids: &[VendorId]) -> RepositoryResult<Vec<Vendor>>;
    /// Load vendors with their services for in-process search filtering.
    fn list_search_candidates(&self, query: VendorSearchQuery)
    -> RepositoryResult<Vec<VendorListing>>;
}

/// Write operations for vendor entities.
pub trait VendorWriter {
    /// Create or update the vendor profile, deriving a unique slug from the
    /// name. Returns the stored vendor.
    fn save_vendor_profile(&self, profile: &VendorProfile) -> RepositoryResult<Vendor>;
}

/// Read-only operations for vendor services.
pub trait ServiceReader {
    /// List the services of a vendor in creation order.
    fn list_services(&self, vendor_id: &VendorId) -> RepositoryResult<Vec<Service>>;
    /// Retrieve a service by its identifier.
    fn get_service_by_id(&self, id: ServiceId) -> RepositoryResult<Option<Service>>;
    /// Retrieve every service whose id is in `ids`. Missing ids are skipped.
    fn get_services_by_ids(&self, ids: &[ServiceId]) -> RepositoryResult<Vec<Service>>;
}

/// Write operations for vendor services.
pub trait ServiceWriter {
    /// Persist a new service with its photos.
    fn create_service(&self, service: &NewService) -> RepositoryResult<Service>;
    /// Update the text fields of a service owned by `vendor_id`.
    fn update_service(
        &self,
        id: ServiceId,
        vendor_id: &VendorId,
        update: &ServiceUpdate,
    ) -> RepositoryResult<usize>;
    /// Delete a service owned by `vendor_id`.
    fn delete_service(&self, id: ServiceId, vendor_id: &VendorId) -> RepositoryResult<usize>;
}

/// Read-only operations for a client's global favorites.
pub trait FavoriteReader {
    /// Raw favorite references saved by the client.
    fn list_client_favorites(&self, client_id: &UserId) -> RepositoryResult<Vec<String>>;
}

/// Set-like writes on a client's global favorites.
pub trait FavoriteWriter {
    /// Add a reference. Adding an existing reference changes nothing.
    fn add_client_favorite(
        &self,
        client_id: &UserId,
        reference: &FavoriteRef,
    ) -> RepositoryResult<usize>;
    /// Remove a reference. Removing an absent reference changes nothing.
    fn remove_client_favorite(&self, client_id: &UserId, reference: &str)
    -> RepositoryResult<usize>;
}

/// Read-only operations for client events.
pub trait EventReader {
    /// List the client's events ordered by date.
    fn list_events(&self, client_id: &UserId) -> RepositoryResult<Vec<Event>>;
    /// Retrieve an event owned by `client_id`.
    fn get_event_by_id(&self, id: EventId, client_id: &UserId) -> RepositoryResult<Option<Event>>;
}

/// Write operations for client events and their favorites.
pub trait EventWriter {
    /// Persist a new event.
    fn create_event(&self, event: &NewEvent) -> RepositoryResult<Event>;
    /// Delete an event owned by `client_id` together with its favorites.
    fn delete_event(&self, id: EventId, client_id: &UserId) -> RepositoryResult<usize>;
    /// Add a reference to an event. Adding an existing reference changes nothing.
    fn add_event_favorite(&self, id: EventId, reference: &FavoriteRef) -> RepositoryResult<usize>;
    /// Remove a reference from an event. Removing an absent reference changes nothing.
    fn remove_event_favorite(&self, id: EventId, reference: &str) -> RepositoryResult<usize>;
}

/// Read-only operations for client/vendor messages.
pub trait MessageReader {
    /// Threads the client takes part in, most recent first.
    fn list_client_threads(&self, client_id: &UserId) -> RepositoryResult<Vec<ThreadSummary>>;
    /// Threads addressed to the vendor, most recent first.
    fn list_vendor_threads(&self, vendor_id: &VendorId) -> RepositoryResult<Vec<ThreadSummary>>;
    /// All messages between a client and a vendor, oldest first.
    fn list_thread(&self, client_id: &UserId, vendor_id: &VendorId)
    -> RepositoryResult<Vec<Message>>;
}

/// Write operations for messages.
pub trait MessageWriter {
    /// Append a message to a thread.
    fn create_message(&self, message: &NewMessage) -> RepositoryResult<Message>;
}
