use crate::auth::AuthenticatedUser;
use crate::domain::event::Event;
use crate::domain::favorites::FavoriteGroup;
use crate::domain::types::{EventId, UserId};
use crate::forms::events::AddEventFormPayload;
use crate::forms::favorites::{AddFavoriteFormPayload, RemoveFavoriteFormPayload};
use crate::repository::{EventReader, EventWriter, ServiceReader, VendorReader};

use super::favorites::{client_identity, ensure_resolvable, resolve_favorites};
use super::{ServiceError, ServiceResult};

fn owned_event<R>(event_id: i32, client_id: &UserId, repo: &R) -> ServiceResult<Event>
where
    R: EventReader,
{
    let event_id = EventId::new(event_id).map_err(|_| ServiceError::NotFound)?;

    match repo.get_event_by_id(event_id, client_id) {
        Ok(Some(event)) => Ok(event),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get event: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn show_events<R>(user: &AuthenticatedUser, repo: &R) -> ServiceResult<Vec<Event>>
where
    R: EventReader,
{
    let client_id = client_identity(user)?;

    repo.list_events(&client_id).map_err(|e| {
        log::error!("Failed to list events: {e}");
        ServiceError::Internal
    })
}

/// An event with its favorites resolved and grouped by vendor.
pub fn show_event<R>(
    event_id: i32,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<(Event, Vec<FavoriteGroup>)>
where
    R: EventReader + VendorReader + ServiceReader,
{
    let client_id = client_identity(user)?;
    let event = owned_event(event_id, &client_id, repo)?;
    let groups = resolve_favorites(&event.favorites, repo)?;
    Ok((event, groups))
}

pub fn create_event<R>(
    payload: AddEventFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<bool>
where
    R: EventWriter,
{
    let client_id = client_identity(user)?;

    match repo.create_event(&payload.into_new_event(client_id)) {
        Ok(event) => {
            log::info!("Client {} created event {}", event.client_id, event.id);
            Ok(true)
        }
        Err(e) => {
            log::error!("Failed to create event: {e}");
            Ok(false)
        }
    }
}

pub fn delete_event<R>(event_id: i32, user: &AuthenticatedUser, repo: &R) -> ServiceResult<bool>
where
    R: EventWriter,
{
    let client_id = client_identity(user)?;
    let event_id = EventId::new(event_id).map_err(|_| ServiceError::NotFound)?;

    match repo.delete_event(event_id, &client_id) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => Ok(true),
        Err(e) => {
            log::error!("Failed to delete event: {e}");
            Ok(false)
        }
    }
}

/// Adds a reference to one of the client's events. Adding twice is a no-op.
pub fn add_event_favorite<R>(
    event_id: i32,
    payload: AddFavoriteFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<bool>
where
    R: EventReader + EventWriter + ServiceReader,
{
    let client_id = client_identity(user)?;
    let event = owned_event(event_id, &client_id, repo)?;
    ensure_resolvable(&payload.reference, repo)?;

    match repo.add_event_favorite(event.id, &payload.reference) {
        Ok(_) => Ok(true),
        Err(e) => {
            log::error!("Failed to add event favorite: {e}");
            Ok(false)
        }
    }
}

/// Removes a reference from one of the client's events. Removing an absent
/// reference succeeds.
pub fn remove_event_favorite<R>(
    event_id: i32,
    payload: RemoveFavoriteFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<bool>
where
    R: EventReader + EventWriter,
{
    let client_id = client_identity(user)?;
    let event = owned_event(event_id, &client_id, repo)?;

    match repo.remove_event_favorite(event.id, &payload.reference) {
        Ok(_) => Ok(true),
        Err(e) => {
            log::error!("Failed to remove event favorite: {e}");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, NaiveDate};

    use super::*;
    use crate::CLIENT_ROLE;
    use crate::domain::favorites::FavoriteRef;
    use crate::domain::types::EventName;
    use crate::repository::test::TestRepository;
    use crate::services::fixtures::{sample_listing, sample_service, sample_user, sample_vendor};

    fn sample_event(id: i32, client: &str, favorites: &[&str]) -> Event {
        Event {
            id: EventId::new(id).unwrap(),
            client_id: UserId::new(client).unwrap(),
            name: EventName::new("Wedding").unwrap(),
            date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            favorites: favorites.iter().map(|f| f.to_string()).collect(),
            created_at: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
        }
    }

    fn sample_repo() -> TestRepository {
        TestRepository::new(vec![sample_listing(
            sample_vendor("v1", "Spin Doctors"),
            vec![sample_service(1, "v1")],
        )])
        .with_events(vec![
            sample_event(1, "c1", &["v1_1", "v9_9"]),
            sample_event(2, "c2", &[]),
        ])
    }

    #[test]
    fn shows_event_with_resolved_favorites() {
        let repo = sample_repo();
        let user = sample_user("c1", &[CLIENT_ROLE]);

        let (event, groups) = show_event(1, &user, &repo).unwrap();

        assert_eq!(event.id, 1);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].services[0].id, 1);
    }

    #[test]
    fn other_clients_events_are_hidden() {
        let repo = sample_repo();
        let user = sample_user("c1", &[CLIENT_ROLE]);

        assert_eq!(show_event(2, &user, &repo).err(), Some(ServiceError::NotFound));
        assert_eq!(delete_event(2, &user, &repo), Err(ServiceError::NotFound));
        assert_eq!(show_events(&user, &repo).unwrap().len(), 1);
    }

    #[test]
    fn adds_and_removes_event_favorites() {
        let repo = sample_repo();
        let user = sample_user("c1", &[CLIENT_ROLE]);

        let add = AddFavoriteFormPayload {
            reference: FavoriteRef::parse("v1_1").unwrap(),
        };
        assert_eq!(add_event_favorite(1, add, &user, &repo), Ok(true));

        let remove = RemoveFavoriteFormPayload {
            reference: "v1_1".to_string(),
        };
        assert_eq!(remove_event_favorite(1, remove, &user, &repo), Ok(true));

        let foreign = AddFavoriteFormPayload {
            reference: FavoriteRef::parse("v1_1").unwrap(),
        };
        assert_eq!(
            add_event_favorite(2, foreign, &user, &repo),
            Err(ServiceError::NotFound)
        );
    }

    #[test]
    fn creates_event_for_client() {
        let repo = sample_repo();
        let user = sample_user("c1", &[CLIENT_ROLE]);
        let payload = AddEventFormPayload {
            name: EventName::new("Birthday").unwrap(),
            date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
        };

        assert_eq!(create_event(payload, &user, &repo), Ok(true));
    }
}
