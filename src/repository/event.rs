use std::collections::HashMap;

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::event::{Event, NewEvent};
use crate::domain::favorites::FavoriteRef;
use crate::domain::types::{EventId, UserId};
use crate::models::event::{Event as DbEvent, EventFavorite, NewEvent as DbNewEvent};
use crate::repository::{
    DieselRepository, EventReader, EventWriter, RepositoryError, RepositoryResult,
};

fn hydrate_events(
    conn: &mut SqliteConnection,
    rows: Vec<DbEvent>,
) -> RepositoryResult<Vec<Event>> {
    use crate::schema::event_favorites;

    let ids: Vec<i32> = rows.iter().map(|e| e.id).collect();
    let favorites = event_favorites::table
        .filter(event_favorites::event_id.eq_any(ids))
        .order((
            event_favorites::event_id.asc(),
            event_favorites::created_at.asc(),
            event_favorites::reference.asc(),
        ))
        .select(EventFavorite::as_select())
        .load::<EventFavorite>(conn)?;

    let mut by_event: HashMap<i32, Vec<String>> = HashMap::new();
    for favorite in favorites {
        by_event
            .entry(favorite.event_id)
            .or_default()
            .push(favorite.reference);
    }

    rows.into_iter()
        .map(|row| -> RepositoryResult<Event> {
            let favorites = by_event.remove(&row.id).unwrap_or_default();
            Ok(row.into_domain(favorites)?)
        })
        .collect()
}

impl EventReader for DieselRepository {
    fn list_events(&self, client_id: &UserId) -> RepositoryResult<Vec<Event>> {
        use crate::schema::events;

        let mut conn = self.conn()?;

        let rows = events::table
            .filter(events::client_id.eq(client_id.as_str()))
            .order((events::date.asc(), events::id.asc()))
            .select(DbEvent::as_select())
            .load::<DbEvent>(&mut conn)?;

        hydrate_events(&mut conn, rows)
    }

    fn get_event_by_id(&self, id: EventId, client_id: &UserId) -> RepositoryResult<Option<Event>> {
        use crate::schema::events;

        let mut conn = self.conn()?;

        let row = events::table
            .filter(events::id.eq(id.get()))
            .filter(events::client_id.eq(client_id.as_str()))
            .select(DbEvent::as_select())
            .first::<DbEvent>(&mut conn)
            .optional()?;

        match row {
            Some(row) => Ok(hydrate_events(&mut conn, vec![row])?.pop()),
            None => Ok(None),
        }
    }
}

impl EventWriter for DieselRepository {
    fn create_event(&self, event: &NewEvent) -> RepositoryResult<Event> {
        use crate::schema::events;

        let mut conn = self.conn()?;

        let row = diesel::insert_into(events::table)
            .values(DbNewEvent::from(event.clone()))
            .returning(DbEvent::as_returning())
            .get_result::<DbEvent>(&mut conn)?;

        Ok(row.into_domain(vec![])?)
    }

    fn delete_event(&self, id: EventId, client_id: &UserId) -> RepositoryResult<usize> {
        use crate::schema::{event_favorites, events};

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let owned = events::table
                .filter(events::id.eq(id.get()))
                .filter(events::client_id.eq(client_id.as_str()))
                .select(events::id)
                .first::<i32>(conn)
                .optional()?;

            let Some(event_id) = owned else {
                return Ok(0);
            };

            diesel::delete(event_favorites::table.filter(event_favorites::event_id.eq(event_id)))
                .execute(conn)?;
            Ok(diesel::delete(events::table.find(event_id)).execute(conn)?)
        })
    }

    fn add_event_favorite(&self, id: EventId, reference: &FavoriteRef) -> RepositoryResult<usize> {
        use crate::schema::event_favorites;

        let mut conn = self.conn()?;

        let affected = diesel::insert_or_ignore_into(event_favorites::table)
            .values((
                event_favorites::event_id.eq(id.get()),
                event_favorites::reference.eq(reference.to_string()),
                event_favorites::created_at.eq(Utc::now().naive_utc()),
            ))
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn remove_event_favorite(&self, id: EventId, reference: &str) -> RepositoryResult<usize> {
        use crate::schema::event_favorites;

        let mut conn = self.conn()?;

        let affected = diesel::delete(
            event_favorites::table
                .filter(event_favorites::event_id.eq(id.get()))
                .filter(event_favorites::reference.eq(reference)),
        )
        .execute(&mut conn)?;

        Ok(affected)
    }
}
