use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::event::{Event as DomainEvent, NewEvent as DomainNewEvent};
use crate::domain::types::{EventName, TypeConstraintError, UserId};

/// Diesel model representing the `events` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::events)]
pub struct Event {
    pub id: i32,
    pub client_id: String,
    pub name: String,
    pub date: NaiveDate,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`Event`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::events)]
pub struct NewEvent {
    pub client_id: String,
    pub name: String,
    pub date: NaiveDate,
    pub created_at: NaiveDateTime,
}

impl Event {
    pub fn into_domain(self, favorites: Vec<String>) -> Result<DomainEvent, TypeConstraintError> {
        Ok(DomainEvent {
            id: self.id.try_into()?,
            client_id: UserId::new(self.client_id)?,
            name: EventName::new(self.name)?,
            date: self.date,
            favorites,
            created_at: self.created_at,
        })
    }
}

impl From<DomainNewEvent> for NewEvent {
    fn from(event: DomainNewEvent) -> Self {
        Self {
            client_id: event.client_id.into_inner(),
            name: event.name.into_inner(),
            date: event.date,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

/// Diesel model representing the `event_favorites` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::event_favorites)]
pub struct EventFavorite {
    pub event_id: i32,
    pub reference: String,
    pub created_at: NaiveDateTime,
}
