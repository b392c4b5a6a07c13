use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{EventId, EventName, UserId};

/// Client-owned named collection of favorite references.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: EventId,
    pub client_id: UserId,
    pub name: EventName,
    pub date: NaiveDate,
    /// Raw favorite references; may contain entries that no longer resolve.
    pub favorites: Vec<String>,
    pub created_at: NaiveDateTime,
}

/// Information required to create a new [`Event`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewEvent {
    pub client_id: UserId,
    pub name: EventName,
    pub date: NaiveDate,
}
