use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::message::{Message as DomainMessage, NewMessage as DomainNewMessage};
use crate::domain::types::{MessageBody, MessageSender, TypeConstraintError, UserId, VendorId};

/// Diesel model representing the `messages` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::messages)]
pub struct Message {
    pub id: i32,
    pub client_id: String,
    pub client_name: String,
    pub vendor_id: String,
    pub sender: String,
    pub body: String,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`Message`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::messages)]
pub struct NewMessage {
    pub client_id: String,
    pub client_name: String,
    pub vendor_id: String,
    pub sender: String,
    pub body: String,
    pub created_at: NaiveDateTime,
}

impl TryFrom<Message> for DomainMessage {
    type Error = TypeConstraintError;

    fn try_from(message: Message) -> Result<Self, Self::Error> {
        Ok(Self {
            id: message.id.try_into()?,
            client_id: UserId::new(message.client_id)?,
            client_name: message.client_name,
            vendor_id: VendorId::new(message.vendor_id)?,
            sender: MessageSender::try_from(message.sender)?,
            body: MessageBody::new(message.body)?,
            created_at: message.created_at,
        })
    }
}

impl From<DomainNewMessage> for NewMessage {
    fn from(message: DomainNewMessage) -> Self {
        Self {
            client_id: message.client_id.into_inner(),
            client_name: message.client_name,
            vendor_id: message.vendor_id.into_inner(),
            sender: message.sender.as_str().to_string(),
            body: message.body.into_inner(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
