use diesel::prelude::*;

use crate::domain::message::{Message, NewMessage, ThreadSummary, summarize_threads};
use crate::domain::types::{UserId, VendorId};
use crate::models::message::{Message as DbMessage, NewMessage as DbNewMessage};
use crate::repository::{DieselRepository, MessageReader, MessageWriter, RepositoryResult};

fn summarize(rows: Vec<DbMessage>) -> RepositoryResult<Vec<ThreadSummary>> {
    let messages = rows
        .into_iter()
        .map(Message::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(summarize_threads(messages))
}

impl MessageReader for DieselRepository {
    fn list_client_threads(&self, client_id: &UserId) -> RepositoryResult<Vec<ThreadSummary>> {
        use crate::schema::messages;

        let mut conn = self.conn()?;

        let rows = messages::table
            .filter(messages::client_id.eq(client_id.as_str()))
            .order((messages::created_at.desc(), messages::id.desc()))
            .select(DbMessage::as_select())
            .load::<DbMessage>(&mut conn)?;

        summarize(rows)
    }

    fn list_vendor_threads(&self, vendor_id: &VendorId) -> RepositoryResult<Vec<ThreadSummary>> {
        use crate::schema::messages;

        let mut conn = self.conn()?;

        let rows = messages::table
            .filter(messages::vendor_id.eq(vendor_id.as_str()))
            .order((messages::created_at.desc(), messages::id.desc()))
            .select(DbMessage::as_select())
            .load::<DbMessage>(&mut conn)?;

        summarize(rows)
    }

    fn list_thread(
        &self,
        client_id: &UserId,
        vendor_id: &VendorId,
    ) -> RepositoryResult<Vec<Message>> {
        use crate::schema::messages;

        let mut conn = self.conn()?;

        let rows = messages::table
            .filter(messages::client_id.eq(client_id.as_str()))
            .filter(messages::vendor_id.eq(vendor_id.as_str()))
            .order((messages::created_at.asc(), messages::id.asc()))
            .select(DbMessage::as_select())
            .load::<DbMessage>(&mut conn)?;

        rows.into_iter()
            .map(|row| Message::try_from(row).map_err(Into::into))
            .collect()
    }
}

impl MessageWriter for DieselRepository {
    fn create_message(&self, message: &NewMessage) -> RepositoryResult<Message> {
        use crate::schema::messages;

        let mut conn = self.conn()?;

        let row = diesel::insert_into(messages::table)
            .values(DbNewMessage::from(message.clone()))
            .returning(DbMessage::as_returning())
            .get_result::<DbMessage>(&mut conn)?;

        Ok(Message::try_from(row)?)
    }
}
