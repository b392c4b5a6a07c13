use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{MessageBody, MessageId, MessageSender, UserId, VendorId};

/// One message in a client/vendor thread.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub client_id: UserId,
    /// Display name the client had when the thread was last written to.
    pub client_name: String,
    pub vendor_id: VendorId,
    pub sender: MessageSender,
    pub body: MessageBody,
    pub created_at: NaiveDateTime,
}

/// Information required to append a [`Message`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewMessage {
    pub client_id: UserId,
    pub client_name: String,
    pub vendor_id: VendorId,
    pub sender: MessageSender,
    pub body: MessageBody,
}

/// Latest message of each thread, used for inbox listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThreadSummary {
    pub client_id: UserId,
    pub client_name: String,
    pub vendor_id: VendorId,
    pub last_message: Message,
    pub message_count: usize,
}

/// Folds messages ordered newest first into one summary per thread.
///
/// Threads keep the order of their most recent message.
pub fn summarize_threads(messages: Vec<Message>) -> Vec<ThreadSummary> {
    let mut threads: Vec<ThreadSummary> = Vec::new();

    for message in messages {
        match threads
            .iter_mut()
            .find(|t| t.client_id == message.client_id && t.vendor_id == message.vendor_id)
        {
            Some(thread) => thread.message_count += 1,
            None => threads.push(ThreadSummary {
                client_id: message.client_id.clone(),
                client_name: message.client_name.clone(),
                vendor_id: message.vendor_id.clone(),
                last_message: message,
                message_count: 1,
            }),
        }
    }

    threads
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;

    fn message(id: i32, client: &str, vendor: &str, body: &str) -> Message {
        Message {
            id: MessageId::new(id).unwrap(),
            client_id: UserId::new(client).unwrap(),
            client_name: format!("Client {client}"),
            vendor_id: VendorId::new(vendor).unwrap(),
            sender: MessageSender::Client,
            body: MessageBody::new(body).unwrap(),
            created_at: DateTime::from_timestamp(i64::from(id), 0).unwrap().naive_utc(),
        }
    }

    #[test]
    fn keeps_latest_message_per_thread() {
        let threads = summarize_threads(vec![
            message(4, "c1", "v2", "newest"),
            message(3, "c1", "v1", "latest for v1"),
            message(2, "c1", "v2", "older"),
            message(1, "c1", "v1", "first"),
        ]);

        assert_eq!(threads.len(), 2);
        assert_eq!(threads[0].vendor_id, "v2");
        assert_eq!(threads[0].last_message.body, "newest");
        assert_eq!(threads[0].message_count, 2);
        assert_eq!(threads[1].vendor_id, "v1");
        assert_eq!(threads[1].last_message.body, "latest for v1");
    }
}
