use crate::auth::AuthenticatedUser;
use crate::domain::message::{Message, NewMessage, ThreadSummary};
use crate::domain::types::{MessageSender, UserId, VendorId};
use crate::domain::vendor::Vendor;
use crate::forms::messages::SendMessageFormPayload;
use crate::repository::{MessageReader, MessageWriter, VendorReader};
use crate::{CLIENT_ROLE, VENDOR_ROLE};

use super::{ServiceError, ServiceResult};

/// Which side of the conversation the signed-in user is on.
///
/// Users holding both roles act as the vendor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Participant {
    Client(UserId),
    Vendor(VendorId),
}

impl Participant {
    pub fn sender(&self) -> MessageSender {
        match self {
            Self::Client(_) => MessageSender::Client,
            Self::Vendor(_) => MessageSender::Vendor,
        }
    }
}

pub fn participant(user: &AuthenticatedUser) -> ServiceResult<Participant> {
    if user.has_role(VENDOR_ROLE) {
        let vendor_id = user.vendor_id().map_err(|e| {
            log::error!("User id {} cannot be used as a vendor id: {e}", user.sub);
            ServiceError::TypeConstraint(e.to_string())
        })?;
        return Ok(Participant::Vendor(vendor_id));
    }

    if user.has_role(CLIENT_ROLE) {
        let client_id = user.user_id().map_err(|e| {
            log::error!("Invalid user id in session: {e}");
            ServiceError::Internal
        })?;
        return Ok(Participant::Client(client_id));
    }

    Err(ServiceError::Unauthorized)
}

/// A thread as seen by one participant.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadView {
    pub participant: Participant,
    pub client_id: UserId,
    pub client_name: String,
    pub vendor: Option<Vendor>,
    pub messages: Vec<Message>,
}

/// Inbox of the signed-in user, most recent thread first.
pub fn show_threads<R>(
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<(Participant, Vec<ThreadSummary>)>
where
    R: MessageReader,
{
    let participant = participant(user)?;

    let threads = match &participant {
        Participant::Client(client_id) => repo.list_client_threads(client_id),
        Participant::Vendor(vendor_id) => repo.list_vendor_threads(vendor_id),
    }
    .map_err(|e| {
        log::error!("Failed to list threads: {e}");
        ServiceError::Internal
    })?;

    Ok((participant, threads))
}

/// Resolves the counterpart path segment into the two ends of a thread.
fn thread_ends<R>(
    participant: &Participant,
    counterpart: &str,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<(UserId, VendorId, Vec<Message>)>
where
    R: VendorReader + MessageReader,
{
    let (client_id, vendor_id) = match participant {
        Participant::Client(client_id) => {
            let vendor_id = VendorId::new(counterpart).map_err(|_| ServiceError::NotFound)?;
            (client_id.clone(), vendor_id)
        }
        Participant::Vendor(vendor_id) => {
            let client_id = UserId::new(counterpart).map_err(|_| ServiceError::NotFound)?;
            (client_id, vendor_id.clone())
        }
    };

    let messages = repo.list_thread(&client_id, &vendor_id).map_err(|e| {
        log::error!("Failed to list thread: {e}");
        ServiceError::Internal
    })?;

    // Vendors can only answer; clients can open a thread with any vendor.
    if messages.is_empty() && matches!(participant, Participant::Vendor(_)) {
        return Err(ServiceError::NotFound);
    }
    if client_id.as_str() == user.sub && vendor_id.as_str() == user.sub {
        return Err(ServiceError::NotFound);
    }

    Ok((client_id, vendor_id, messages))
}

pub fn show_thread<R>(
    counterpart: &str,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<ThreadView>
where
    R: VendorReader + MessageReader,
{
    let participant = participant(user)?;
    let (client_id, vendor_id, messages) = thread_ends(&participant, counterpart, user, repo)?;

    let vendor = repo.get_vendor_by_id(&vendor_id).map_err(|e| {
        log::error!("Failed to get vendor: {e}");
        ServiceError::Internal
    })?;
    if vendor.is_none() && matches!(participant, Participant::Client(_)) {
        return Err(ServiceError::NotFound);
    }

    let client_name = match (&participant, messages.last()) {
        (Participant::Client(_), _) => user.name.clone(),
        (Participant::Vendor(_), Some(last)) => last.client_name.clone(),
        (Participant::Vendor(_), None) => client_id.to_string(),
    };

    Ok(ThreadView {
        participant,
        client_id,
        client_name,
        vendor,
        messages,
    })
}

/// Appends a message to the thread with `counterpart`.
pub fn send_message<R>(
    counterpart: &str,
    payload: SendMessageFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<bool>
where
    R: VendorReader + MessageReader + MessageWriter,
{
    let participant = participant(user)?;
    let (client_id, vendor_id, messages) = thread_ends(&participant, counterpart, user, repo)?;

    let client_name = match &participant {
        Participant::Client(_) => {
            match repo.get_vendor_by_id(&vendor_id) {
                Ok(Some(_)) => {}
                Ok(None) => return Err(ServiceError::NotFound),
                Err(e) => {
                    log::error!("Failed to get vendor: {e}");
                    return Err(ServiceError::Internal);
                }
            }
            user.name.clone()
        }
        Participant::Vendor(_) => messages
            .last()
            .map(|m| m.client_name.clone())
            .unwrap_or_else(|| client_id.to_string()),
    };

    let message = NewMessage {
        client_id,
        client_name,
        vendor_id,
        sender: participant.sender(),
        body: payload.body,
    };

    match repo.create_message(&message) {
        Ok(_) => Ok(true),
        Err(e) => {
            log::error!("Failed to send message: {e}");
            Ok(false)
        }
    }
}
