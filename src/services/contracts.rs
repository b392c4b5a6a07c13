use crate::auth::AuthenticatedUser;
use crate::domain::category::CategoryRegistry;
use crate::domain::contract::{DraftInput, DraftReply, ServiceContext, assemble_prompt};
use crate::domain::service::Service;
use crate::forms::contracts::DraftContractFormPayload;
use crate::llm::TextGenerator;
use crate::repository::ServiceReader;

use super::vendors::vendor_identity;
use super::{ServiceError, ServiceResult};

fn service_context(service: &Service, registry: &CategoryRegistry) -> ServiceContext {
    ServiceContext {
        id: service.id.to_string(),
        name: service.name.to_string(),
        description: service.description.to_string(),
        category: registry
            .name_for(&service.category_id)
            .unwrap_or(service.category_id.as_str())
            .to_string(),
        price_range: service.price_range.as_ref().map(|p| p.to_string()),
    }
}

/// Services the signed-in vendor can pick as drafting context.
pub fn show_contract_assistant<R>(user: &AuthenticatedUser, repo: &R) -> ServiceResult<Vec<Service>>
where
    R: ServiceReader,
{
    let vendor_id = vendor_identity(user)?;

    repo.list_services(&vendor_id).map_err(|e| {
        log::error!("Failed to list services: {e}");
        ServiceError::Internal
    })
}

/// Runs one turn of the contract assistant.
///
/// The context is the vendor's own services, narrowed to `service_ids` when
/// any are given. Ids of other vendors' services are ignored.
pub async fn draft_contract<R, G>(
    payload: DraftContractFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
    generator: &G,
    registry: &CategoryRegistry,
) -> ServiceResult<DraftReply>
where
    R: ServiceReader,
    G: TextGenerator + ?Sized,
{
    let vendor_id = vendor_identity(user)?;

    let services = repo.list_services(&vendor_id).map_err(|e| {
        log::error!("Failed to list services: {e}");
        ServiceError::Internal
    })?;

    let services = services
        .iter()
        .filter(|s| payload.service_ids.is_empty() || payload.service_ids.contains(&s.id))
        .map(|s| service_context(s, registry))
        .collect();

    let prompt = assemble_prompt(&DraftInput {
        prompt: payload.prompt,
        history: payload.history,
        services,
    });

    match generator.generate(&prompt).await {
        Ok(text) => Ok(DraftReply::new(text)),
        Err(e) => {
            log::error!("Contract generation failed for vendor {vendor_id}: {e}");
            Err(ServiceError::Generation(e.user_message().to_string()))
        }
    }
}
