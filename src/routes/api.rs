use std::sync::Arc;

use actix_web::{HttpResponse, Responder, get, post, web};
use serde::Deserialize;
use serde_json::json;

use crate::auth::AuthenticatedUser;
use crate::domain::category::CategoryRegistry;
use crate::domain::geo;
use crate::domain::search::SearchFilters;
use crate::dto::vendors::VendorListingDto;
use crate::forms::contracts::{DraftContractForm, DraftContractFormPayload};
use crate::forms::search::SearchForm;
use crate::llm::TextGenerator;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::contracts::draft_contract as draft_contract_service;
use crate::services::main::{SearchOutcome, search_vendors as search_vendors_service};

fn json_error(mut response: actix_web::HttpResponseBuilder, message: &str) -> HttpResponse {
    response.json(json!({ "error": message }))
}

#[get("/v1/vendors")]
pub async fn api_v1_vendors(
    params: web::Query<SearchForm>,
    repo: web::Data<DieselRepository>,
    registry: web::Data<CategoryRegistry>,
) -> impl Responder {
    let filters = SearchFilters::from(params.into_inner());

    match search_vendors_service(&filters, repo.get_ref(), registry.get_ref()) {
        Ok(SearchOutcome::Incomplete) => {
            json_error(HttpResponse::BadRequest(), "state and city are required")
        }
        Ok(SearchOutcome::Results(results)) => HttpResponse::Ok().json(json!({
            "total": results.total,
            "hidden": results.hidden(),
            "vendors": results
                .vendors
                .iter()
                .map(|listing| VendorListingDto::new(listing, registry.get_ref()))
                .collect::<Vec<_>>(),
        })),
        Err(err) => {
            log::error!("Failed to search vendors: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[derive(Deserialize, Debug)]
struct ApiV1CitiesQueryParams {
    state: String,
}

#[get("/v1/geo/cities")]
pub async fn api_v1_cities(params: web::Query<ApiV1CitiesQueryParams>) -> impl Responder {
    HttpResponse::Ok().json(geo::cities(params.state.trim()))
}

#[post("/v1/contracts/draft")]
pub async fn api_v1_draft_contract(
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    generator: web::Data<Arc<dyn TextGenerator>>,
    registry: web::Data<CategoryRegistry>,
    web::Json(form): web::Json<DraftContractForm>,
) -> impl Responder {
    let Some(user) = user else {
        return HttpResponse::Unauthorized().finish();
    };

    let payload = match DraftContractFormPayload::try_from(form) {
        Ok(payload) => payload,
        Err(err) => return json_error(HttpResponse::BadRequest(), &err.to_string()),
    };

    match draft_contract_service(
        payload,
        &user,
        repo.get_ref(),
        generator.get_ref().as_ref(),
        registry.get_ref(),
    )
    .await
    {
        Ok(reply) => HttpResponse::Ok().json(reply),
        Err(ServiceError::Unauthorized) => HttpResponse::Forbidden().finish(),
        Err(ServiceError::Generation(message)) => {
            json_error(HttpResponse::BadGateway(), &message)
        }
        Err(ServiceError::Form(message) | ServiceError::TypeConstraint(message)) => {
            json_error(HttpResponse::BadRequest(), &message)
        }
        Err(err) => {
            log::error!("Failed to draft contract: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
