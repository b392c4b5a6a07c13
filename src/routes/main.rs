use actix_identity::Identity;
use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::domain::category::CategoryRegistry;
use crate::domain::geo;
use crate::domain::search::SearchFilters;
use crate::dto::vendors::VendorListingDto;
use crate::forms::search::SearchForm;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::main::{
    SearchOutcome, search_vendors as search_vendors_service, show_vendor as show_vendor_service,
};

#[get("/")]
pub async fn index(
    req: HttpRequest,
    params: web::Query<SearchForm>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    registry: web::Data<CategoryRegistry>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let form = params.into_inner();

    let filters = SearchFilters::from(form.clone());

    let outcome = match search_vendors_service(&filters, repo.get_ref(), registry.get_ref()) {
        Ok(outcome) => outcome,
        Err(err) => {
            log::error!("Failed to search vendors: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(
        &flash_messages,
        user.as_ref(),
        "index",
        &server_config.auth_service_url,
    );
    context.insert("search", &form);
    context.insert("return_to", &req.uri().to_string());
    context.insert("states", &geo::states().collect::<Vec<_>>());
    context.insert(
        "cities",
        &form.state.as_deref().map(geo::cities).unwrap_or_default(),
    );
    context.insert("categories", registry.all());

    match outcome {
        SearchOutcome::Incomplete => {
            context.insert("searched", &false);
        }
        SearchOutcome::Results(results) => {
            let vendors = results
                .vendors
                .iter()
                .map(|listing| VendorListingDto::new(listing, registry.get_ref()))
                .collect::<Vec<_>>();
            context.insert("searched", &true);
            context.insert("vendors", &vendors);
            context.insert("total", &results.total);
            context.insert("hidden", &results.hidden());
        }
    }

    render_template(&tera, "main/index.html", &context)
}

#[get("/categories")]
pub async fn show_categories(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    registry: web::Data<CategoryRegistry>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(
        &flash_messages,
        user.as_ref(),
        "categories",
        &server_config.auth_service_url,
    );
    context.insert("categories", registry.all());

    render_template(&tera, "main/categories.html", &context)
}

#[get("/vendors/{slug}")]
pub async fn show_vendor(
    slug: web::Path<String>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    registry: web::Data<CategoryRegistry>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_vendor_service(&slug, repo.get_ref()) {
        Ok(listing) => {
            let mut context = base_context(
                &flash_messages,
                user.as_ref(),
                "vendor",
                &server_config.auth_service_url,
            );
            context.insert("listing", &VendorListingDto::new(&listing, registry.get_ref()));
            context.insert("return_to", &format!("/vendors/{}", listing.vendor.slug));
            render_template(&tera, "main/vendor.html", &context)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Vendor not found.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to render vendor page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/na")]
pub async fn not_assigned(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(
        &flash_messages,
        user.as_ref(),
        "index",
        &server_config.auth_service_url,
    );

    render_template(&tera, "main/not_assigned.html", &context)
}

#[get("/logout")]
pub async fn logout(identity: Option<Identity>) -> impl Responder {
    if let Some(identity) = identity {
        identity.logout();
    }
    redirect("/")
}
