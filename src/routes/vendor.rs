use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::domain::category::CategoryRegistry;
use crate::domain::geo;
use crate::dto::vendors::{ServiceDto, VendorDto};
use crate::forms::services::{
    AddServiceForm, AddServiceFormPayload, UpdateServiceForm, UpdateServiceFormPayload,
};
use crate::forms::vendors::{VendorProfileForm, VendorProfileFormPayload};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::contracts::show_contract_assistant as show_contract_assistant_service;
use crate::services::vendor_services::{
    add_service as add_service_service, delete_service as delete_service_service,
    show_vendor_services as show_vendor_services_service,
    update_service as update_service_service,
};
use crate::services::vendors::{
    save_vendor_profile as save_vendor_profile_service,
    show_vendor_profile as show_vendor_profile_service,
};
use crate::storage::LocalObjectStore;

#[get("/vendor/profile")]
pub async fn show_profile(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    registry: web::Data<CategoryRegistry>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_vendor_profile_service(&user, repo.get_ref()) {
        Ok(vendor) => {
            let mut context = base_context(
                &flash_messages,
                Some(&user),
                "profile",
                &server_config.auth_service_url,
            );
            let selected = vendor
                .as_ref()
                .map(|v| v.category_ids.iter().map(ToString::to_string).collect())
                .unwrap_or_else(Vec::<String>::new);
            let cities = vendor
                .as_ref()
                .map(|v| geo::cities(v.state.as_str()))
                .unwrap_or_default();
            context.insert(
                "vendor",
                &vendor.as_ref().map(|v| VendorDto::new(v, registry.get_ref())),
            );
            context.insert("selected_categories", &selected);
            context.insert("categories", registry.all());
            context.insert("states", &geo::states().collect::<Vec<_>>());
            context.insert("cities", &cities);
            render_template(&tera, "vendor/profile.html", &context)
        }
        Err(ServiceError::Unauthorized) => redirect("/na"),
        Err(ServiceError::TypeConstraint(message)) => {
            FlashMessage::error(message).send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to render vendor profile: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/vendor/profile")]
pub async fn save_profile(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    store: web::Data<LocalObjectStore>,
    registry: web::Data<CategoryRegistry>,
    MultipartForm(form): MultipartForm<VendorProfileForm>,
) -> impl Responder {
    let payload = match VendorProfileFormPayload::try_from(form) {
        Ok(payload) => payload,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect("/vendor/profile");
        }
    };

    match save_vendor_profile_service(
        payload,
        &user,
        repo.get_ref(),
        store.get_ref(),
        registry.get_ref(),
    ) {
        Ok(vendor) => {
            FlashMessage::success("Profile saved.").send();
            redirect(&format!("/vendors/{}", vendor.slug))
        }
        Err(ServiceError::Unauthorized) => redirect("/na"),
        Err(
            ServiceError::Form(message)
            | ServiceError::TypeConstraint(message)
            | ServiceError::Upload(message),
        ) => {
            FlashMessage::error(message).send();
            redirect("/vendor/profile")
        }
        Err(err) => {
            log::error!("Failed to save vendor profile: {err}");
            FlashMessage::error("Could not save the profile.").send();
            redirect("/vendor/profile")
        }
    }
}

#[get("/vendor/services")]
pub async fn show_services(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    registry: web::Data<CategoryRegistry>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_vendor_services_service(&user, repo.get_ref()) {
        Ok((vendor, services)) => {
            let services = services
                .iter()
                .map(|s| ServiceDto::new(s, registry.get_ref()))
                .collect::<Vec<_>>();
            let mut context = base_context(
                &flash_messages,
                Some(&user),
                "services",
                &server_config.auth_service_url,
            );
            context.insert(
                "vendor",
                &vendor.as_ref().map(|v| VendorDto::new(v, registry.get_ref())),
            );
            context.insert("services", &services);
            context.insert("categories", registry.all());
            render_template(&tera, "vendor/services.html", &context)
        }
        Err(ServiceError::Unauthorized) => redirect("/na"),
        Err(err) => {
            log::error!("Failed to render vendor services: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/vendor/services")]
pub async fn add_service(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    store: web::Data<LocalObjectStore>,
    registry: web::Data<CategoryRegistry>,
    MultipartForm(form): MultipartForm<AddServiceForm>,
) -> impl Responder {
    let payload = match AddServiceFormPayload::try_from(form) {
        Ok(payload) => payload,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect("/vendor/services");
        }
    };

    match add_service_service(
        payload,
        &user,
        repo.get_ref(),
        store.get_ref(),
        registry.get_ref(),
    ) {
        Ok(true) => {
            FlashMessage::success("Service added.").send();
        }
        Ok(false) => {
            FlashMessage::error("Could not add the service.").send();
        }
        Err(ServiceError::Unauthorized) => return redirect("/na"),
        Err(
            ServiceError::Form(message)
            | ServiceError::TypeConstraint(message)
            | ServiceError::Upload(message),
        ) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to add service: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect("/vendor/services")
}

#[post("/vendor/services/{service_id}/update")]
pub async fn update_service(
    service_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    registry: web::Data<CategoryRegistry>,
    web::Form(form): web::Form<UpdateServiceForm>,
) -> impl Responder {
    let payload = match UpdateServiceFormPayload::try_from(form) {
        Ok(payload) => payload,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect("/vendor/services");
        }
    };

    match update_service_service(
        service_id.into_inner(),
        payload,
        &user,
        repo.get_ref(),
        registry.get_ref(),
    ) {
        Ok(true) => {
            FlashMessage::success("Service updated.").send();
        }
        Ok(false) => {
            FlashMessage::error("Could not update the service.").send();
        }
        Err(ServiceError::Unauthorized) => return redirect("/na"),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Service not found.").send();
        }
        Err(ServiceError::Form(message) | ServiceError::TypeConstraint(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to update service: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect("/vendor/services")
}

#[post("/vendor/services/{service_id}/delete")]
pub async fn delete_service(
    service_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match delete_service_service(service_id.into_inner(), &user, repo.get_ref()) {
        Ok(true) => {
            FlashMessage::success("Service deleted.").send();
        }
        Ok(false) => {
            FlashMessage::error("Could not delete the service.").send();
        }
        Err(ServiceError::Unauthorized) => return redirect("/na"),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Service not found.").send();
        }
        Err(err) => {
            log::error!("Failed to delete service: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect("/vendor/services")
}

#[get("/vendor/contracts")]
pub async fn show_contracts(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    registry: web::Data<CategoryRegistry>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_contract_assistant_service(&user, repo.get_ref()) {
        Ok(services) => {
            let services = services
                .iter()
                .map(|s| ServiceDto::new(s, registry.get_ref()))
                .collect::<Vec<_>>();
            let mut context = base_context(
                &flash_messages,
                Some(&user),
                "contracts",
                &server_config.auth_service_url,
            );
            context.insert("services", &services);
            render_template(&tera, "vendor/contracts.html", &context)
        }
        Err(ServiceError::Unauthorized) => redirect("/na"),
        Err(err) => {
            log::error!("Failed to render contract assistant: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
