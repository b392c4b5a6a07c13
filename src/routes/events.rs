use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::domain::category::CategoryRegistry;
use crate::domain::favorites::FavoriteGroup;
use crate::dto::vendors::VendorListingDto;
use crate::forms::events::{AddEventForm, AddEventFormPayload};
use crate::forms::favorites::{
    AddFavoriteForm, AddFavoriteFormPayload, RemoveFavoriteForm, RemoveFavoriteFormPayload,
};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::events::{
    add_event_favorite as add_event_favorite_service, create_event as create_event_service,
    delete_event as delete_event_service,
    remove_event_favorite as remove_event_favorite_service, show_event as show_event_service,
    show_events as show_events_service,
};
use crate::services::favorites::show_favorites as show_favorites_service;

#[get("/events")]
pub async fn show_events(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_events_service(&user, repo.get_ref()) {
        Ok(events) => {
            let mut context = base_context(
                &flash_messages,
                Some(&user),
                "events",
                &server_config.auth_service_url,
            );
            context.insert("events", &events);
            render_template(&tera, "events/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => redirect("/na"),
        Err(err) => {
            log::error!("Failed to render events: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/events")]
pub async fn create_event(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddEventForm>,
) -> impl Responder {
    let payload = match AddEventFormPayload::try_from(form) {
        Ok(payload) => payload,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect("/events");
        }
    };

    match create_event_service(payload, &user, repo.get_ref()) {
        Ok(true) => {
            FlashMessage::success("Event created.").send();
        }
        Ok(false) => {
            FlashMessage::error("Could not create the event.").send();
        }
        Err(ServiceError::Unauthorized) => return redirect("/na"),
        Err(err) => {
            log::error!("Failed to create event: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect("/events")
}

#[get("/events/{event_id}")]
pub async fn show_event(
    event_id: web::Path<i32>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    registry: web::Data<CategoryRegistry>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let (event, groups) = match show_event_service(event_id.into_inner(), &user, repo.get_ref()) {
        Ok(found) => found,
        Err(ServiceError::Unauthorized) => return redirect("/na"),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Event not found.").send();
            return redirect("/events");
        }
        Err(err) => {
            log::error!("Failed to render event: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    // Global favorites not yet on this event, offered for adding.
    let available = match show_favorites_service(&user, repo.get_ref()) {
        Ok(favorites) => favorites,
        Err(err) => {
            log::error!("Failed to load favorites for event page: {err}");
            vec![]
        }
    };

    let to_dto = |g: &FavoriteGroup| VendorListingDto::from_group(g, registry.get_ref());
    let mut available = available.iter().map(to_dto).collect::<Vec<_>>();
    for group in &mut available {
        group
            .services
            .retain(|s| !event.favorites.iter().any(|f| *f == s.reference));
    }
    available.retain(|g| !g.services.is_empty());

    let mut context = base_context(
        &flash_messages,
        Some(&user),
        "events",
        &server_config.auth_service_url,
    );
    context.insert("event", &event);
    context.insert("groups", &groups.iter().map(to_dto).collect::<Vec<_>>());
    context.insert("available", &available);
    render_template(&tera, "events/show.html", &context)
}

#[post("/events/{event_id}/delete")]
pub async fn delete_event(
    event_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match delete_event_service(event_id.into_inner(), &user, repo.get_ref()) {
        Ok(true) => {
            FlashMessage::success("Event deleted.").send();
        }
        Ok(false) => {
            FlashMessage::error("Could not delete the event.").send();
        }
        Err(ServiceError::Unauthorized) => return redirect("/na"),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Event not found.").send();
        }
        Err(err) => {
            log::error!("Failed to delete event: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect("/events")
}

#[post("/events/{event_id}/favorites")]
pub async fn add_event_favorite(
    event_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddFavoriteForm>,
) -> impl Responder {
    let event_id = event_id.into_inner();
    let back = format!("/events/{event_id}");

    let payload = match AddFavoriteFormPayload::try_from(form) {
        Ok(payload) => payload,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect(&back);
        }
    };

    match add_event_favorite_service(event_id, payload, &user, repo.get_ref()) {
        Ok(true) => {
            FlashMessage::success("Added to the event.").send();
        }
        Ok(false) => {
            FlashMessage::error("Could not add the service to the event.").send();
        }
        Err(ServiceError::Unauthorized) => return redirect("/na"),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Event or service not found.").send();
        }
        Err(err) => {
            log::error!("Failed to add event favorite: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect(&back)
}

#[post("/events/{event_id}/favorites/remove")]
pub async fn remove_event_favorite(
    event_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<RemoveFavoriteForm>,
) -> impl Responder {
    let event_id = event_id.into_inner();
    let back = format!("/events/{event_id}");

    let payload = match RemoveFavoriteFormPayload::try_from(form) {
        Ok(payload) => payload,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect(&back);
        }
    };

    match remove_event_favorite_service(event_id, payload, &user, repo.get_ref()) {
        Ok(true) => {
            FlashMessage::success("Removed from the event.").send();
        }
        Ok(false) => {
            FlashMessage::error("Could not remove the service from the event.").send();
        }
        Err(ServiceError::Unauthorized) => return redirect("/na"),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Event not found.").send();
            return redirect("/events");
        }
        Err(err) => {
            log::error!("Failed to remove event favorite: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect(&back)
}
