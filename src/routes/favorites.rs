use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::domain::category::CategoryRegistry;
use crate::dto::vendors::VendorListingDto;
use crate::forms::favorites::{
    AddFavoriteForm, AddFavoriteFormPayload, RemoveFavoriteForm, RemoveFavoriteFormPayload,
};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template, return_path};
use crate::services::ServiceError;
use crate::services::favorites::{
    add_favorite as add_favorite_service, remove_favorite as remove_favorite_service,
    show_favorites as show_favorites_service,
};

#[derive(Deserialize)]
pub(crate) struct ReturnQuery {
    pub next: Option<String>,
}

#[get("/favorites")]
pub async fn show_favorites(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    registry: web::Data<CategoryRegistry>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_favorites_service(&user, repo.get_ref()) {
        Ok(groups) => {
            let groups = groups
                .iter()
                .map(|g| VendorListingDto::from_group(g, registry.get_ref()))
                .collect::<Vec<_>>();
            let mut context = base_context(
                &flash_messages,
                Some(&user),
                "favorites",
                &server_config.auth_service_url,
            );
            context.insert("groups", &groups);
            render_template(&tera, "favorites/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => redirect("/na"),
        Err(err) => {
            log::error!("Failed to render favorites: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/favorites")]
pub async fn add_favorite(
    query: web::Query<ReturnQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddFavoriteForm>,
) -> impl Responder {
    let back = return_path(query.next.as_deref(), "/favorites");

    let payload = match AddFavoriteFormPayload::try_from(form) {
        Ok(payload) => payload,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect(&back);
        }
    };

    match add_favorite_service(payload, &user, repo.get_ref()) {
        Ok(true) => {
            FlashMessage::success("Saved to favorites.").send();
        }
        Ok(false) => {
            FlashMessage::error("Could not save the favorite.").send();
        }
        Err(ServiceError::Unauthorized) => return redirect("/na"),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("That service no longer exists.").send();
        }
        Err(err) => {
            log::error!("Failed to add favorite: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect(&back)
}

#[post("/favorites/remove")]
pub async fn remove_favorite(
    query: web::Query<ReturnQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<RemoveFavoriteForm>,
) -> impl Responder {
    let back = return_path(query.next.as_deref(), "/favorites");

    let payload = match RemoveFavoriteFormPayload::try_from(form) {
        Ok(payload) => payload,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect(&back);
        }
    };

    match remove_favorite_service(payload, &user, repo.get_ref()) {
        Ok(true) => {
            FlashMessage::success("Removed from favorites.").send();
        }
        Ok(false) => {
            FlashMessage::error("Could not remove the favorite.").send();
        }
        Err(ServiceError::Unauthorized) => return redirect("/na"),
        Err(err) => {
            log::error!("Failed to remove favorite: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect(&back)
}
