use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::domain::category::CategoryRegistry;
use crate::dto::vendors::VendorDto;
use crate::forms::messages::{SendMessageForm, SendMessageFormPayload};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::messages::{
    Participant, send_message as send_message_service, show_thread as show_thread_service,
    show_threads as show_threads_service,
};

#[get("/messages")]
pub async fn show_threads(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_threads_service(&user, repo.get_ref()) {
        Ok((participant, threads)) => {
            let mut context = base_context(
                &flash_messages,
                Some(&user),
                "messages",
                &server_config.auth_service_url,
            );
            context.insert(
                "as_vendor",
                &matches!(participant, Participant::Vendor(_)),
            );
            context.insert("threads", &threads);
            render_template(&tera, "messages/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => redirect("/na"),
        Err(err) => {
            log::error!("Failed to render threads: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/messages/{counterpart}")]
pub async fn show_thread(
    counterpart: web::Path<String>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    registry: web::Data<CategoryRegistry>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_thread_service(&counterpart, &user, repo.get_ref()) {
        Ok(view) => {
            let mut context = base_context(
                &flash_messages,
                Some(&user),
                "messages",
                &server_config.auth_service_url,
            );
            context.insert(
                "as_vendor",
                &matches!(view.participant, Participant::Vendor(_)),
            );
            context.insert("counterpart", counterpart.as_str());
            context.insert("client_name", &view.client_name);
            context.insert(
                "vendor",
                &view
                    .vendor
                    .as_ref()
                    .map(|v| VendorDto::new(v, registry.get_ref())),
            );
            context.insert("messages", &view.messages);
            render_template(&tera, "messages/thread.html", &context)
        }
        Err(ServiceError::Unauthorized) => redirect("/na"),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Conversation not found.").send();
            redirect("/messages")
        }
        Err(err) => {
            log::error!("Failed to render thread: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/messages/{counterpart}")]
pub async fn send_message(
    counterpart: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SendMessageForm>,
) -> impl Responder {
    let back = format!("/messages/{counterpart}");

    let payload = match SendMessageFormPayload::try_from(form) {
        Ok(payload) => payload,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect(&back);
        }
    };

    match send_message_service(&counterpart, payload, &user, repo.get_ref()) {
        Ok(true) => {}
        Ok(false) => {
            FlashMessage::error("Could not send the message.").send();
        }
        Err(ServiceError::Unauthorized) => return redirect("/na"),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Conversation not found.").send();
            return redirect("/messages");
        }
        Err(err) => {
            log::error!("Failed to send message: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect(&back)
}
