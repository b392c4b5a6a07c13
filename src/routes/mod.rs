use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::auth::AuthenticatedUser;
use crate::{CLIENT_ROLE, VENDOR_ROLE};

pub mod api;
pub mod events;
pub mod favorites;
pub mod main;
pub mod messages;
pub mod vendor;

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            log::error!("Failed to render template '{template}': {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Context shared by every page: alerts, the signed-in user and navigation.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: Option<&AuthenticatedUser>,
    current_page: &str,
    home_url: &str,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_user", &user);
    context.insert("is_client", &user.is_some_and(|u| u.has_role(CLIENT_ROLE)));
    context.insert("is_vendor", &user.is_some_and(|u| u.has_role(VENDOR_ROLE)));
    context.insert("current_page", current_page);
    context.insert("home_url", home_url);
    context
}

/// 303 redirect, so browsers follow a POST with a GET.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Local path to return to after a form post, or `fallback`.
///
/// Only same-site absolute paths are accepted.
pub fn return_path(next: Option<&str>, fallback: &str) -> String {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path.to_string(),
        _ => fallback.to_string(),
    }
}

/// Bootstrap alert class for a flash message level.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_uses_see_other() {
        let response = redirect("/favorites");
        assert_eq!(response.status(), actix_web::http::StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/favorites"
        );
    }

    #[test]
    fn return_path_rejects_foreign_targets() {
        assert_eq!(return_path(Some("/vendors/bloom"), "/"), "/vendors/bloom");
        assert_eq!(return_path(Some("//evil.example"), "/"), "/");
        assert_eq!(return_path(Some("https://evil.example"), "/"), "/");
        assert_eq!(return_path(None, "/favorites"), "/favorites");
    }

    #[test]
    fn maps_alert_levels() {
        assert_eq!(alert_level_to_str(&Level::Error), "danger");
        assert_eq!(alert_level_to_str(&Level::Success), "success");
        assert_eq!(alert_level_to_str(&Level::Info), "info");
    }
}
