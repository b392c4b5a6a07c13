//! Signed-in user extracted from the identity cookie shared with the auth
//! service.

use std::future::{Ready, ready};

use actix_identity::IdentityExt;
use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, HttpResponse, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::types::{TypeConstraintError, UserId, VendorId};
use crate::models::config::ServerConfig;

/// Claims stored as JSON in the identity id by the auth service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub roles: Vec<String>,
    /// Expiry as a unix timestamp; zero never expires.
    #[serde(default)]
    pub exp: i64,
}

impl AuthenticatedUser {
    pub fn user_id(&self) -> Result<UserId, TypeConstraintError> {
        UserId::new(self.sub.as_str())
    }

    /// Vendor identity of this user. Fails for ids that cannot form
    /// favorite references.
    pub fn vendor_id(&self) -> Result<VendorId, TypeConstraintError> {
        VendorId::try_from(&self.user_id()?)
    }

    pub fn has_role(&self, role: &str) -> bool {
        check_role(role, &self.roles)
    }

    fn is_expired(&self) -> bool {
        self.exp > 0 && self.exp < Utc::now().timestamp()
    }
}

pub fn check_role(role: &str, roles: &[String]) -> bool {
    roles.iter().any(|r| r == role)
}

fn sign_in_redirect(req: &HttpRequest) -> actix_web::Error {
    let location = req
        .app_data::<web::Data<ServerConfig>>()
        .map(|config| config.auth_service_url.clone())
        .unwrap_or_else(|| "/na".to_string());

    let response = HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish();
    InternalError::from_response("authentication required", response).into()
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = req
            .get_identity()
            .ok()
            .and_then(|identity| identity.id().ok())
            .and_then(|id| serde_json::from_str::<AuthenticatedUser>(&id).ok())
            .filter(|user| !user.is_expired());

        ready(user.ok_or_else(|| sign_in_redirect(req)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(roles: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "vendor-1".into(),
            email: "vendor@example.com".into(),
            name: "Vendor".into(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            exp: 0,
        }
    }

    #[test]
    fn checks_roles() {
        let user = sample_user(&["vendor"]);
        assert!(user.has_role("vendor"));
        assert!(!user.has_role("client"));
    }

    #[test]
    fn vendor_id_rejects_underscore() {
        let mut user = sample_user(&["vendor"]);
        assert_eq!(user.vendor_id().unwrap(), "vendor-1");

        user.sub = "google_123".into();
        assert!(user.vendor_id().is_err());
    }

    #[test]
    fn zero_expiry_never_expires() {
        let mut user = sample_user(&[]);
        assert!(!user.is_expired());

        user.exp = 1;
        assert!(user.is_expired());
    }
}
