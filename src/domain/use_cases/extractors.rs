use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::{entities::session::SessionMarker, errors::AuthError};

/// The verified admin session, placed on the request by the auth middleware.
/// Returns 401 when the route was reached without one.
/// Usage: add `session: AdminSession` as a handler parameter.
#[derive(Debug)]
pub struct AdminSession(pub SessionMarker);

impl FromRequest for AdminSession {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<SessionMarker>() {
            Some(marker) => ready(Ok(AdminSession(marker.clone()))),
            None => ready(Err(AuthError::MissingCredentials.into())),
        }
    }
}
