use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::StatusCode,
    web, Error, HttpMessage, HttpResponse,
};
use futures_util::future::{ok, Ready, LocalBoxFuture};
use std::{rc::Rc, task::{Context, Poll}};

use crate::{errors::AuthError, handlers::json_error::json_error, AppState};

const ADMIN_PREFIX: &str = "/api/v1/admin";

/// Admin-only routes outside the `/api/v1/admin` scope.
const SESSION_ROUTES: [&str; 3] = [
    "/api/v1/auth/logout",
    "/api/v1/auth/session",
    "/api/v1/auth/change-password",
];

/// Checks `Authorization: Bearer <token>` against the live session marker on
/// admin routes and stores the verified marker in the request extensions.
pub struct AuthMiddleware;

impl<S> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            if !requires_session(req.path(), req.method().as_str()) {
                return service.call(req).await;
            }

            let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
                tracing::error!("AppState missing in middleware");
                return Ok(custom_error_response(req, json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    "Application state is not configured",
                )));
            };

            let Some(token) = extract_token(&req) else {
                tracing::warn!("Missing or malformed Authorization header");
                return Ok(custom_error_response(req, json_error(
                    StatusCode::UNAUTHORIZED,
                    "Missing or invalid credentials",
                    "Expected an 'Authorization: Bearer <token>' header",
                )));
            };

            let marker = match state.auth_handler.verify_session(&token) {
                Ok(marker) => marker,
                Err(err @ (AuthError::InvalidSession | AuthError::SessionExpired)) => {
                    tracing::warn!("Rejected admin request to {}: {}", req.path(), err);
                    return Ok(custom_error_response(req, json_error(
                        StatusCode::UNAUTHORIZED,
                        "Missing or invalid credentials",
                        &err.to_string(),
                    )));
                }
                Err(err) => {
                    tracing::error!("Session check failed: {}", err);
                    return Ok(custom_error_response(req, json_error(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error",
                        "Session check failed",
                    )));
                }
            };

            req.extensions_mut().insert(marker);
            service.call(req).await
        })
    }
}

fn requires_session(path: &str, method: &str) -> bool {
    if method == "OPTIONS" {
        return false;
    }

    path == ADMIN_PREFIX
        || path.starts_with(&format!("{ADMIN_PREFIX}/"))
        || SESSION_ROUTES.contains(&path)
}

fn extract_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| {
            let parts: Vec<&str> = header.split_whitespace().collect();
            if parts.len() == 2 && parts[0].eq_ignore_ascii_case("bearer") {
                Some(parts[1].to_string())
            } else {
                None
            }
        })
}

fn custom_error_response(req: ServiceRequest, res: HttpResponse) -> ServiceResponse<BoxBody> {
    req.into_response(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_admin_and_session_routes_are_gated() {
        assert!(requires_session("/api/v1/admin/projects", "POST"));
        assert!(requires_session("/api/v1/admin", "GET"));
        assert!(requires_session("/api/v1/auth/change-password", "POST"));
        assert!(!requires_session("/api/v1/admin/projects", "OPTIONS"));
        assert!(!requires_session("/api/v1/administrator", "GET"));
        assert!(!requires_session("/api/v1/auth/login", "POST"));
        assert!(!requires_session("/api/v1/blog/posts", "GET"));
    }
}
