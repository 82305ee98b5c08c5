use actix_web::{get, post, web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{
        credentials::{ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, MessageResponse},
        session::SessionResponse,
    },
    errors::AuthError,
    use_cases::extractors::AdminSession,
    AppState,
};

#[post("/login")]
#[instrument(skip(state, credentials), fields(username = %credentials.username))]
pub async fn login(
    state: web::Data<AppState>,
    credentials: web::Json<LoginRequest>,
) -> Result<impl Responder, AuthError> {
    let session = state.auth_handler.login(credentials.into_inner())?;
    Ok(HttpResponse::Ok().json(session))
}

#[post("/forgot-password")]
pub async fn forgot_password(
    state: web::Data<AppState>,
    request: web::Json<ForgotPasswordRequest>,
) -> Result<impl Responder, AuthError> {
    let response = state.auth_handler.forgot_password(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/logout")]
pub async fn logout(
    _session: AdminSession,
    state: web::Data<AppState>,
) -> Result<impl Responder, AuthError> {
    state.auth_handler.logout()?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Logged out successfully")))
}

#[get("/session")]
pub async fn current_session(
    session: AdminSession,
    state: web::Data<AppState>,
) -> impl Responder {
    HttpResponse::Ok().json(SessionResponse::new(&session.0, state.auth_handler.session_duration()))
}

#[post("/change-password")]
#[instrument(skip_all)]
pub async fn change_password(
    session: AdminSession,
    state: web::Data<AppState>,
    request: web::Json<ChangePasswordRequest>,
) -> Result<impl Responder, AuthError> {
    state.auth_handler.change_password(&session.0, request.into_inner())?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Password changed successfully!")))
}
