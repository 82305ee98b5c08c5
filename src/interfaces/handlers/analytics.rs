use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    entities::analytics::{UpdateAnalyticsRequest, VisibilityRequest},
    errors::AppError,
    use_cases::extractors::AdminSession,
    AppState,
};

/// Called once per page load.
pub async fn record_visit(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let visit = state.analytics_handler.page_load()?;
    Ok(HttpResponse::Created().json(visit))
}

pub async fn heartbeat(
    session_id: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let update = state.analytics_handler.heartbeat(session_id.into_inner())?;
    Ok(HttpResponse::Ok().json(update))
}

pub async fn visibility(
    session_id: web::Path<Uuid>,
    state: web::Data<AppState>,
    data: web::Json<VisibilityRequest>,
) -> Result<impl Responder, AppError> {
    let update = state.analytics_handler.visibility(session_id.into_inner(), data.visible)?;
    Ok(HttpResponse::Ok().json(update))
}

pub async fn leave(
    session_id: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let update = state.analytics_handler.leave(session_id.into_inner())?;
    Ok(HttpResponse::Ok().json(update))
}

pub async fn admin_get_analytics(
    _session: AdminSession,
    state: web::Data<AppState>,
) -> impl Responder {
    HttpResponse::Ok().json(state.analytics_handler.snapshot())
}

#[instrument(skip(_session, state, data))]
pub async fn admin_update_analytics(
    _session: AdminSession,
    state: web::Data<AppState>,
    data: web::Json<UpdateAnalyticsRequest>,
) -> Result<impl Responder, AppError> {
    let snapshot = state.content.update_analytics(data.into_inner())?;
    Ok(HttpResponse::Ok().json(snapshot))
}
