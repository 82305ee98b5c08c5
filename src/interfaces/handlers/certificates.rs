use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::certificate::{NewCertificateRequest, UpdateCertificateRequest},
    errors::AppError,
    use_cases::{content::CategoryFilter, extractors::AdminSession},
    utils::ids::EntryId,
    AppState,
};

pub async fn get_certificates(
    state: web::Data<AppState>,
    query: web::Query<CategoryFilter>,
) -> impl Responder {
    HttpResponse::Ok().json(state.content.certificates(query.category.as_deref()))
}

pub async fn get_certificate_categories(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.content.certificate_categories())
}

#[instrument(skip(_session, state, data))]
pub async fn create_certificate(
    _session: AdminSession,
    state: web::Data<AppState>,
    data: web::Json<NewCertificateRequest>,
) -> Result<impl Responder, AppError> {
    let certificate = state.content.add_certificate(data.into_inner())?;
    Ok(HttpResponse::Created().json(certificate))
}

#[instrument(skip(_session, state, data))]
pub async fn update_certificate(
    _session: AdminSession,
    certificate_id: web::Path<EntryId>,
    state: web::Data<AppState>,
    data: web::Json<UpdateCertificateRequest>,
) -> Result<impl Responder, AppError> {
    let id = certificate_id.into_inner();
    let certificate = state.content
        .update_certificate(id, data.into_inner())?
        .ok_or_else(|| AppError::NotFound(format!("Certificate {id} not found")))?;
    Ok(HttpResponse::Ok().json(certificate))
}

#[instrument(skip(_session, state))]
pub async fn delete_certificate(
    _session: AdminSession,
    certificate_id: web::Path<EntryId>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.content.delete_certificate(certificate_id.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}
