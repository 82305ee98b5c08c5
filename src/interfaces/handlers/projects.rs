use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::project::{NewProjectRequest, UpdateProjectRequest},
    errors::AppError,
    use_cases::extractors::AdminSession,
    utils::ids::EntryId,
    AppState,
};

pub async fn get_projects(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.content.projects())
}

#[instrument(skip(_session, state, data))]
pub async fn create_project(
    _session: AdminSession,
    state: web::Data<AppState>,
    data: web::Json<NewProjectRequest>,
) -> Result<impl Responder, AppError> {
    let project = state.content.add_project(data.into_inner())?;
    Ok(HttpResponse::Created().json(project))
}

#[instrument(skip(_session, state, data))]
pub async fn update_project(
    _session: AdminSession,
    project_id: web::Path<EntryId>,
    state: web::Data<AppState>,
    data: web::Json<UpdateProjectRequest>,
) -> Result<impl Responder, AppError> {
    let id = project_id.into_inner();
    let project = state.content
        .update_project(id, data.into_inner())?
        .ok_or_else(|| AppError::NotFound(format!("Project {id} not found")))?;
    Ok(HttpResponse::Ok().json(project))
}

#[instrument(skip(_session, state))]
pub async fn delete_project(
    _session: AdminSession,
    project_id: web::Path<EntryId>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.content.delete_project(project_id.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}
