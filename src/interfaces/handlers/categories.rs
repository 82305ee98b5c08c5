use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    errors::AppError,
    use_cases::{content::CategoryRequest, extractors::AdminSession},
    AppState,
};

/// Public list: "All" plus the categories published posts use.
pub async fn get_public_categories(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.content.public_blog_categories())
}

pub async fn admin_get_categories(
    _session: AdminSession,
    state: web::Data<AppState>,
) -> impl Responder {
    HttpResponse::Ok().json(state.content.blog_categories())
}

#[instrument(skip(_session, state))]
pub async fn create_category(
    _session: AdminSession,
    state: web::Data<AppState>,
    data: web::Json<CategoryRequest>,
) -> Result<impl Responder, AppError> {
    let added = state.content.add_category(data.into_inner())?;
    let categories = state.content.blog_categories();

    Ok(if added {
        HttpResponse::Created().json(categories)
    } else {
        HttpResponse::Ok().json(categories)
    })
}

#[instrument(skip(_session, state))]
pub async fn rename_category(
    _session: AdminSession,
    name: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<CategoryRequest>,
) -> Result<impl Responder, AppError> {
    let old = name.into_inner();
    if !state.content.rename_category(&old, &data.name)? {
        return Err(AppError::NotFound(format!("Category '{old}' not found")));
    }
    Ok(HttpResponse::Ok().json(state.content.blog_categories()))
}

#[instrument(skip(_session, state))]
pub async fn delete_category(
    _session: AdminSession,
    name: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.content.delete_category(&name)?;
    Ok(HttpResponse::NoContent().finish())
}
