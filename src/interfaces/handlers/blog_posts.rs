use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::blog_post::{NewBlogPostRequest, UpdateBlogPostRequest},
    errors::AppError,
    use_cases::{content::BlogQuery, extractors::AdminSession},
    utils::ids::EntryId,
    AppState,
};

#[instrument(skip(state, query))]
pub async fn get_published_blog_posts(
    state: web::Data<AppState>,
    query: web::Query<BlogQuery>,
) -> impl Responder {
    HttpResponse::Ok().json(state.content.published_posts(&query))
}

#[instrument(skip(state))]
pub async fn get_blog_post_by_id(
    post_id: web::Path<EntryId>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let id = post_id.into_inner();
    let post = state.content
        .published_post(id)
        .ok_or_else(|| AppError::NotFound(format!("Blog post {id} not found")))?;
    Ok(HttpResponse::Ok().json(post))
}

/// Drafts included, for the admin list.
pub async fn admin_get_all_blog_posts(
    _session: AdminSession,
    state: web::Data<AppState>,
) -> impl Responder {
    HttpResponse::Ok().json(state.content.blog_posts())
}

#[instrument(skip(_session, state, data))]
pub async fn create_blog_post(
    _session: AdminSession,
    state: web::Data<AppState>,
    data: web::Json<NewBlogPostRequest>,
) -> Result<impl Responder, AppError> {
    let post = state.content.add_blog_post(data.into_inner())?;
    Ok(HttpResponse::Created().json(post))
}

#[instrument(skip(_session, state, data))]
pub async fn update_blog_post(
    _session: AdminSession,
    post_id: web::Path<EntryId>,
    state: web::Data<AppState>,
    data: web::Json<UpdateBlogPostRequest>,
) -> Result<impl Responder, AppError> {
    let id = post_id.into_inner();
    let post = state.content
        .update_blog_post(id, data.into_inner())?
        .ok_or_else(|| AppError::NotFound(format!("Blog post {id} not found")))?;
    Ok(HttpResponse::Ok().json(post))
}

#[instrument(skip(_session, state))]
pub async fn toggle_publish_blog_post(
    _session: AdminSession,
    post_id: web::Path<EntryId>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let id = post_id.into_inner();
    let post = state.content
        .toggle_publish(id)?
        .ok_or_else(|| AppError::NotFound(format!("Blog post {id} not found")))?;
    Ok(HttpResponse::Ok().json(post))
}

#[instrument(skip(_session, state))]
pub async fn delete_blog_post(
    _session: AdminSession,
    post_id: web::Path<EntryId>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.content.delete_blog_post(post_id.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}
