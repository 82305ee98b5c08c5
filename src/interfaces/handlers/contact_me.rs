use actix_web::{web, HttpResponse, Responder};

use crate::{
    entities::contact_me::{ContactMeForm, HireRequestForm, SubscribeForm},
    errors::AppError,
    AppState,
};

pub async fn create_contact_me(
    state: web::Data<AppState>,
    form: web::Json<ContactMeForm>,
) -> Result<impl Responder, AppError> {
    let response = state.contact_handler
        .submit_contact(form.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

pub async fn create_hire_request(
    state: web::Data<AppState>,
    form: web::Json<HireRequestForm>,
) -> Result<impl Responder, AppError> {
    let response = state.contact_handler
        .submit_hire_request(form.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

pub async fn subscribe(
    state: web::Data<AppState>,
    form: web::Json<SubscribeForm>,
) -> Result<impl Responder, AppError> {
    let response = state.contact_handler.subscribe(form.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}
